#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, Bytes, BytesN, Env,
    String, Symbol,
};

mod auth;
mod cap;
mod clock;
mod config;
mod ledger;
mod mint;
mod storage;
mod types;
mod whitelist;

use auth::Authorization;
use storage::DataKey;
pub use types::{ContributionAsset, MintOutcome, SaleConfig, SalePhase, Tier};

/// Contract error codes. Auth failures of the host witness check are
/// signaled by host panic (require_auth).
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(u32)]
pub enum CrowdsaleError {
    /// `deploy` was already called.
    AlreadyDeployed = 1,
    /// The operation needs a deployed contract.
    NotDeployed = 2,
    /// The authenticated caller may not perform this operation.
    NotAuthorized = 3,
    /// Amount is negative (or not positive where a positive amount is required).
    InvalidAmount = 4,
    /// Burn tag is not a 20-byte identifier.
    InvalidTag = 5,
    InsufficientBalance = 6,
    /// Transfers are locked until the owner enables them after the sale.
    TransfersLocked = 7,
    /// Sale config can no longer change.
    SaleAlreadyStarted = 8,
    /// Transfers can only be enabled after the sale ended.
    SaleNotEnded = 9,
    /// Exchange rates must be positive.
    InvalidExchangeRate = 10,
    AlreadyWhitelisted = 11,
    NotWhitelisted = 12,
    /// This contribution id was seen before.
    ContributionAlreadyProcessed = 13,
    ArithmeticOverflow = 14,
    /// No token contract registered for the contributed asset.
    AssetNotConfigured = 15,
}

// ── Event symbols ────────────────────────────────────────────
const EVENT_DEPLOY: Symbol = symbol_short!("deploy");
const EVENT_TRANSFER: Symbol = symbol_short!("transfer");
const EVENT_REFUND: Symbol = symbol_short!("refund");
const EVENT_BURN: Symbol = symbol_short!("burn");
const EVENT_WL_ADD: Symbol = symbol_short!("wl_add");
const EVENT_WL_REM: Symbol = symbol_short!("wl_rem");
const EVENT_SALE_CONFIG: Symbol = symbol_short!("sale_cfg");
const EVENT_TRANSFERS_ENABLED: Symbol = symbol_short!("xfers_on");
const EVENT_WITHDRAW: Symbol = symbol_short!("withdraw");

// ── Token and sale constants ─────────────────────────────────
const TOKEN_NAME: &str = "Bolt Token";
const TOKEN_SYMBOL: &str = "BOLT";
pub const DECIMALS: u32 = 8;
/// Smallest-unit factor of the token, decided by `DECIMALS`.
pub const TOKEN_FACTOR: i128 = 100_000_000;
/// Smallest-unit factor of the contributed assets; exchange rates are
/// expressed per whole asset unit.
pub const ASSET_FACTOR: i128 = 100_000_000;
pub const ONE_DAY_SECS: u64 = 24 * 60 * 60;

/// Allocation minted to the owner at deploy.
pub const PRESALE_AMOUNT: i128 = 800_000_000 * TOKEN_FACTOR;
/// Allocation available to public contributions.
pub const CROWDSALE_AMOUNT: i128 = 200_000_000 * TOKEN_FACTOR;
pub const TIER1_HARDCAP: i128 = 2_000_000 * TOKEN_FACTOR;
pub const TIER2_HARDCAP: i128 = 1_000_000 * TOKEN_FACTOR;

/// Length of the raw account identifier carried as a burn tag.
pub const ACCOUNT_ID_LEN: u32 = 20;

#[contract]
pub struct BoltCrowdsale;

#[contractimpl]
impl BoltCrowdsale {
    pub fn name(env: Env) -> String {
        String::from_str(&env, TOKEN_NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, TOKEN_SYMBOL)
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    /// Deploy the sale: record the owner and the two contribution asset
    /// contracts, and mint the presale allocation to the owner.
    ///
    /// ### Parameters
    /// - `owner`: The sale authority.
    /// - `primary_asset`: SEP-41 contract of the primary contribution asset.
    /// - `secondary_asset`: SEP-41 contract of the secondary contribution asset.
    ///
    /// ### Returns
    /// - `Err(CrowdsaleError::AlreadyDeployed)` on any call after the first.
    pub fn deploy(
        env: Env,
        owner: Address,
        primary_asset: Address,
        secondary_asset: Address,
    ) -> Result<(), CrowdsaleError> {
        if env.storage().persistent().has(&DataKey::TotalSupply) {
            return Err(CrowdsaleError::AlreadyDeployed);
        }
        let store = env.storage().persistent();
        store.set(&DataKey::Owner, &owner);
        store.set(
            &DataKey::AssetToken(ContributionAsset::Primary),
            &primary_asset,
        );
        store.set(
            &DataKey::AssetToken(ContributionAsset::Secondary),
            &secondary_asset,
        );
        storage::write_balance(&env, &owner, PRESALE_AMOUNT);
        storage::write_total_supply(&env, PRESALE_AMOUNT);

        env.events().publish(
            (EVENT_TRANSFER, None::<Address>, Some(owner.clone())),
            PRESALE_AMOUNT,
        );
        env.events()
            .publish((EVENT_DEPLOY, owner), (primary_asset, secondary_asset));
        Ok(())
    }

    /// Get the sale authority, if deployed.
    pub fn owner(env: Env) -> Option<Address> {
        storage::read_owner(&env)
    }

    pub fn total_supply(env: Env) -> i128 {
        ledger::total_supply(&env)
    }

    /// Balance of `account`; 0 when it holds nothing.
    pub fn balance_of(env: Env, account: Address) -> i128 {
        ledger::balance_of(&env, &account)
    }

    /// Move `amount` tokens from `from` to `to`.
    ///
    /// Until transfers are enabled only the owner can send. Transferring to
    /// self or a zero amount succeeds without effect.
    ///
    /// ### Returns
    /// - `Err(CrowdsaleError::InvalidAmount)` if `amount` is negative.
    /// - `Err(CrowdsaleError::TransfersLocked)` while locked and `from` is not the owner.
    /// - `Err(CrowdsaleError::InsufficientBalance)` if `from` holds less than `amount`.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), CrowdsaleError> {
        let auth = Authorization::require(&env, &from);
        ledger::transfer(&env, &auth, &from, &to, amount)
    }

    /// Contribute `amount` units of `asset` and receive tokens at the
    /// configured rate, bounded by the contributor's individual cap.
    ///
    /// `contribution_id` identifies the inbound contribution; each id is
    /// processed at most once. Only the accepted part of `amount` is
    /// transferred from `contributor` to this contract.
    ///
    /// ### Returns
    /// - `Ok(MintOutcome)` with `minted == 0` and a full refund when the sale
    ///   is not open or nothing can be minted. The id is still consumed.
    /// - `Err(CrowdsaleError::ContributionAlreadyProcessed)` for a replayed id.
    pub fn mint_tokens(
        env: Env,
        contributor: Address,
        asset: ContributionAsset,
        amount: i128,
        contribution_id: BytesN<32>,
    ) -> Result<MintOutcome, CrowdsaleError> {
        mint::process_contribution(&env, &contributor, asset, amount, &contribution_id)
    }

    /// Burn `amount` tokens held by `account`. `tag` must be 20 bytes and is
    /// carried into the `burn` event.
    pub fn burn_tokens(
        env: Env,
        account: Address,
        amount: i128,
        tag: Bytes,
    ) -> Result<(), CrowdsaleError> {
        let auth = Authorization::require(&env, &account);
        ledger::burn(&env, &auth, &account, amount, &tag)
    }

    /// Configure the sale start time and both exchange rates (owner only).
    ///
    /// Rates are tokens in smallest units per whole asset unit. The config
    /// can be rewritten until the sale starts.
    ///
    /// ### Returns
    /// - `Err(CrowdsaleError::NotAuthorized)` if `caller` is not the owner.
    /// - `Err(CrowdsaleError::SaleAlreadyStarted)` once the start time passed.
    /// - `Err(CrowdsaleError::InvalidExchangeRate)` if a rate is not positive.
    pub fn set_sale_config(
        env: Env,
        caller: Address,
        start_time: u64,
        tokens_per_primary: i128,
        tokens_per_secondary: i128,
    ) -> Result<(), CrowdsaleError> {
        let auth = Authorization::require(&env, &caller);
        config::set_sale_config(
            &env,
            &auth,
            &SaleConfig {
                start_time,
                tokens_per_primary,
                tokens_per_secondary,
            },
        )
    }

    pub fn sale_config(env: Env) -> SaleConfig {
        config::sale_config(&env)
    }

    /// Configured start time; 0 when unset.
    pub fn sale_start_time(env: Env) -> u64 {
        storage::read_sale_start_time(&env)
    }

    pub fn sale_phase(env: Env) -> SalePhase {
        clock::current_phase(&env)
    }

    pub fn has_sale_started(env: Env) -> bool {
        clock::has_started(&env)
    }

    pub fn has_sale_ended(env: Env) -> bool {
        clock::has_ended(&env)
    }

    /// Add `account` to a whitelist tier (owner only).
    pub fn add_to_whitelist(
        env: Env,
        caller: Address,
        account: Address,
        tier: Tier,
    ) -> Result<(), CrowdsaleError> {
        let auth = Authorization::require(&env, &caller);
        auth.require_authority()?;
        whitelist::add(&env, &account, tier)
    }

    /// Remove `account` from a whitelist tier (owner only).
    pub fn remove_from_whitelist(
        env: Env,
        caller: Address,
        account: Address,
        tier: Tier,
    ) -> Result<(), CrowdsaleError> {
        let auth = Authorization::require(&env, &caller);
        auth.require_authority()?;
        whitelist::remove(&env, &account, tier)
    }

    pub fn is_in_whitelist(env: Env, account: Address, tier: Tier) -> bool {
        whitelist::is_member(&env, &account, tier)
    }

    /// Number of accounts currently in `tier`.
    pub fn total_whitelisted(env: Env, tier: Tier) -> u32 {
        whitelist::tier_total(&env, tier)
    }

    /// Unlock transfers for all holders (owner only, after the sale ended).
    /// Once enabled, transfers stay enabled.
    pub fn enable_transfers(env: Env, caller: Address) -> Result<(), CrowdsaleError> {
        let auth = Authorization::require(&env, &caller);
        config::enable_transfers(&env, &auth)
    }

    pub fn transfers_enabled(env: Env) -> bool {
        ledger::transfers_enabled(&env)
    }

    /// Tokens `account` may still receive through contributions right now.
    pub fn individual_cap_of(env: Env, account: Address) -> i128 {
        cap::individual_cap(&env, &account)
    }

    /// Admission check for contributions: the sale is open and `account`
    /// still has room under its cap.
    pub fn can_contribute(env: Env, account: Address) -> bool {
        clock::has_started(&env)
            && !clock::has_ended(&env)
            && cap::individual_cap(&env, &account) > 0
    }

    /// Tokens per whole unit of `asset`; 0 when unset.
    pub fn exchange_rate(env: Env, asset: ContributionAsset) -> i128 {
        config::exchange_rate(&env, asset)
    }

    /// Id of the most recently processed contribution.
    pub fn last_mint_contribution(env: Env) -> Option<BytesN<32>> {
        mint::last_processed(&env)
    }

    pub fn is_contribution_processed(env: Env, contribution_id: BytesN<32>) -> bool {
        mint::is_processed(&env, &contribution_id)
    }

    /// Send collected contribution assets held by this contract to `to`
    /// (owner only).
    pub fn withdraw_contributions(
        env: Env,
        caller: Address,
        asset: ContributionAsset,
        to: Address,
        amount: i128,
    ) -> Result<(), CrowdsaleError> {
        if amount <= 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }
        let auth = Authorization::require(&env, &caller);
        auth.require_authority()?;
        let asset_token =
            storage::read_asset_token(&env, asset).ok_or(CrowdsaleError::AssetNotConfigured)?;

        token::Client::new(&env, &asset_token).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );
        env.events().publish((EVENT_WITHDRAW, to), (asset, amount));
        Ok(())
    }
}

mod test_auth;
