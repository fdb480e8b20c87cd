use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::types::{ContributionAsset, Tier};

/// Storage keys. Balances are stored only while nonzero; whitelist
/// membership is a present/absent flag per (account, tier).
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Sale authority, written by `deploy`.
    Owner,
    TotalSupply,
    Balance(Address),
    /// SEP-41 contract that delivers contributions of the given asset.
    AssetToken(ContributionAsset),
    /// Ledger timestamp of day one; absent or 0 = unset.
    SaleStartTime,
    TokensPerUnit(ContributionAsset),
    Whitelist(Address, Tier),
    WhitelistTotal(Tier),
    /// One-way flag; never removed once written.
    TransfersEnabled,
    LastMintContribution,
    ProcessedContribution(BytesN<32>),
}

pub fn read_owner(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Owner)
}

pub fn read_i128(env: &Env, key: &DataKey) -> i128 {
    env.storage()
        .persistent()
        .get::<DataKey, i128>(key)
        .unwrap_or(0)
}

pub fn read_flag(env: &Env, key: &DataKey) -> bool {
    env.storage()
        .persistent()
        .get::<DataKey, bool>(key)
        .unwrap_or(false)
}

pub fn read_balance(env: &Env, account: &Address) -> i128 {
    read_i128(env, &DataKey::Balance(account.clone()))
}

/// Writes a balance, deleting the entry when it reaches zero.
pub fn write_balance(env: &Env, account: &Address, amount: i128) {
    let key = DataKey::Balance(account.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
    }
}

pub fn read_total_supply(env: &Env) -> i128 {
    read_i128(env, &DataKey::TotalSupply)
}

pub fn write_total_supply(env: &Env, amount: i128) {
    env.storage().persistent().set(&DataKey::TotalSupply, &amount);
}

pub fn read_sale_start_time(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get::<DataKey, u64>(&DataKey::SaleStartTime)
        .unwrap_or(0)
}

pub fn read_asset_token(env: &Env, asset: ContributionAsset) -> Option<Address> {
    env.storage().persistent().get(&DataKey::AssetToken(asset))
}
