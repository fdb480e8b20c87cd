use soroban_sdk::Env;

use crate::auth::Authorization;
use crate::storage::{self, DataKey};
use crate::types::{ContributionAsset, SaleConfig};
use crate::{clock, CrowdsaleError, EVENT_SALE_CONFIG, EVENT_TRANSFERS_ENABLED};

pub fn exchange_rate(env: &Env, asset: ContributionAsset) -> i128 {
    storage::read_i128(env, &DataKey::TokensPerUnit(asset))
}

pub fn sale_config(env: &Env) -> SaleConfig {
    SaleConfig {
        start_time: storage::read_sale_start_time(env),
        tokens_per_primary: exchange_rate(env, ContributionAsset::Primary),
        tokens_per_secondary: exchange_rate(env, ContributionAsset::Secondary),
    }
}

/// Writes start time and both rates. Allowed until the sale starts.
pub fn set_sale_config(
    env: &Env,
    auth: &Authorization,
    config: &SaleConfig,
) -> Result<(), CrowdsaleError> {
    auth.require_authority()?;
    if clock::has_started(env) {
        return Err(CrowdsaleError::SaleAlreadyStarted);
    }
    if config.tokens_per_primary <= 0 || config.tokens_per_secondary <= 0 {
        return Err(CrowdsaleError::InvalidExchangeRate);
    }

    let store = env.storage().persistent();
    store.set(&DataKey::SaleStartTime, &config.start_time);
    store.set(
        &DataKey::TokensPerUnit(ContributionAsset::Primary),
        &config.tokens_per_primary,
    );
    store.set(
        &DataKey::TokensPerUnit(ContributionAsset::Secondary),
        &config.tokens_per_secondary,
    );

    env.events().publish(
        (EVENT_SALE_CONFIG, auth.caller().clone()),
        (
            config.start_time,
            config.tokens_per_primary,
            config.tokens_per_secondary,
        ),
    );
    Ok(())
}

/// Unlocks holder-to-holder transfers once the sale has ended. The flag is
/// never cleared.
pub fn enable_transfers(env: &Env, auth: &Authorization) -> Result<(), CrowdsaleError> {
    auth.require_authority()?;
    if !clock::has_ended(env) {
        return Err(CrowdsaleError::SaleNotEnded);
    }
    if storage::read_flag(env, &DataKey::TransfersEnabled) {
        return Ok(());
    }
    env.storage()
        .persistent()
        .set(&DataKey::TransfersEnabled, &true);
    env.events()
        .publish((EVENT_TRANSFERS_ENABLED, auth.caller().clone()), ());
    Ok(())
}
