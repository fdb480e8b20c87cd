use soroban_sdk::{Address, Env};

use crate::storage::DataKey;
use crate::types::Tier;
use crate::{CrowdsaleError, EVENT_WL_ADD, EVENT_WL_REM};

pub fn is_member(env: &Env, account: &Address, tier: Tier) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Whitelist(account.clone(), tier))
}

pub fn tier_total(env: &Env, tier: Tier) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::WhitelistTotal(tier))
        .unwrap_or(0)
}

/// Tier used for cap computation; tier one takes priority.
pub fn tier_of(env: &Env, account: &Address) -> Option<Tier> {
    if is_member(env, account, Tier::One) {
        Some(Tier::One)
    } else if is_member(env, account, Tier::Two) {
        Some(Tier::Two)
    } else {
        None
    }
}

pub fn add(env: &Env, account: &Address, tier: Tier) -> Result<(), CrowdsaleError> {
    if is_member(env, account, tier) {
        return Err(CrowdsaleError::AlreadyWhitelisted);
    }
    let total_key = DataKey::WhitelistTotal(tier);
    let total = tier_total(env, tier);
    env.storage().persistent().set(&total_key, &(total + 1));
    env.storage()
        .persistent()
        .set(&DataKey::Whitelist(account.clone(), tier), &true);

    env.events().publish((EVENT_WL_ADD, account.clone()), tier);
    Ok(())
}

pub fn remove(env: &Env, account: &Address, tier: Tier) -> Result<(), CrowdsaleError> {
    if !is_member(env, account, tier) {
        return Err(CrowdsaleError::NotWhitelisted);
    }
    let total_key = DataKey::WhitelistTotal(tier);
    let total = tier_total(env, tier);
    env.storage()
        .persistent()
        .set(&total_key, &total.saturating_sub(1));
    env.storage()
        .persistent()
        .remove(&DataKey::Whitelist(account.clone(), tier));

    env.events().publish((EVENT_WL_REM, account.clone()), tier);
    Ok(())
}
