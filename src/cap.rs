use soroban_sdk::{Address, Env};

use crate::types::{SalePhase, Tier};
use crate::{clock, ledger, whitelist};
use crate::{CROWDSALE_AMOUNT, PRESALE_AMOUNT, TIER1_HARDCAP, TIER2_HARDCAP};

/// Day-two cap multiplier over the tier base cap.
const DAY2_MULTIPLIER: i128 = 5;

/// Tokens still mintable before the crowdsale allocation is exhausted.
pub fn remaining_global_cap(env: &Env) -> i128 {
    (PRESALE_AMOUNT + CROWDSALE_AMOUNT - ledger::total_supply(env)).max(0)
}

fn base_cap(tier: Tier) -> i128 {
    match tier {
        Tier::One => TIER1_HARDCAP,
        Tier::Two => TIER2_HARDCAP,
    }
}

/// Additional tokens `account` may receive through contributions right now.
/// Zero means not eligible. Never negative and never above the remaining
/// global cap.
pub fn individual_cap(env: &Env, account: &Address) -> i128 {
    let tier = match whitelist::tier_of(env, account) {
        Some(tier) => tier,
        None => return 0,
    };
    let base = base_cap(tier);
    let remaining = remaining_global_cap(env);

    let cap = match clock::current_phase(env) {
        SalePhase::Day1 => base - ledger::balance_of(env, account),
        SalePhase::Day2 => base * DAY2_MULTIPLIER - ledger::balance_of(env, account),
        SalePhase::Day3 => remaining,
        SalePhase::NotStarted | SalePhase::Ended => return 0,
    };

    cap.clamp(0, remaining)
}
