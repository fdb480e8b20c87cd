use soroban_sdk::Env;

use crate::storage;
use crate::types::SalePhase;
use crate::ONE_DAY_SECS;

/// Number of days the public sale runs.
pub const SALE_DAYS: u64 = 3;

/// Phase of a sale starting at `start` as seen at `now`. A zero start means
/// the sale was never configured.
pub fn phase_at(start: u64, now: u64) -> SalePhase {
    if start == 0 || now < start {
        return SalePhase::NotStarted;
    }
    let elapsed = now - start;
    if elapsed < ONE_DAY_SECS {
        SalePhase::Day1
    } else if elapsed < ONE_DAY_SECS * 2 {
        SalePhase::Day2
    } else if elapsed < ONE_DAY_SECS * SALE_DAYS {
        SalePhase::Day3
    } else {
        SalePhase::Ended
    }
}

pub fn current_phase(env: &Env) -> SalePhase {
    phase_at(storage::read_sale_start_time(env), env.ledger().timestamp())
}

pub fn has_started(env: &Env) -> bool {
    let start = storage::read_sale_start_time(env);
    start != 0 && start <= env.ledger().timestamp()
}

pub fn has_ended(env: &Env) -> bool {
    let start = storage::read_sale_start_time(env);
    start != 0 && env.ledger().timestamp() >= start.saturating_add(ONE_DAY_SECS * SALE_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: u64 = 1_000_000;

    #[test]
    fn unset_start_is_not_started() {
        assert_eq!(phase_at(0, 0), SalePhase::NotStarted);
        assert_eq!(phase_at(0, 10 * ONE_DAY_SECS), SalePhase::NotStarted);
    }

    #[test]
    fn before_start_is_not_started() {
        assert_eq!(phase_at(START, START - 1), SalePhase::NotStarted);
    }

    #[test]
    fn day_boundaries() {
        assert_eq!(phase_at(START, START), SalePhase::Day1);
        assert_eq!(phase_at(START, START + ONE_DAY_SECS - 1), SalePhase::Day1);
        assert_eq!(phase_at(START, START + ONE_DAY_SECS), SalePhase::Day2);
        assert_eq!(phase_at(START, START + 2 * ONE_DAY_SECS - 1), SalePhase::Day2);
        assert_eq!(phase_at(START, START + 2 * ONE_DAY_SECS), SalePhase::Day3);
        assert_eq!(phase_at(START, START + 3 * ONE_DAY_SECS - 1), SalePhase::Day3);
        assert_eq!(phase_at(START, START + 3 * ONE_DAY_SECS), SalePhase::Ended);
        assert_eq!(phase_at(START, u64::MAX), SalePhase::Ended);
    }
}
