use soroban_sdk::contracttype;

/// Whitelist tier. Tier one has the larger base cap and wins when an account
/// is a member of both.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Tier {
    One = 1,
    Two = 2,
}

/// Sale phase derived from the configured start time and the ledger clock.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum SalePhase {
    NotStarted = 0,
    Day1 = 1,
    Day2 = 2,
    Day3 = 3,
    Ended = 4,
}

/// The two assets accepted as contributions.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum ContributionAsset {
    Primary = 0,
    Secondary = 1,
}

/// Snapshot of the sale configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Ledger timestamp at which day one opens (0 = unset).
    pub start_time: u64,
    /// Tokens (8 decimals) minted per whole unit of the primary asset.
    pub tokens_per_primary: i128,
    /// Tokens (8 decimals) minted per whole unit of the secondary asset.
    pub tokens_per_secondary: i128,
}

/// Result of processing one contribution.
///
/// `minted` is credited to the contributor; `refunded` is the part of the
/// contribution (in asset units) that was not accepted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintOutcome {
    pub minted: i128,
    pub refunded: i128,
}

impl MintOutcome {
    pub fn rejected(refunded: i128) -> Self {
        MintOutcome {
            minted: 0,
            refunded,
        }
    }

    pub fn is_success(&self) -> bool {
        self.minted > 0
    }
}
