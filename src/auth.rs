use soroban_sdk::{Address, Env};

use crate::storage;
use crate::CrowdsaleError;

/// Proof that `caller` authorized the current invocation.
///
/// Only [`Authorization::require`] builds one, so holding a value means the
/// host witness check already passed. `is_authority` is set when the caller is
/// the sale owner recorded at deploy.
#[derive(Clone, Debug)]
pub struct Authorization {
    caller: Address,
    is_authority: bool,
}

impl Authorization {
    /// Runs the host auth check for `caller` and resolves its role.
    pub fn require(env: &Env, caller: &Address) -> Self {
        caller.require_auth();
        let is_authority = storage::read_owner(env)
            .map(|owner| owner == *caller)
            .unwrap_or(false);
        Authorization {
            caller: caller.clone(),
            is_authority,
        }
    }

    pub fn caller(&self) -> &Address {
        &self.caller
    }

    pub fn is_authority(&self) -> bool {
        self.is_authority
    }

    /// `Err(NotAuthorized)` unless the caller is the sale owner.
    pub fn require_authority(&self) -> Result<(), CrowdsaleError> {
        if !self.is_authority {
            return Err(CrowdsaleError::NotAuthorized);
        }
        Ok(())
    }

    /// `Err(NotAuthorized)` unless the caller may move funds out of `account`.
    pub fn require_account(&self, account: &Address) -> Result<(), CrowdsaleError> {
        if self.caller != *account {
            return Err(CrowdsaleError::NotAuthorized);
        }
        Ok(())
    }
}
