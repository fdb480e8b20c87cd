use soroban_sdk::{Address, Bytes, Env};

use crate::auth::Authorization;
use crate::storage::{self, DataKey};
use crate::{CrowdsaleError, ACCOUNT_ID_LEN, EVENT_BURN, EVENT_TRANSFER};

pub fn balance_of(env: &Env, account: &Address) -> i128 {
    storage::read_balance(env, account)
}

pub fn total_supply(env: &Env) -> i128 {
    storage::read_total_supply(env)
}

pub fn transfers_enabled(env: &Env) -> bool {
    storage::read_flag(env, &DataKey::TransfersEnabled)
}

fn publish_transfer(env: &Env, from: Option<Address>, to: Option<Address>, amount: i128) {
    env.events().publish((EVENT_TRANSFER, from, to), amount);
}

/// Checks shared by transfer and burn: amount sign, caller, transfer lock.
fn check_outgoing(
    env: &Env,
    auth: &Authorization,
    from: &Address,
    amount: i128,
) -> Result<(), CrowdsaleError> {
    if amount < 0 {
        return Err(CrowdsaleError::InvalidAmount);
    }
    auth.require_account(from)?;
    // The caller is `from` here, so the owner can always move its own funds.
    if !transfers_enabled(env) && !auth.is_authority() {
        return Err(CrowdsaleError::TransfersLocked);
    }
    Ok(())
}

fn debit(env: &Env, from: &Address, amount: i128) -> Result<(), CrowdsaleError> {
    let balance = storage::read_balance(env, from);
    if balance < amount {
        return Err(CrowdsaleError::InsufficientBalance);
    }
    storage::write_balance(env, from, balance - amount);
    Ok(())
}

fn credit(env: &Env, to: &Address, amount: i128) -> Result<(), CrowdsaleError> {
    let balance = storage::read_balance(env, to);
    let updated = balance
        .checked_add(amount)
        .ok_or(CrowdsaleError::ArithmeticOverflow)?;
    storage::write_balance(env, to, updated);
    Ok(())
}

pub fn transfer(
    env: &Env,
    auth: &Authorization,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), CrowdsaleError> {
    check_outgoing(env, auth, from, amount)?;

    if from == to || amount == 0 {
        return Ok(());
    }

    debit(env, from, amount)?;
    credit(env, to, amount)?;
    publish_transfer(env, Some(from.clone()), Some(to.clone()), amount);
    Ok(())
}

/// Credits freshly minted tokens. Eligibility is the caller's job.
pub fn mint(env: &Env, to: &Address, amount: i128) -> Result<(), CrowdsaleError> {
    if amount < 0 {
        return Err(CrowdsaleError::InvalidAmount);
    }
    let supply = storage::read_total_supply(env)
        .checked_add(amount)
        .ok_or(CrowdsaleError::ArithmeticOverflow)?;
    credit(env, to, amount)?;
    storage::write_total_supply(env, supply);
    publish_transfer(env, None, Some(to.clone()), amount);
    Ok(())
}

/// Destroys `amount` tokens held by `account`. `tag` is an opaque 20-byte
/// reference carried into the burn event.
pub fn burn(
    env: &Env,
    auth: &Authorization,
    account: &Address,
    amount: i128,
    tag: &Bytes,
) -> Result<(), CrowdsaleError> {
    if tag.len() != ACCOUNT_ID_LEN {
        return Err(CrowdsaleError::InvalidTag);
    }
    check_outgoing(env, auth, account, amount)?;

    if amount > 0 {
        debit(env, account, amount)?;
        let supply = storage::read_total_supply(env) - amount;
        storage::write_total_supply(env, supply);
        publish_transfer(env, Some(account.clone()), None, amount);
    }

    env.events()
        .publish((EVENT_BURN, account.clone()), (amount, tag.clone()));
    Ok(())
}
