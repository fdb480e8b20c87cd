use soroban_sdk::{log, token, Address, BytesN, Env};

use crate::storage::{self, DataKey};
use crate::types::{ContributionAsset, MintOutcome};
use crate::{cap, clock, config, ledger};
use crate::{CrowdsaleError, ASSET_FACTOR, EVENT_REFUND};

/// Token amount bought by `amount` asset units at `rate`, truncated.
pub fn tokens_for(amount: i128, rate: i128) -> Result<i128, CrowdsaleError> {
    amount
        .checked_mul(rate)
        .map(|scaled| scaled / ASSET_FACTOR)
        .ok_or(CrowdsaleError::ArithmeticOverflow)
}

/// Asset units worth `tokens` at `rate`, truncated. Inverse of [`tokens_for`],
/// so a round trip can lose up to one unit on each side.
pub fn asset_for(tokens: i128, rate: i128) -> Result<i128, CrowdsaleError> {
    if rate <= 0 {
        return Err(CrowdsaleError::InvalidExchangeRate);
    }
    tokens
        .checked_mul(ASSET_FACTOR)
        .map(|scaled| scaled / rate)
        .ok_or(CrowdsaleError::ArithmeticOverflow)
}

/// Splits a contribution into minted tokens and refunded asset units given
/// the contributor's current cap.
pub fn split_contribution(
    amount: i128,
    rate: i128,
    individual_cap: i128,
) -> Result<MintOutcome, CrowdsaleError> {
    let wanted = match tokens_for(amount, rate) {
        Ok(wanted) => wanted,
        // Past i128 the contribution is above any cap: accept what buys the cap.
        Err(_) => {
            let accepted = asset_for(individual_cap, rate)?;
            return Ok(MintOutcome {
                minted: individual_cap,
                refunded: amount - accepted,
            });
        }
    };
    if wanted > individual_cap {
        let refunded = asset_for(wanted - individual_cap, rate)?;
        return Ok(MintOutcome {
            minted: individual_cap,
            refunded,
        });
    }
    Ok(MintOutcome {
        minted: wanted,
        refunded: 0,
    })
}

pub fn is_processed(env: &Env, contribution_id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::ProcessedContribution(contribution_id.clone()))
}

pub fn last_processed(env: &Env) -> Option<BytesN<32>> {
    env.storage()
        .persistent()
        .get(&DataKey::LastMintContribution)
}

fn mark_processed(env: &Env, contribution_id: &BytesN<32>) {
    let store = env.storage().persistent();
    store.set(
        &DataKey::ProcessedContribution(contribution_id.clone()),
        &true,
    );
    store.set(&DataKey::LastMintContribution, contribution_id);
}

fn publish_refund(env: &Env, contributor: &Address, asset: ContributionAsset, amount: i128) {
    env.events()
        .publish((EVENT_REFUND, contributor.clone()), (asset, amount));
}

/// Converts a contribution into minted tokens.
///
/// Validation, authorization and replay failures return `Err` and leave no
/// trace. Once the contribution id is recorded every later outcome is an
/// `Ok(MintOutcome)`, so the replay marker commits even when nothing is
/// minted. Only the accepted part of `amount` is pulled from the
/// contributor; the refunded part never leaves their account.
pub fn process_contribution(
    env: &Env,
    contributor: &Address,
    asset: ContributionAsset,
    amount: i128,
    contribution_id: &BytesN<32>,
) -> Result<MintOutcome, CrowdsaleError> {
    if amount < 0 {
        return Err(CrowdsaleError::InvalidAmount);
    }
    contributor.require_auth();

    if storage::read_owner(env).is_none() {
        return Err(CrowdsaleError::NotDeployed);
    }
    let asset_token =
        storage::read_asset_token(env, asset).ok_or(CrowdsaleError::AssetNotConfigured)?;
    if is_processed(env, contribution_id) {
        return Err(CrowdsaleError::ContributionAlreadyProcessed);
    }
    mark_processed(env, contribution_id);

    let rate = config::exchange_rate(env, asset);
    if !clock::has_started(env) || clock::has_ended(env) || rate <= 0 {
        log!(env, "contribution outside sale window", contributor.clone());
        publish_refund(env, contributor, asset, amount);
        return Ok(MintOutcome::rejected(amount));
    }

    // The id is recorded, so nothing below may return `Err`.
    let individual_cap = cap::individual_cap(env, contributor);
    let outcome = match split_contribution(amount, rate, individual_cap) {
        Ok(outcome) if outcome.minted > 0 => outcome,
        _ => {
            publish_refund(env, contributor, asset, amount);
            return Ok(MintOutcome::rejected(amount));
        }
    };
    if ledger::mint(env, contributor, outcome.minted).is_err() {
        publish_refund(env, contributor, asset, amount);
        return Ok(MintOutcome::rejected(amount));
    }

    let accepted = amount - outcome.refunded;
    token::Client::new(env, &asset_token).transfer(
        contributor,
        &env.current_contract_address(),
        &accepted,
    );
    if outcome.refunded > 0 {
        publish_refund(env, contributor, asset, outcome.refunded);
    }
    Ok(outcome)
}
