#![cfg(test)]
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Bytes, BytesN, Env,
};

use crate::{
    BoltCrowdsale, BoltCrowdsaleClient, ContributionAsset, CrowdsaleError, Tier, ASSET_FACTOR,
    ONE_DAY_SECS, PRESALE_AMOUNT,
};

const START: u64 = 1_700_000_000;

/// Deployed contract with no mocked auths. `deploy` itself needs none.
fn make_deployed(env: &Env) -> (BoltCrowdsaleClient<'_>, Address) {
    let id = env.register_contract(None, BoltCrowdsale);
    let client = BoltCrowdsaleClient::new(env, &id);
    let owner = Address::generate(env);
    let primary = Address::generate(env);
    let secondary = Address::generate(env);
    client.deploy(&owner, &primary, &secondary);
    (client, owner)
}

#[test]
fn transfer_missing_auth_no_mutation() {
    let env = Env::default();
    let (client, owner) = make_deployed(&env);
    let to = Address::generate(&env);
    assert!(client.try_transfer(&owner, &to, &100).is_err());
    assert_eq!(client.balance_of(&owner), PRESALE_AMOUNT);
    assert_eq!(client.balance_of(&to), 0);
}

#[test]
fn burn_missing_auth_no_mutation() {
    let env = Env::default();
    let (client, owner) = make_deployed(&env);
    let tag = Bytes::from_array(&env, &[1u8; 20]);
    assert!(client.try_burn_tokens(&owner, &100, &tag).is_err());
    assert_eq!(client.total_supply(), PRESALE_AMOUNT);
}

#[test]
fn set_sale_config_missing_auth_no_mutation() {
    let env = Env::default();
    let (client, owner) = make_deployed(&env);
    assert!(client
        .try_set_sale_config(&owner, &START, &ASSET_FACTOR, &ASSET_FACTOR)
        .is_err());
    assert_eq!(client.sale_start_time(), 0);
}

#[test]
fn add_to_whitelist_missing_auth_no_mutation() {
    let env = Env::default();
    let (client, owner) = make_deployed(&env);
    let investor = Address::generate(&env);
    assert!(client
        .try_add_to_whitelist(&owner, &investor, &Tier::One)
        .is_err());
    assert!(!client.is_in_whitelist(&investor, &Tier::One));
    assert_eq!(client.total_whitelisted(&Tier::One), 0);
}

#[test]
fn mint_tokens_missing_auth_does_not_consume_id() {
    let env = Env::default();
    let (client, _owner) = make_deployed(&env);
    let contributor = Address::generate(&env);
    let id = BytesN::from_array(&env, &[5u8; 32]);
    assert!(client
        .try_mint_tokens(&contributor, &ContributionAsset::Primary, &ASSET_FACTOR, &id)
        .is_err());
    assert!(!client.is_contribution_processed(&id));
    assert_eq!(client.last_mint_contribution(), None);
}

#[test]
fn enable_transfers_missing_auth_no_mutation() {
    let env = Env::default();
    let (client, owner) = make_deployed(&env);
    assert!(client.try_enable_transfers(&owner).is_err());
    assert!(!client.transfers_enabled());
}

#[test]
fn withdraw_missing_auth() {
    let env = Env::default();
    let (client, owner) = make_deployed(&env);
    assert!(client
        .try_withdraw_contributions(&owner, &ContributionAsset::Primary, &owner, &1)
        .is_err());
}

// ── authenticated, but not the owner ─────────────────────────

#[test]
fn set_sale_config_wrong_caller_no_mutation() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _owner) = make_deployed(&env);
    let attacker = Address::generate(&env);
    assert_eq!(
        client.try_set_sale_config(&attacker, &START, &ASSET_FACTOR, &ASSET_FACTOR),
        Err(Ok(CrowdsaleError::NotAuthorized))
    );
    assert_eq!(client.sale_start_time(), 0);
}

#[test]
fn whitelist_wrong_caller_no_mutation() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, owner) = make_deployed(&env);
    let attacker = Address::generate(&env);
    let investor = Address::generate(&env);

    assert_eq!(
        client.try_add_to_whitelist(&attacker, &attacker, &Tier::One),
        Err(Ok(CrowdsaleError::NotAuthorized))
    );
    assert!(!client.is_in_whitelist(&attacker, &Tier::One));

    client.add_to_whitelist(&owner, &investor, &Tier::Two);
    assert_eq!(
        client.try_remove_from_whitelist(&attacker, &investor, &Tier::Two),
        Err(Ok(CrowdsaleError::NotAuthorized))
    );
    assert!(client.is_in_whitelist(&investor, &Tier::Two));
    assert_eq!(client.total_whitelisted(&Tier::Two), 1);
}

#[test]
fn enable_transfers_wrong_caller_no_mutation() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, owner) = make_deployed(&env);
    client.set_sale_config(&owner, &START, &ASSET_FACTOR, &ASSET_FACTOR);
    env.ledger()
        .with_mut(|li| li.timestamp = START + 3 * ONE_DAY_SECS);

    let attacker = Address::generate(&env);
    assert_eq!(
        client.try_enable_transfers(&attacker),
        Err(Ok(CrowdsaleError::NotAuthorized))
    );
    assert!(!client.transfers_enabled());
}

#[test]
fn owner_role_does_not_leak_to_other_accounts_while_locked() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, owner) = make_deployed(&env);
    let holder = Address::generate(&env);
    let other = Address::generate(&env);
    client.transfer(&owner, &holder, &1_000);

    assert_eq!(
        client.try_transfer(&holder, &other, &1),
        Err(Ok(CrowdsaleError::TransfersLocked))
    );
    assert_eq!(client.balance_of(&holder), 1_000);
}

#[test]
fn contributions_need_a_deployed_sale() {
    let env = Env::default();
    env.mock_all_auths();
    let id = env.register_contract(None, BoltCrowdsale);
    let client = BoltCrowdsaleClient::new(&env, &id);
    let contributor = Address::generate(&env);
    assert_eq!(
        client.try_mint_tokens(
            &contributor,
            &ContributionAsset::Secondary,
            &ASSET_FACTOR,
            &BytesN::from_array(&env, &[1u8; 32])
        ),
        Err(Ok(CrowdsaleError::NotDeployed))
    );
}
