//! Releasing share as the entitlement asset during token distribution.

#![cfg(test)]

use crate::math::SCALE;
use crate::test_helpers::{default_config, deploy, setup_raising, Harness, INVESTOR_MINT};
use crate::types::{Receipt, Stage};
use isao_errors::ContractError;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

/// Two investors holding 7.5 and 5 share, store in `TokenDistribution`.
fn distributing(e: &Env) -> (Harness<'_>, Address, Address) {
    let h = setup_raising(e);
    let a = h.investor();
    let b = h.investor();
    h.client.buy_share(&a, &SCALE);
    h.client.buy_share(&b, &SCALE);
    h.set_stage(Stage::TokenDistribution);
    (h, a, b)
}

#[test]
fn test_release_share_pays_asset_one_for_one() {
    let e = Env::default();
    let (h, a, b) = distributing(&e);
    let custody = h.client.custody_asset();

    let remaining = h.client.release_share(&a, &(5 * SCALE));
    assert_eq!(remaining, 25 * SCALE / 10);
    assert_eq!(h.asset_balance(&a), 5 * SCALE);
    assert_eq!(h.client.custody_asset(), custody - 5 * SCALE);
    assert_eq!(h.client.total_share(), 75 * SCALE / 10);
    assert_eq!(h.sum_of(&[&a, &b]), h.client.total_share());
}

#[test]
fn test_receive_releases_whole_balance() {
    let e = Env::default();
    let (h, a, _) = distributing(&e);
    let native_before = h.native_balance(&a);

    let receipt = h.client.receive(&a, &0);
    assert_eq!(receipt, Receipt::Released(75 * SCALE / 10));
    assert_eq!(h.client.balance_of(&a), 0);
    assert_eq!(h.asset_balance(&a), 75 * SCALE / 10);

    assert_eq!(
        h.client.try_receive(&a, &SCALE),
        Err(Ok(ContractError::InsufficientBalance))
    );
    assert_eq!(h.native_balance(&a), native_before);
}

#[test]
fn test_receive_nudge_ignores_amount() {
    let e = Env::default();
    let (h, _, b) = distributing(&e);
    let native_before = h.native_balance(&b);

    let receipt = h.client.receive(&b, &(3 * SCALE));
    assert_eq!(receipt, Receipt::Released(5 * SCALE));
    assert_eq!(h.native_balance(&b), native_before);
}

#[test]
fn test_receive_with_nothing_to_release() {
    let e = Env::default();
    let (h, _, _) = distributing(&e);
    let outsider = h.investor();
    assert_eq!(
        h.client.try_receive(&outsider, &SCALE),
        Err(Ok(ContractError::InsufficientBalance))
    );
    assert_eq!(h.native_balance(&outsider), INVESTOR_MINT);
}

#[test]
fn test_buy_share_is_not_a_trigger() {
    let e = Env::default();
    let (h, a, _) = distributing(&e);
    assert_eq!(
        h.client.try_buy_share(&a, &SCALE),
        Err(Ok(ContractError::InvalidStage))
    );
    assert_eq!(h.client.balance_of(&a), 75 * SCALE / 10);
}

#[test]
fn test_overdraft_release() {
    let e = Env::default();
    let (h, a, _) = distributing(&e);
    assert_eq!(
        h.client.try_release_share(&a, &(8 * SCALE)),
        Err(Ok(ContractError::InsufficientBalance))
    );
    assert_eq!(
        h.client.try_release_share(&a, &i128::MAX),
        Err(Ok(ContractError::InsufficientBalance))
    );
    assert_eq!(
        h.client.try_release_share(&a, &0),
        Err(Ok(ContractError::MalformedAmount))
    );
    assert_eq!(h.client.balance_of(&a), 75 * SCALE / 10);
    assert_eq!(h.asset_balance(&a), 0);
}

#[test]
fn test_forced_release() {
    let e = Env::default();
    let (h, a, _) = distributing(&e);

    let remaining = h.client.release_share_force(&h.admin, &a, &(75 * SCALE / 10));
    assert_eq!(remaining, 0);
    assert_eq!(h.asset_balance(&a), 75 * SCALE / 10);
}

#[test]
fn test_forced_release_requires_admin() {
    let e = Env::default();
    let (h, a, b) = distributing(&e);
    assert_eq!(
        h.client.try_release_share_force(&b, &a, &SCALE),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        h.client.try_release_share_force(&h.paybot, &a, &SCALE),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(h.client.balance_of(&a), 75 * SCALE / 10);
}

#[test]
fn test_release_rejected_outside_distribution() {
    let e = Env::default();
    let (h, a, _) = distributing(&e);
    for stage in [Stage::Raising, Stage::MoneyBack, Stage::FundDeprecated] {
        h.set_stage(stage);
        assert_eq!(
            h.client.try_release_share(&a, &SCALE),
            Err(Ok(ContractError::InvalidStage))
        );
        assert_eq!(
            h.client.try_release_share_force(&h.admin, &a, &SCALE),
            Err(Ok(ContractError::InvalidStage))
        );
    }
}

#[test]
fn test_short_custody_rolls_back_debit() {
    let e = Env::default();
    let h = deploy(&e);
    h.client
        .initialize(&h.admin, &None, &default_config(&e, &h.native));
    h.client.set_asset(&h.admin, &h.asset);
    StellarAssetClient::new(&e, &h.asset).mint(&h.admin, &SCALE);
    let expiry = e.ledger().sequence().saturating_add(10_000);
    TokenClient::new(&e, &h.asset).approve(&h.admin, &h.store, &SCALE, &expiry);
    h.client.accept_asset(&h.admin, &SCALE);

    h.set_stage(Stage::Raising);
    let investor = h.investor();
    h.client.buy_share(&investor, &SCALE);
    h.set_stage(Stage::TokenDistribution);

    assert_eq!(
        h.client.try_release_share(&investor, &(2 * SCALE)),
        Err(Ok(ContractError::InsufficientBalance))
    );
    assert_eq!(h.client.balance_of(&investor), 75 * SCALE / 10);
    assert_eq!(h.client.total_share(), 75 * SCALE / 10);

    assert_eq!(h.client.release_share(&investor, &SCALE), 65 * SCALE / 10);
}

#[test]
fn test_release_needs_configured_asset() {
    let e = Env::default();
    let h = deploy(&e);
    h.client
        .initialize(&h.admin, &None, &default_config(&e, &h.native));
    h.set_stage(Stage::Raising);
    let investor = h.investor();
    h.client.buy_share(&investor, &SCALE);
    h.set_stage(Stage::TokenDistribution);

    assert_eq!(
        h.client.try_release_share(&investor, &SCALE),
        Err(Ok(ContractError::AssetNotConfigured))
    );
    assert_eq!(h.client.custody_asset(), 0);
}
