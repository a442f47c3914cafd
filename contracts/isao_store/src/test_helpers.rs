//! Shared test helpers for isao_store tests.
//! Deploys the store with a native value token and an entitlement asset.

#![cfg(test)]

use crate::math::SCALE;
use crate::types::{PriceTier, Stage, StoreConfig};
use crate::{IsaoStore, IsaoStoreClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{vec, Address, Env, Vec};

/// Native value minted to every investor.
pub const INVESTOR_MINT: i128 = 1_000 * SCALE;

/// Entitlement asset the admin deposits: the whole curve.
pub const ASSET_SUPPLY: i128 = 300 * SCALE;

pub const ONE_DAY: u64 = 86_400;

/// Stair curve used throughout: up to 5 share at 0.1, up to 15 at 0.2,
/// up to 300 at 0.5.
pub fn default_curve(e: &Env) -> Vec<PriceTier> {
    vec![
        e,
        PriceTier {
            limit: 5 * SCALE,
            cost: SCALE / 10,
        },
        PriceTier {
            limit: 15 * SCALE,
            cost: SCALE / 5,
        },
        PriceTier {
            limit: 300 * SCALE,
            cost: SCALE / 2,
        },
    ]
}

/// Config with minimal deposit 0.05, minimal fund size 0.1 and no schedule.
pub fn default_config(e: &Env, native_token: &Address) -> StoreConfig {
    StoreConfig {
        native_token: native_token.clone(),
        curve: default_curve(e),
        minimal_deposit: SCALE / 20,
        minimal_fund_size: SCALE / 10,
        raising_period: 0,
        distribution_period: 0,
    }
}

pub struct Harness<'a> {
    pub e: Env,
    pub client: IsaoStoreClient<'a>,
    pub store: Address,
    pub admin: Address,
    pub paybot: Address,
    pub native: Address,
    pub asset: Address,
}

/// Registers the store and both tokens without initializing the store.
pub fn deploy(e: &Env) -> Harness<'_> {
    e.mock_all_auths();

    let store = e.register(IsaoStore, ());
    let client = IsaoStoreClient::new(e, &store);
    let admin = Address::generate(e);
    let paybot = Address::generate(e);

    let issuer = Address::generate(e);
    let native = e
        .register_stellar_asset_contract_v2(issuer.clone())
        .address();
    let asset = e.register_stellar_asset_contract_v2(issuer).address();

    Harness {
        e: e.clone(),
        client,
        store,
        admin,
        paybot,
        native,
        asset,
    }
}

/// Initialized store with the default config, the asset configured and the
/// whole asset supply already in custody. Stage is `Default`.
pub fn setup(e: &Env) -> Harness<'_> {
    let placeholder = Address::generate(e);
    setup_with_config(e, default_config(e, &placeholder))
}

/// [`setup`] with a custom config; its `native_token` is replaced by the
/// freshly deployed one.
pub fn setup_with_config(e: &Env, config: StoreConfig) -> Harness<'_> {
    let h = deploy(e);
    let config = StoreConfig {
        native_token: h.native.clone(),
        ..config
    };
    h.client
        .initialize(&h.admin, &Some(h.paybot.clone()), &config);
    h.client.set_asset(&h.admin, &h.asset);

    StellarAssetClient::new(e, &h.asset).mint(&h.admin, &ASSET_SUPPLY);
    let expiry = e.ledger().sequence().saturating_add(10_000);
    TokenClient::new(e, &h.asset).approve(&h.admin, &h.store, &ASSET_SUPPLY, &expiry);
    h.client.accept_asset(&h.admin, &ASSET_SUPPLY);
    h
}

/// Same as [`setup`] but already `Raising`.
pub fn setup_raising(e: &Env) -> Harness<'_> {
    let h = setup(e);
    h.client.set_stage(&h.admin, &Stage::Raising);
    h
}

impl<'a> Harness<'a> {
    /// Fresh address holding [`INVESTOR_MINT`] native value.
    pub fn investor(&self) -> Address {
        let investor = Address::generate(&self.e);
        StellarAssetClient::new(&self.e, &self.native).mint(&investor, &INVESTOR_MINT);
        investor
    }

    pub fn native_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.e, &self.native).balance(who)
    }

    pub fn asset_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.e, &self.asset).balance(who)
    }

    pub fn set_stage(&self, stage: Stage) {
        self.client.set_stage(&self.admin, &stage);
    }

    pub fn set_time(&self, timestamp: u64) {
        self.e.ledger().with_mut(|li| li.timestamp = timestamp);
    }

    /// `Σ balance_of(p)` over `participants`.
    pub fn sum_of(&self, participants: &[&Address]) -> i128 {
        participants
            .iter()
            .map(|p| self.client.balance_of(p))
            .sum()
    }
}
