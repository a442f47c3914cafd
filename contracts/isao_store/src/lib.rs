//! ISAO share store.
//!
//! A fund-raising escrow: participants pay native value during `Raising` and
//! receive share priced on a stair-step curve. Depending on how the raise
//! ends, share is later released one-for-one as the entitlement asset
//! (`TokenDistribution`) or refunded as native value (`MoneyBack`).
//!
//! Every state-changing entry point runs access control, then the lifecycle
//! guard, then pricing, then the ledger, and only then moves tokens.

#![no_std]

use isao_errors::ContractError;
use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Val, Vec};

pub mod access_control;
pub mod config;
pub mod events;
pub mod ledger;
pub mod lifecycle;
pub mod math;
pub mod pricing;
pub mod settlement;
pub mod types;

pub use isao_errors;
pub use types::{PriceTier, Purchase, Receipt, Role, Stage, StoreConfig};

use lifecycle::Operation;

#[contract]
pub struct IsaoStore;

#[contractimpl]
impl IsaoStore {
    /// One-time setup. `admin` receives the Admin role and `paybot`, when
    /// given, the Paybot role. The store starts in `Default`.
    pub fn initialize(
        e: Env,
        admin: Address,
        paybot: Option<Address>,
        config: StoreConfig,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        if config::is_initialized(&e) {
            return Err(ContractError::AlreadyInitialized);
        }
        pricing::validate_curve(&config.curve)?;
        if config.minimal_deposit < 0 || config.minimal_fund_size < 0 {
            return Err(ContractError::MalformedAmount);
        }
        if config.minimal_fund_size > pricing::max_limit(&config.curve) {
            return Err(ContractError::InvalidCurve);
        }
        lifecycle::check_periods(&e, config.raising_period, config.distribution_period)?;

        config::save(&e, &config);
        access_control::assign_role(&e, &admin, Role::Admin);
        if let Some(paybot) = &paybot {
            access_control::assign_role(&e, paybot, Role::Paybot);
        }

        events::emit_initialized(&e, &admin, &paybot, &config.native_token);
        events::emit_cost_stairs(&e, &config.curve);
        Ok(())
    }

    // ─── Configuration ────────────────────────────────────────────────────

    /// Sets the entitlement asset. Repeating the same address is a no-op.
    pub fn set_asset(e: Env, admin: Address, asset: Address) -> Result<(), ContractError> {
        access_control::require_role(&e, &admin, Role::Admin)?;
        config::load(&e)?;
        if config::set_asset(&e, &asset)? {
            events::emit_asset_set(&e, &asset);
        }
        Ok(())
    }

    /// Pulls `amount` of the entitlement asset from `admin` into custody.
    /// `admin` must have approved the store beforehand.
    pub fn accept_asset(e: Env, admin: Address, amount: i128) -> Result<i128, ContractError> {
        access_control::require_role(&e, &admin, Role::Admin)?;
        config::load(&e)?;
        lifecycle::sync(&e)?;
        settlement::accept_asset(&e, &admin, amount)?;
        let custody = settlement::custody_asset(&e);
        events::emit_asset_accepted(&e, &admin, amount, custody);
        Ok(custody)
    }

    /// Replaces the schedule periods. Zero in either disables the schedule.
    pub fn set_periods(
        e: Env,
        admin: Address,
        raising_period: u64,
        distribution_period: u64,
    ) -> Result<(), ContractError> {
        access_control::require_role(&e, &admin, Role::Admin)?;
        let mut config = config::load(&e)?;
        lifecycle::sync(&e)?;
        lifecycle::check_periods(&e, raising_period, distribution_period)?;
        config.raising_period = raising_period;
        config.distribution_period = distribution_period;
        config::save(&e, &config);
        Ok(())
    }

    // ─── Lifecycle ────────────────────────────────────────────────────────

    /// Forces the stage. Returns `false` when the store already was there.
    pub fn set_stage(e: Env, admin: Address, stage: Stage) -> Result<bool, ContractError> {
        access_control::require_role(&e, &admin, Role::Admin)?;
        lifecycle::set_stage(&e, stage)
    }

    /// Applies any scheduled move that is due. Anyone may call it.
    pub fn advance_stage(e: Env) -> Result<Stage, ContractError> {
        lifecycle::sync(&e)
    }

    // ─── Value receipt ────────────────────────────────────────────────────

    /// Value sent to the store. Buys share while raising; in
    /// `TokenDistribution` it releases the sender's whole share and in
    /// `MoneyBack` it refunds it, whatever `amount` is.
    pub fn receive(e: Env, from: Address, amount: i128) -> Result<Receipt, ContractError> {
        from.require_auth();
        Self::dispatch_receipt(&e, &from, amount, true)
    }

    /// Explicit purchase. Fails with `InvalidStage` outside `Raising`.
    pub fn buy_share(e: Env, from: Address, amount: i128) -> Result<Purchase, ContractError> {
        from.require_auth();
        match Self::dispatch_receipt(&e, &from, amount, false)? {
            Receipt::Purchased(purchase) => Ok(purchase),
            _ => Err(ContractError::InvalidStage),
        }
    }

    // ─── Release ──────────────────────────────────────────────────────────

    /// Exchanges `amount` of the caller's share for the entitlement asset.
    /// Returns the remaining share.
    pub fn release_share(
        e: Env,
        participant: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        participant.require_auth();
        lifecycle::require(&e, Operation::Release)?;
        Self::release(&e, &participant, amount, false)
    }

    pub fn release_share_force(
        e: Env,
        admin: Address,
        participant: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        access_control::require_role(&e, &admin, Role::Admin)?;
        lifecycle::require(&e, Operation::ReleaseForced)?;
        Self::release(&e, &participant, amount, true)
    }

    // ─── Refund ───────────────────────────────────────────────────────────

    /// Hands `amount` of the caller's share back for native value. The caller
    /// gets the same fraction of what they paid as the fraction of their
    /// share they hand back. Returns the value paid out.
    pub fn refund_share(e: Env, participant: Address, amount: i128) -> Result<i128, ContractError> {
        participant.require_auth();
        lifecycle::require(&e, Operation::Refund)?;
        Self::refund(&e, &participant, amount, false)
    }

    pub fn refund_share_force(
        e: Env,
        admin: Address,
        participant: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        access_control::require_role(&e, &admin, Role::Admin)?;
        lifecycle::require(&e, Operation::RefundForced)?;
        Self::refund(&e, &participant, amount, true)
    }

    // ─── Stakeholder ──────────────────────────────────────────────────────

    /// Sends raised value to a stakeholder. `caller` needs Admin or Paybot;
    /// `stakeholder` must hold Admin.
    pub fn release_value_to_stakeholder(
        e: Env,
        caller: Address,
        stakeholder: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        access_control::require_any_role(&e, &caller, &[Role::Admin, Role::Paybot])?;
        if !access_control::has_role(&e, &stakeholder, Role::Admin) {
            return Err(ContractError::Unauthorized);
        }
        lifecycle::require(&e, Operation::StakeholderSweep)?;
        if amount <= 0 {
            return Err(ContractError::MalformedAmount);
        }
        settlement::release_value(&e, &stakeholder, amount)?;
        events::emit_stakeholder_paid(&e, &stakeholder, &caller, amount);
        Ok(())
    }

    /// Escape hatch for the deprecated fund. Sends `value` native units to
    /// `target` and, when `func` is given, calls it with `args`.
    pub fn forward_call(
        e: Env,
        admin: Address,
        target: Address,
        value: i128,
        func: Option<Symbol>,
        args: Vec<Val>,
    ) -> Result<Val, ContractError> {
        access_control::require_role(&e, &admin, Role::Admin)?;
        let terminal = lifecycle::terminal(&e)?;
        let result = settlement::forward_call(&terminal, &target, value, func.clone(), args)?;
        events::emit_call_forwarded(&e, &target, value, &func, result);
        Ok(result)
    }

    // ─── Roles ────────────────────────────────────────────────────────────

    pub fn grant_role(
        e: Env,
        admin: Address,
        who: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        config::load(&e)?;
        access_control::grant_role(&e, &admin, &who, role)
    }

    pub fn revoke_role(
        e: Env,
        admin: Address,
        who: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        config::load(&e)?;
        access_control::revoke_role(&e, &admin, &who, role)
    }

    pub fn has_role(e: Env, who: Address, role: Role) -> bool {
        access_control::has_role(&e, &who, role)
    }

    // ─── Queries ──────────────────────────────────────────────────────────

    pub fn balance_of(e: Env, participant: Address) -> i128 {
        ledger::balance_of(&e, &participant)
    }

    /// Native value backing `participant`'s remaining share.
    pub fn paid_of(e: Env, participant: Address) -> i128 {
        ledger::paid_of(&e, &participant)
    }

    pub fn total_share(e: Env) -> i128 {
        ledger::total_outstanding(&e)
    }

    /// Effective stage, including scheduled moves not yet written.
    pub fn stage(e: Env) -> Result<Stage, ContractError> {
        lifecycle::current(&e)
    }

    pub fn config(e: Env) -> Result<StoreConfig, ContractError> {
        config::load(&e)
    }

    pub fn price_curve(e: Env) -> Result<Vec<PriceTier>, ContractError> {
        Ok(config::load(&e)?.curve)
    }

    pub fn asset(e: Env) -> Option<Address> {
        config::asset(&e)
    }

    pub fn launched_at(e: Env) -> Option<u64> {
        lifecycle::launched_at(&e)
    }

    pub fn custody_value(e: Env) -> Result<i128, ContractError> {
        settlement::custody_value(&e)
    }

    pub fn custody_asset(e: Env) -> i128 {
        settlement::custody_asset(&e)
    }

    /// What `value` would buy at the current total.
    pub fn quote_purchase(e: Env, value: i128) -> Result<Purchase, ContractError> {
        let config = config::load(&e)?;
        pricing::value_to_share(&config.curve, value, ledger::total_outstanding(&e))
    }

    /// Curve value of the top `amount` share at the current total. Refunds
    /// pay from each participant's own paid value instead.
    pub fn quote_refund(e: Env, amount: i128) -> Result<i128, ContractError> {
        let config = config::load(&e)?;
        pricing::share_to_value(&config.curve, amount, ledger::total_outstanding(&e))
    }
}

impl IsaoStore {
    /// Stage dispatch shared by `receive` and `buy_share`. Trigger arms are
    /// only taken when `triggers` is set; the trigger amount is never pulled.
    fn dispatch_receipt(
        e: &Env,
        from: &Address,
        amount: i128,
        triggers: bool,
    ) -> Result<Receipt, ContractError> {
        if amount < 0 {
            return Err(ContractError::MalformedAmount);
        }
        let stage = lifecycle::sync(e)?;
        match stage {
            Stage::Raising => {
                lifecycle::require(e, Operation::Purchase)?;
                Self::purchase(e, from, amount).map(Receipt::Purchased)
            }
            Stage::TokenDistribution if triggers => {
                lifecycle::require(e, Operation::Release)?;
                let whole = Self::whole_balance(e, from)?;
                Self::release(e, from, whole, false)?;
                Ok(Receipt::Released(whole))
            }
            Stage::MoneyBack if triggers => {
                lifecycle::require(e, Operation::Refund)?;
                let whole = Self::whole_balance(e, from)?;
                Self::refund(e, from, whole, false).map(Receipt::Refunded)
            }
            _ => Err(ContractError::InvalidStage),
        }
    }

    fn whole_balance(e: &Env, participant: &Address) -> Result<i128, ContractError> {
        match ledger::balance_of(e, participant) {
            0 => Err(ContractError::InsufficientBalance),
            balance => Ok(balance),
        }
    }

    fn purchase(e: &Env, buyer: &Address, value: i128) -> Result<Purchase, ContractError> {
        let config = config::load(e)?;
        if value <= 0 || value < config.minimal_deposit {
            return Err(ContractError::MalformedAmount);
        }
        let total = ledger::total_outstanding(e);
        if total >= pricing::max_limit(&config.curve) {
            return Err(ContractError::CurveExhausted);
        }
        let purchase = pricing::value_to_share(&config.curve, value, total)?;
        if purchase.granted == 0 {
            return Err(ContractError::MalformedAmount);
        }

        ledger::credit(e, buyer, purchase.granted, purchase.spent)?;
        settlement::pull_value(e, buyer, purchase.spent)?;

        events::emit_share_purchased(
            e,
            buyer,
            purchase.spent,
            purchase.granted,
            ledger::total_outstanding(e),
        );
        Ok(purchase)
    }

    fn release(
        e: &Env,
        participant: &Address,
        amount: i128,
        forced: bool,
    ) -> Result<i128, ContractError> {
        if amount <= 0 {
            return Err(ContractError::MalformedAmount);
        }
        let debit = ledger::debit(e, participant, amount)?;
        settlement::release_asset(e, participant, amount)?;
        events::emit_share_released(e, participant, amount, forced);
        Ok(debit.remaining)
    }

    fn refund(
        e: &Env,
        participant: &Address,
        amount: i128,
        forced: bool,
    ) -> Result<i128, ContractError> {
        if amount <= 0 {
            return Err(ContractError::MalformedAmount);
        }
        let value = ledger::debit(e, participant, amount)?.value;
        settlement::release_value(e, participant, value)?;
        events::emit_share_refunded(e, participant, amount, value, forced);
        Ok(value)
    }
}

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod test_release;
