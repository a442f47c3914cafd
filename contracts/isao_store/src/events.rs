use soroban_sdk::{Address, Env, Symbol, Val, Vec};

use crate::types::{PriceTier, Role, Stage};

/// Emitted once by `initialize`.
///
/// # Topics
/// * `Symbol` - "initialized"
/// * `Address` - The initial admin
///
/// # Data
/// * `Option<Address>` - The initial paybot, if any
/// * `Address` - The native value token
pub fn emit_initialized(e: &Env, admin: &Address, paybot: &Option<Address>, native: &Address) {
    let topics = (Symbol::new(e, "initialized"), admin.clone());
    let data = (paybot.clone(), native.clone());
    e.events().publish(topics, data);
}

/// Emitted once by `initialize` with the configured price curve.
///
/// # Topics
/// * `Symbol` - "cost_stairs"
///
/// # Data
/// * `Vec<PriceTier>` - Tiers in ascending limit order
pub fn emit_cost_stairs(e: &Env, curve: &Vec<PriceTier>) {
    let topics = (Symbol::new(e, "cost_stairs"),);
    e.events().publish(topics, curve.clone());
}

/// Emitted on every stage move, scheduled or forced.
///
/// # Topics
/// * `Symbol` - "stage_changed"
///
/// # Data
/// * `Stage` - Previous stage
/// * `Stage` - New stage
/// * `Symbol` - "schedule", "admin" (forward move) or "override"
pub fn emit_stage_changed(e: &Env, from: Stage, to: Stage, cause: Symbol) {
    let topics = (Symbol::new(e, "stage_changed"),);
    e.events().publish(topics, (from, to, cause));
}

pub fn emit_asset_set(e: &Env, asset: &Address) {
    let topics = (Symbol::new(e, "asset_set"), asset.clone());
    e.events().publish(topics, ());
}

/// Emitted when the admin deposits entitlement asset into custody.
///
/// # Topics
/// * `Symbol` - "asset_accepted"
/// * `Address` - The depositing admin
///
/// # Data
/// * `i128` - Amount accepted
/// * `i128` - Asset custody after the deposit
pub fn emit_asset_accepted(e: &Env, from: &Address, amount: i128, custody: i128) {
    let topics = (Symbol::new(e, "asset_accepted"), from.clone());
    e.events().publish(topics, (amount, custody));
}

/// Emitted when value is converted into share.
///
/// # Topics
/// * `Symbol` - "share_purchased"
/// * `Address` - The buyer
///
/// # Data
/// * `i128` - Value spent
/// * `i128` - Share granted
/// * `i128` - Total share outstanding afterwards
pub fn emit_share_purchased(e: &Env, buyer: &Address, spent: i128, granted: i128, total: i128) {
    let topics = (Symbol::new(e, "share_purchased"), buyer.clone());
    e.events().publish(topics, (spent, granted, total));
}

/// Emitted when share is exchanged for the entitlement asset.
///
/// # Topics
/// * `Symbol` - "share_released"
/// * `Address` - The participant
///
/// # Data
/// * `i128` - Share burned (equal to the asset paid out)
/// * `bool` - Whether a privileged caller forced the release
pub fn emit_share_released(e: &Env, participant: &Address, amount: i128, forced: bool) {
    let topics = (Symbol::new(e, "share_released"), participant.clone());
    e.events().publish(topics, (amount, forced));
}

/// Emitted when share is exchanged back for native value.
///
/// # Topics
/// * `Symbol` - "share_refunded"
/// * `Address` - The participant
///
/// # Data
/// * `i128` - Share burned
/// * `i128` - Value paid out
/// * `bool` - Whether a privileged caller forced the refund
pub fn emit_share_refunded(e: &Env, participant: &Address, amount: i128, value: i128, forced: bool) {
    let topics = (Symbol::new(e, "share_refunded"), participant.clone());
    e.events().publish(topics, (amount, value, forced));
}

pub fn emit_stakeholder_paid(e: &Env, stakeholder: &Address, caller: &Address, amount: i128) {
    let topics = (Symbol::new(e, "stakeholder_paid"), stakeholder.clone());
    e.events().publish(topics, (caller.clone(), amount));
}

/// Emitted by the escape hatch.
///
/// # Topics
/// * `Symbol` - "call_forwarded"
/// * `Address` - The target
///
/// # Data
/// * `i128` - Native value sent along
/// * `Option<Symbol>` - Invoked function, if any
/// * `Val` - Return value of the call (void without a function)
pub fn emit_call_forwarded(
    e: &Env,
    target: &Address,
    value: i128,
    func: &Option<Symbol>,
    result: Val,
) {
    let topics = (Symbol::new(e, "call_forwarded"), target.clone());
    e.events().publish(topics, (value, func.clone(), result));
}

pub fn emit_role_granted(e: &Env, who: &Address, role: Role) {
    let topics = (Symbol::new(e, "role_granted"), who.clone());
    e.events().publish(topics, role);
}

pub fn emit_role_revoked(e: &Env, who: &Address, role: Role) {
    let topics = (Symbol::new(e, "role_revoked"), who.clone());
    e.events().publish(topics, role);
}
