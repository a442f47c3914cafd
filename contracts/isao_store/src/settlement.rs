//! Token movement in and out of store custody.
//!
//! Outbound transfers run only after the ledger has been updated
//! (checks-effects-interactions). Balances and allowances are checked up
//! front so a short custody surfaces as a typed error instead of a token
//! contract trap; either way the whole invocation rolls back.

use isao_errors::ContractError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

use crate::config;
use crate::lifecycle::Terminal;

fn native_client(e: &Env) -> Result<TokenClient<'_>, ContractError> {
    let config = config::load(e)?;
    Ok(TokenClient::new(e, &config.native_token))
}

fn asset_client(e: &Env) -> Result<TokenClient<'_>, ContractError> {
    let asset = config::require_asset(e)?;
    Ok(TokenClient::new(e, &asset))
}

fn transfer_out(
    e: &Env,
    client: &TokenClient,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::MalformedAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let contract = e.current_contract_address();
    if client.balance(&contract) < amount {
        return Err(ContractError::InsufficientBalance);
    }
    client.transfer(&contract, to, &amount);
    Ok(())
}

/// Native value held by the store.
pub fn custody_value(e: &Env) -> Result<i128, ContractError> {
    Ok(native_client(e)?.balance(&e.current_contract_address()))
}

/// Entitlement asset held by the store (0 until the asset is configured).
pub fn custody_asset(e: &Env) -> i128 {
    match config::asset(e) {
        Some(asset) => TokenClient::new(e, &asset).balance(&e.current_contract_address()),
        None => 0,
    }
}

/// Takes `amount` native value from `from` into custody.
pub fn pull_value(e: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::MalformedAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let client = native_client(e)?;
    if client.balance(from) < amount {
        return Err(ContractError::InsufficientBalance);
    }
    client.transfer(from, &e.current_contract_address(), &amount);
    Ok(())
}

pub fn release_value(e: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    let client = native_client(e)?;
    transfer_out(e, &client, to, amount)
}

pub fn release_asset(e: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    let client = asset_client(e)?;
    transfer_out(e, &client, to, amount)
}

/// Pulls `amount` of the entitlement asset from `from`, which must have
/// approved the store as spender beforehand.
pub fn accept_asset(e: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::MalformedAmount);
    }
    let client = asset_client(e)?;
    let contract = e.current_contract_address();
    if client.allowance(from, &contract) < amount {
        return Err(ContractError::AllowanceExceeded);
    }
    if client.balance(from) < amount {
        return Err(ContractError::InsufficientBalance);
    }
    client.transfer_from(&contract, from, &contract, &amount);
    Ok(())
}

/// Escape hatch: sends `value` native units to `target`, then, when `func`
/// is given, invokes it on `target` with `args` as the store.
pub fn forward_call(
    terminal: &Terminal,
    target: &Address,
    value: i128,
    func: Option<Symbol>,
    args: Vec<Val>,
) -> Result<Val, ContractError> {
    let e = terminal.env();
    release_value(e, target, value)?;
    match func {
        Some(func) => Ok(e.invoke_contract::<Val>(target, &func, args)),
        None => Ok(().into_val(e)),
    }
}
