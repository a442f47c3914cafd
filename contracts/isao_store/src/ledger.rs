//! Per-participant share ledger.
//!
//! The only writer of `DataKey::Share`, `DataKey::Paid` and
//! `DataKey::TotalShare`. Every mutation updates them together so
//! `TotalShare` always equals the sum of every participant's share, and each
//! participant's `Paid` is the native value still backing their share.

use isao_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::math;
use crate::types::DataKey;

/// Outcome of a debit: the share left and the paid value that went with the
/// debited share.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Debit {
    pub remaining: i128,
    pub value: i128,
}

pub fn balance_of(e: &Env, participant: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&DataKey::Share(participant.clone()))
        .unwrap_or(0)
}

/// Native value `participant` paid for the share they still hold.
pub fn paid_of(e: &Env, participant: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&DataKey::Paid(participant.clone()))
        .unwrap_or(0)
}

pub fn total_outstanding(e: &Env) -> i128 {
    e.storage().instance().get(&DataKey::TotalShare).unwrap_or(0)
}

/// Adds `amount` share bought for `value` to `participant` and to the total.
/// Returns the new balance.
pub fn credit(
    e: &Env,
    participant: &Address,
    amount: i128,
    value: i128,
) -> Result<i128, ContractError> {
    if amount < 0 || value < 0 {
        return Err(ContractError::MalformedAmount);
    }
    let balance = math::add(balance_of(e, participant), amount)?;
    let paid = math::add(paid_of(e, participant), value)?;
    let total = math::add(total_outstanding(e), amount)?;
    write(e, participant, balance, paid, total);
    Ok(balance)
}

/// Removes `amount` from `participant` and from the total, together with the
/// matching slice of their paid value. Fails without touching storage when
/// `amount` exceeds the balance.
///
/// The slice is `paid * amount / balance` rounded down; debiting the whole
/// balance takes whatever paid value is left, so nothing is stranded.
pub fn debit(e: &Env, participant: &Address, amount: i128) -> Result<Debit, ContractError> {
    if amount < 0 {
        return Err(ContractError::MalformedAmount);
    }
    let balance = balance_of(e, participant);
    if amount > balance {
        return Err(ContractError::InsufficientBalance);
    }
    let paid = paid_of(e, participant);
    let value = if amount == balance {
        paid
    } else {
        math::mul_div_floor_wide(e, paid, amount, balance)?
    };

    let remaining = balance
        .checked_sub(amount)
        .ok_or(ContractError::InsufficientBalance)?;
    let total = total_outstanding(e)
        .checked_sub(amount)
        .filter(|t| *t >= 0)
        .ok_or(ContractError::InsufficientBalance)?;
    write(e, participant, remaining, math::sub(paid, value)?, total);
    Ok(Debit { remaining, value })
}

fn write(e: &Env, participant: &Address, balance: i128, paid: i128, total: i128) {
    let persistent = e.storage().persistent();
    persistent.set(&DataKey::Share(participant.clone()), &balance);
    persistent.set(&DataKey::Paid(participant.clone()), &paid);
    e.storage().instance().set(&DataKey::TotalShare, &total);
}
