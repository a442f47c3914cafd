//! Overflow-safe arithmetic helpers for share and value amounts.
//!
//! Every helper uses checked arithmetic and reports overflow as an error
//! instead of wrapping, so callers can propagate with `?`.

use isao_errors::ContractError;
use soroban_sdk::{Env, U256};

/// Base units per whole share or whole native unit (18 decimals).
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// Checked `i128` addition.
#[inline]
pub fn add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::MalformedAmount)
}

/// Checked `i128` subtraction.
#[inline]
pub fn sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::MalformedAmount)
}

/// Checked `u64` addition for ledger timestamps.
#[inline]
pub fn add_secs(a: u64, b: u64) -> Result<u64, ContractError> {
    a.checked_add(b).ok_or(ContractError::InvalidSchedule)
}

/// `floor(a * b / c)` for non-negative `a`, `b` and positive `c`.
///
/// Splits `a` around `c` so the intermediate product is bounded by `c * b`
/// rather than `a * b`: `a*b/c = (a/c)*b + (a%c)*b/c`.
pub fn mul_div_floor(a: i128, b: i128, c: i128) -> Result<i128, ContractError> {
    if a < 0 || b < 0 || c <= 0 {
        return Err(ContractError::MalformedAmount);
    }
    let whole = (a / c)
        .checked_mul(b)
        .ok_or(ContractError::MalformedAmount)?;
    let part = (a % c)
        .checked_mul(b)
        .ok_or(ContractError::MalformedAmount)?
        / c;
    add(whole, part)
}

/// `floor(a * b / c)` computed through the host's 256-bit integers, for
/// operands whose product does not fit in `i128` (a paid value times a share
/// amount).
pub fn mul_div_floor_wide(e: &Env, a: i128, b: i128, c: i128) -> Result<i128, ContractError> {
    if a < 0 || b < 0 || c <= 0 {
        return Err(ContractError::MalformedAmount);
    }
    let product = U256::from_u128(e, a as u128).mul(&U256::from_u128(e, b as u128));
    product
        .div(&U256::from_u128(e, c as u128))
        .to_u128()
        .and_then(|q| i128::try_from(q).ok())
        .ok_or(ContractError::MalformedAmount)
}
