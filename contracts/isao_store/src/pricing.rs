//! Stair-step pricing engine.
//!
//! Converts native value into share (purchases) and share back into native
//! value (refunds) against a cumulative price curve. Each tier covers the
//! share sold between the previous tier's `limit` and its own; its `cost` is
//! the price of one whole share (`SCALE` base units) inside that band.
//!
//! All divisions truncate. The buyer never receives a rounded-up share and
//! a refund never pays a rounded-up value.

use isao_errors::ContractError;
use soroban_sdk::Vec;

use crate::math::{self, SCALE};
use crate::types::{PriceTier, Purchase};

/// Checks that the curve is non-empty, strictly increasing in `limit`, and
/// non-decreasing in positive `cost`.
pub fn validate_curve(curve: &Vec<PriceTier>) -> Result<(), ContractError> {
    if curve.is_empty() {
        return Err(ContractError::InvalidCurve);
    }
    let mut prev_limit = 0_i128;
    let mut prev_cost = 0_i128;
    for tier in curve.iter() {
        if tier.limit <= prev_limit || tier.cost <= 0 || tier.cost < prev_cost {
            return Err(ContractError::InvalidCurve);
        }
        prev_limit = tier.limit;
        prev_cost = tier.cost;
    }
    Ok(())
}

/// Largest total share the curve can ever hand out.
pub fn max_limit(curve: &Vec<PriceTier>) -> i128 {
    curve.last().map(|tier| tier.limit).unwrap_or(0)
}

/// Converts `value` into share when `total` share is already sold.
///
/// Walks the tiers from the one containing `total`. A tier that cannot absorb
/// the whole remaining value is sold out at its cost and the walk moves on.
/// Value left once every tier is sold out comes back as `change`.
pub fn value_to_share(
    curve: &Vec<PriceTier>,
    value: i128,
    total: i128,
) -> Result<Purchase, ContractError> {
    if value < 0 || total < 0 {
        return Err(ContractError::MalformedAmount);
    }

    let mut remaining = value;
    let mut sold = total;
    let mut granted = 0_i128;

    for tier in curve.iter() {
        if remaining == 0 {
            break;
        }
        if sold >= tier.limit {
            continue;
        }
        let capacity = tier.limit - sold;
        let obtainable = math::mul_div_floor(remaining, SCALE, tier.cost)?;
        if obtainable <= capacity {
            granted = math::add(granted, obtainable)?;
            remaining = 0;
            break;
        }
        let tier_price = math::mul_div_floor(capacity, tier.cost, SCALE)?;
        remaining = math::sub(remaining, tier_price)?;
        granted = math::add(granted, capacity)?;
        sold = tier.limit;
    }

    Ok(Purchase {
        granted,
        spent: value - remaining,
        change: remaining,
    })
}

/// Prices `amount` share being handed back while `total` share is sold.
///
/// Walks the tiers downward from `total`, charging each slice of `amount` at
/// the cost of the tier it was sold in. Refunding the exact share a purchase
/// granted, right after it, returns that purchase's value up to one base unit
/// of truncation per tier crossed.
pub fn share_to_value(
    curve: &Vec<PriceTier>,
    amount: i128,
    total: i128,
) -> Result<i128, ContractError> {
    if amount < 0 || total < 0 {
        return Err(ContractError::MalformedAmount);
    }
    if amount > total {
        return Err(ContractError::InsufficientBalance);
    }

    let mut remaining = amount;
    let mut top = total;
    let mut value = 0_i128;

    for i in (0..curve.len()).rev() {
        if remaining == 0 {
            break;
        }
        let tier = curve.get(i).ok_or(ContractError::InvalidCurve)?;
        let floor = match i {
            0 => 0,
            _ => curve.get(i - 1).ok_or(ContractError::InvalidCurve)?.limit,
        };
        let ceiling = if top < tier.limit { top } else { tier.limit };
        if ceiling <= floor {
            continue;
        }
        let band = ceiling - floor;
        let slice = if remaining < band { remaining } else { band };
        value = math::add(value, math::mul_div_floor(slice, tier.cost, SCALE)?)?;
        remaining -= slice;
        top = ceiling - slice;
    }

    if remaining > 0 {
        // Share beyond the last tier was never sold.
        return Err(ContractError::InsufficientBalance);
    }
    Ok(value)
}
