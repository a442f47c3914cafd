//! Role-based access control.
//!
//! Roles are bits in a per-address mask so one address may be both Admin and
//! Paybot. Checks authenticate the caller first, then test the mask.

use isao_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::events;
use crate::types::{DataKey, Role};

fn roles_of(e: &Env, who: &Address) -> u32 {
    e.storage()
        .persistent()
        .get(&DataKey::Roles(who.clone()))
        .unwrap_or(0)
}

fn set_roles(e: &Env, who: &Address, mask: u32) {
    let key = DataKey::Roles(who.clone());
    if mask == 0 {
        e.storage().persistent().remove(&key);
    } else {
        e.storage().persistent().set(&key, &mask);
    }
}

pub fn has_role(e: &Env, who: &Address, role: Role) -> bool {
    roles_of(e, who) & role.bit() != 0
}

/// Authenticates `who` and requires it to hold `role`.
pub fn require_role(e: &Env, who: &Address, role: Role) -> Result<(), ContractError> {
    who.require_auth();
    if !has_role(e, who, role) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Authenticates `who` and requires it to hold at least one of `roles`.
pub fn require_any_role(e: &Env, who: &Address, roles: &[Role]) -> Result<(), ContractError> {
    who.require_auth();
    let mask = roles_of(e, who);
    if roles.iter().any(|role| mask & role.bit() != 0) {
        Ok(())
    } else {
        Err(ContractError::Unauthorized)
    }
}

/// Adds `role` to `who` without an authorization check. Used at
/// initialization and behind `grant_role`.
pub fn assign_role(e: &Env, who: &Address, role: Role) {
    let mask = roles_of(e, who);
    if mask & role.bit() == 0 {
        set_roles(e, who, mask | role.bit());
    }
}

pub fn grant_role(
    e: &Env,
    admin: &Address,
    who: &Address,
    role: Role,
) -> Result<(), ContractError> {
    require_role(e, admin, Role::Admin)?;
    assign_role(e, who, role);
    events::emit_role_granted(e, who, role);
    Ok(())
}

/// Removes `role` from `who`. An admin cannot drop its own Admin bit so the
/// store never loses its last admin by accident.
pub fn revoke_role(
    e: &Env,
    admin: &Address,
    who: &Address,
    role: Role,
) -> Result<(), ContractError> {
    require_role(e, admin, Role::Admin)?;
    if admin == who && role == Role::Admin {
        return Err(ContractError::Unauthorized);
    }
    let mask = roles_of(e, who);
    set_roles(e, who, mask & !role.bit());
    events::emit_role_revoked(e, who, role);
    Ok(())
}
