//! Store configuration kept in instance storage.

use isao_errors::ContractError;
use soroban_sdk::{Address, Env};

use crate::types::{DataKey, StoreConfig};

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Config)
}

pub fn load(e: &Env) -> Result<StoreConfig, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn save(e: &Env, config: &StoreConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

/// Entitlement asset, if already configured.
pub fn asset(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Asset)
}

pub fn require_asset(e: &Env) -> Result<Address, ContractError> {
    asset(e).ok_or(ContractError::AssetNotConfigured)
}

/// Stores the entitlement asset once. Setting the same address again is a
/// no-op and returns `false`; a different address is rejected.
pub fn set_asset(e: &Env, asset: &Address) -> Result<bool, ContractError> {
    match self::asset(e) {
        Some(existing) if existing == *asset => Ok(false),
        Some(_) => Err(ContractError::AssetAlreadyConfigured),
        None => {
            e.storage().instance().set(&DataKey::Asset, asset);
            Ok(true)
        }
    }
}
