#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by the store component that raises them.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and configuration errors (codes 1-99).
    Initialization,
    /// Caller identity and role errors (codes 100-199).
    Authorization,
    /// Lifecycle stage errors (codes 200-299).
    Lifecycle,
    /// Share ledger errors (codes 300-399).
    Ledger,
    /// Token custody and transfer errors (codes 400-499).
    Settlement,
    /// Amount validation and price curve errors (codes 500-599).
    Pricing,
}

/// @title  ContractError
/// @notice Canonical error enum shared by the ISAO store contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1   -  99 : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Lifecycle
///   300 - 399 : Ledger
///   400 - 499 : Settlement
///   500 - 599 : Pricing
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    /// Price curve is malformed or can never reach the minimal fund size.
    InvalidCurve = 3,

    /// Raising/distribution periods would overflow the ledger clock.
    InvalidSchedule = 4,

    /// The entitlement asset has not been configured yet.
    AssetNotConfigured = 5,

    /// The entitlement asset is already set to a different address.
    AssetAlreadyConfigured = 6,

    // --- Authorization (100-199) ---
    /// Caller does not hold the role required by the operation.
    Unauthorized = 100,

    // --- Lifecycle (200-299) ---
    /// Operation is not legal in the current stage.
    InvalidStage = 200,

    // --- Ledger (300-399) ---
    /// Requested amount exceeds the holder's share or the store's custody.
    InsufficientBalance = 300,

    // --- Settlement (400-499) ---
    /// Asset pull exceeds the allowance granted to the store.
    AllowanceExceeded = 400,

    // --- Pricing (500-599) ---
    /// Amount is negative, below the minimal deposit, or overflows arithmetic.
    MalformedAmount = 500,

    /// Every tier of the price curve is already sold out.
    CurveExhausted = 501,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidCurve
            | ContractError::InvalidSchedule
            | ContractError::AssetNotConfigured
            | ContractError::AssetAlreadyConfigured => ErrorCategory::Initialization,

            ContractError::Unauthorized => ErrorCategory::Authorization,

            ContractError::InvalidStage => ErrorCategory::Lifecycle,

            ContractError::InsufficientBalance => ErrorCategory::Ledger,

            ContractError::AllowanceExceeded => ErrorCategory::Settlement,

            ContractError::MalformedAmount | ContractError::CurveExhausted => {
                ErrorCategory::Pricing
            }
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::InvalidCurve => {
                "Price curve must be non-empty with increasing limits and positive costs"
            }
            ContractError::InvalidSchedule => "Raising and distribution periods overflow",
            ContractError::AssetNotConfigured => "Entitlement asset has not been configured",
            ContractError::AssetAlreadyConfigured => {
                "Entitlement asset is already set to another address"
            }
            ContractError::Unauthorized => "Caller does not hold the required role",
            ContractError::InvalidStage => "Operation is not allowed in the current stage",
            ContractError::InsufficientBalance => "Amount exceeds available share or custody",
            ContractError::AllowanceExceeded => "Asset pull exceeds the approved allowance",
            ContractError::MalformedAmount => "Amount is negative, too small, or overflows",
            ContractError::CurveExhausted => "Every price tier is already sold out",
        }
    }
}
