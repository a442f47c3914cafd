use soroban_sdk::{contracttype, Address, Vec};

// ─── Price curve ───────────────────────────────────────────────────────────

/// One step of the stair-step price curve.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceTier {
    /// Cumulative share limit (base units) up to which this tier applies.
    pub limit: i128,
    /// Native value (base units) charged per whole share (`SCALE` base units).
    pub cost: i128,
}

/// Outcome of converting native value into share at the current total.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Purchase {
    /// Share credited to the buyer.
    pub granted: i128,
    /// Native value actually taken into custody.
    pub spent: i128,
    /// Unspendable remainder left with the buyer once the curve is sold out.
    pub change: i128,
}

// ─── Lifecycle ─────────────────────────────────────────────────────────────

/// Fund-raise stage. Discriminants are the legacy on-chain bit codes.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Stage {
    Default = 0,
    Raising = 1,
    MoneyBack = 4,
    TokenDistribution = 8,
    FundDeprecated = 16,
}

/// What a plain value receipt ended up doing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Receipt {
    /// Raising: the value bought share.
    Purchased(Purchase),
    /// TokenDistribution: the sender's whole share was released.
    Released(i128),
    /// MoneyBack: the sender's whole share was refunded for this much value.
    Refunded(i128),
}

// ─── Access control ────────────────────────────────────────────────────────

/// Role bits. An address stores the OR of every role it holds.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 0x04,
    Paybot = 0x08,
}

impl Role {
    pub fn bit(self) -> u32 {
        self as u32
    }
}

// ─── Configuration ─────────────────────────────────────────────────────────

/// Parameters fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreConfig {
    /// Token in which contributions are paid and refunded (e.g. native XLM).
    pub native_token: Address,
    /// Stair-step price curve, strictly increasing in `limit`.
    pub curve: Vec<PriceTier>,
    /// Smallest accepted purchase, in native base units.
    pub minimal_deposit: i128,
    /// Total share that must be sold by the end of raising to avoid money-back.
    pub minimal_fund_size: i128,
    /// Seconds of raising after launch; 0 disables the schedule.
    pub raising_period: u64,
    /// Seconds of distribution after raising; 0 disables the schedule.
    pub distribution_period: u64,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// StoreConfig.
    Config,
    /// Current Stage.
    Stage,
    /// Ledger timestamp at which the store first entered Raising.
    LaunchedAt,
    /// Ledger timestamp the current stage counts as entered at.
    StageSince,
    /// Entitlement asset token address.
    Asset,
    /// Role bitmask per address.
    Roles(Address),
    /// Share balance per participant.
    Share(Address),
    /// Native value paid for the share a participant still holds.
    Paid(Address),
    /// Sum of every participant share.
    TotalShare,
}
