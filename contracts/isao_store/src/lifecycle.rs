//! Lifecycle stage machine.
//!
//! ```text
//! Default ──► Raising ──► MoneyBack
//!                │
//!                └──────► TokenDistribution ──► FundDeprecated
//! ```
//!
//! The admin may force any stage. When both schedule periods are configured
//! the store also moves on its own, measured from the moment the current
//! stage was entered:
//!
//! - `Raising` ends after `raising_period`: `TokenDistribution` when at least
//!   `minimal_fund_size` share was sold, `MoneyBack` otherwise.
//! - `TokenDistribution` ends after `distribution_period`.
//!
//! A scheduled move counts as entered at its deadline, so an untouched raise
//! ends distribution at launch + raising + distribution. An admin move counts
//! as entered when it is made, which restarts the clock for that stage.
//!
//! Scheduled moves are applied at the start of every state-changing call.

use isao_errors::ContractError;
use soroban_sdk::{Env, Symbol};

use crate::types::{DataKey, Stage, StoreConfig};
use crate::{config, events, ledger, math};

/// Stage-gated operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Purchase,
    Release,
    ReleaseForced,
    Refund,
    RefundForced,
    StakeholderSweep,
    ForwardCall,
}

/// Permission table: which operation is legal in which stage.
pub fn permits(stage: Stage, op: Operation) -> bool {
    match stage {
        Stage::Default => false,
        Stage::Raising => matches!(op, Operation::Purchase | Operation::RefundForced),
        Stage::MoneyBack => matches!(op, Operation::Refund | Operation::RefundForced),
        Stage::TokenDistribution => matches!(
            op,
            Operation::Release | Operation::ReleaseForced | Operation::StakeholderSweep
        ),
        Stage::FundDeprecated => {
            matches!(op, Operation::StakeholderSweep | Operation::ForwardCall)
        }
    }
}

/// `true` for the moves the fund-raise makes in normal operation.
pub fn is_forward(from: Stage, to: Stage) -> bool {
    matches!(
        (from, to),
        (Stage::Default, Stage::Raising)
            | (Stage::Raising, Stage::MoneyBack)
            | (Stage::Raising, Stage::TokenDistribution)
            | (Stage::TokenDistribution, Stage::FundDeprecated)
    )
}

pub fn stored(e: &Env) -> Stage {
    e.storage()
        .instance()
        .get(&DataKey::Stage)
        .unwrap_or(Stage::Default)
}

pub fn launched_at(e: &Env) -> Option<u64> {
    e.storage().instance().get(&DataKey::LaunchedAt)
}

/// Timestamp the stored stage counts as entered at.
fn stage_since(e: &Env) -> Option<u64> {
    e.storage().instance().get(&DataKey::StageSince)
}

fn schedule_enabled(config: &StoreConfig) -> bool {
    config.raising_period > 0 && config.distribution_period > 0
}

/// The scheduled move out of `stage` that is due at the current ledger time,
/// with the deadline it fell due at.
fn due_move(
    e: &Env,
    config: &StoreConfig,
    stage: Stage,
    since: u64,
) -> Result<Option<(Stage, u64)>, ContractError> {
    let now = e.ledger().timestamp();
    match stage {
        Stage::Raising => {
            let end = math::add_secs(since, config.raising_period)?;
            if now < end {
                return Ok(None);
            }
            let next = if ledger::total_outstanding(e) >= config.minimal_fund_size {
                Stage::TokenDistribution
            } else {
                Stage::MoneyBack
            };
            Ok(Some((next, end)))
        }
        Stage::TokenDistribution => {
            let end = math::add_secs(since, config.distribution_period)?;
            Ok((now >= end).then_some((Stage::FundDeprecated, end)))
        }
        _ => Ok(None),
    }
}

/// Walks every due scheduled move from the stored stage. Each move is
/// written when `apply` is set.
fn advance(e: &Env, apply: bool) -> Result<Stage, ContractError> {
    let config = config::load(e)?;
    let mut stage = stored(e);
    if !schedule_enabled(&config) {
        return Ok(stage);
    }
    let Some(mut since) = stage_since(e) else {
        return Ok(stage);
    };
    while let Some((next, at)) = due_move(e, &config, stage, since)? {
        if apply {
            write(e, stage, next, at, true);
        }
        stage = next;
        since = at;
    }
    Ok(stage)
}

/// Effective stage at the current ledger time, without writing it.
pub fn current(e: &Env) -> Result<Stage, ContractError> {
    advance(e, false)
}

/// Applies any due scheduled move and returns the resulting stage.
pub fn sync(e: &Env) -> Result<Stage, ContractError> {
    advance(e, true)
}

/// Brings the stage up to date and fails with `InvalidStage` unless `op` is
/// legal in it.
pub fn require(e: &Env, op: Operation) -> Result<Stage, ContractError> {
    let stage = sync(e)?;
    if !permits(stage, op) {
        return Err(ContractError::InvalidStage);
    }
    Ok(stage)
}

/// Admin override. Setting the current stage again changes nothing.
pub fn set_stage(e: &Env, stage: Stage) -> Result<bool, ContractError> {
    config::load(e)?;
    let from = stored(e);
    if from == stage {
        return Ok(false);
    }
    write(e, from, stage, e.ledger().timestamp(), false);
    Ok(true)
}

/// Validates new schedule periods against the current stage's start, if any.
pub fn check_periods(e: &Env, raising: u64, distribution: u64) -> Result<(), ContractError> {
    let start = stage_since(e).unwrap_or_else(|| e.ledger().timestamp());
    let raising_end = math::add_secs(start, raising)?;
    math::add_secs(raising_end, distribution)?;
    Ok(())
}

fn write(e: &Env, from: Stage, to: Stage, at: u64, automatic: bool) {
    let instance = e.storage().instance();
    instance.set(&DataKey::Stage, &to);
    instance.set(&DataKey::StageSince, &at);
    if to == Stage::Raising && launched_at(e).is_none() {
        instance.set(&DataKey::LaunchedAt, &at);
    }
    let cause = if automatic {
        Symbol::new(e, "schedule")
    } else if is_forward(from, to) {
        Symbol::new(e, "admin")
    } else {
        Symbol::new(e, "override")
    };
    events::emit_stage_changed(e, from, to, cause);
}

/// Proof that the store is in `FundDeprecated`.
///
/// Only [`terminal`] can build one, so anything taking a `&Terminal` is
/// unreachable from every other stage.
pub struct Terminal<'a> {
    env: &'a Env,
}

impl<'a> Terminal<'a> {
    pub fn env(&self) -> &'a Env {
        self.env
    }
}

/// Grants the terminal-stage capability, after applying due scheduled moves.
pub fn terminal(e: &Env) -> Result<Terminal<'_>, ContractError> {
    match require(e, Operation::ForwardCall)? {
        Stage::FundDeprecated => Ok(Terminal { env: e }),
        _ => Err(ContractError::InvalidStage),
    }
}
