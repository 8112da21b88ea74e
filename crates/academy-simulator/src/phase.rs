//! Run phase state machine
//!
//! Every timeline moves through these phases. Reset returns any phase to
//! `Idle` and is not checked here.

use crate::error::SimulatorError;
use serde::{Deserialize, Serialize};

/// Phase of a simulator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Nothing started since the last reset
    #[default]
    Idle,
    /// Replacing instances step by step
    Stepping,
    /// Waiting on a single scheduled cutover
    AwaitingCutover,
    /// Every instance runs the new version
    Done,
}

/// Phases reachable from `from` by a timeline step
#[must_use]
pub fn allowed_transitions(from: Phase) -> &'static [Phase] {
    use Phase::*;
    match from {
        Idle => &[Stepping, AwaitingCutover],
        Stepping => &[Stepping, AwaitingCutover, Done],
        AwaitingCutover => &[Done],
        Done => &[],
    }
}

/// Validates a timeline transition
///
/// # Errors
/// `SimulatorError::IllegalTransition` if `to` is not reachable from `from`.
pub fn validate_transition(from: Phase, to: Phase) -> Result<(), SimulatorError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(SimulatorError::IllegalTransition { from, to })
    }
}
