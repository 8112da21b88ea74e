//! Error types for the deployment simulator

use crate::phase::Phase;
use crate::types::Strategy;

/// Simulator errors
///
/// None of these come from the simulated deployment itself; they guard the
/// simulator's own contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulatorError {
    /// Strategy change attempted while a run is active
    #[error("cannot change strategy while a {active} run is in progress")]
    RunInProgress {
        /// Strategy of the active run
        active: Strategy,
    },

    /// Timeline step would move the phase machine illegally
    #[error("illegal phase transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Current phase
        from: Phase,
        /// Requested phase
        to: Phase,
    },

    /// Strategy name not recognised
    #[error("unknown strategy: '{0}' (expected rolling, blue-green or canary)")]
    UnknownStrategy(String),
}

impl SimulatorError {
    /// Whether the caller can simply try again later
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RunInProgress { .. })
    }

    /// Whether the error points at a simulator defect rather than misuse
    #[inline]
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::IllegalTransition { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_in_progress_is_transient() {
        let err = SimulatorError::RunInProgress {
            active: Strategy::Canary,
        };
        assert!(err.is_transient());
        assert!(!err.is_defect());
        assert!(err.to_string().contains("canary"));
    }

    #[test]
    fn illegal_transition_is_defect() {
        let err = SimulatorError::IllegalTransition {
            from: Phase::Done,
            to: Phase::Stepping,
        };
        assert!(err.is_defect());
        assert!(!err.is_transient());
    }
}
