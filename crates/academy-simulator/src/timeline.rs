//! Scripted strategy timelines
//!
//! Each strategy compiles to a fixed list of steps. A step fires at an
//! offset from the start of the run and promotes a range of slots.
//! Zero-offset steps are applied inside `start()` itself.

use crate::error::SimulatorError;
use crate::phase::{validate_transition, Phase};
use crate::types::{
    SimulatorConfig, SimulatorSnapshot, Strategy, Version, CANARY_COHORT, SLOT_COUNT,
};
use std::ops::Range;
use std::time::Duration;

/// One scheduled mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedStep {
    /// Offset from run start
    pub at: Duration,
    /// Slots switched to the new version
    pub promote: Range<usize>,
    /// Progress after the step
    pub progress: u8,
    /// Phase after the step
    pub phase: Phase,
}

/// Complete script for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    /// Phase entered when the run starts
    pub initial_phase: Phase,
    /// Steps in firing order
    pub steps: Vec<ScriptedStep>,
}

impl Timeline {
    /// Build the script for `strategy`
    #[must_use]
    pub fn for_strategy(strategy: Strategy, config: &SimulatorConfig) -> Self {
        match strategy {
            Strategy::Rolling => Self::rolling(config.rolling_step()),
            Strategy::BlueGreen => Self::blue_green(config.blue_green_cutover()),
            Strategy::Canary => Self::canary(config.canary_bake()),
        }
    }

    fn rolling(step: Duration) -> Self {
        let steps = (0..SLOT_COUNT)
            .map(|idx| {
                let fired = idx + 1;
                ScriptedStep {
                    at: step * u32::try_from(fired).unwrap_or(u32::MAX),
                    promote: idx..fired,
                    progress: percent(fired),
                    phase: if fired == SLOT_COUNT {
                        Phase::Done
                    } else {
                        Phase::Stepping
                    },
                }
            })
            .collect();

        Self {
            initial_phase: Phase::Stepping,
            steps,
        }
    }

    fn blue_green(cutover: Duration) -> Self {
        Self {
            initial_phase: Phase::AwaitingCutover,
            steps: vec![ScriptedStep {
                at: cutover,
                promote: 0..SLOT_COUNT,
                progress: 100,
                phase: Phase::Done,
            }],
        }
    }

    fn canary(bake: Duration) -> Self {
        Self {
            initial_phase: Phase::Stepping,
            steps: vec![
                ScriptedStep {
                    at: Duration::ZERO,
                    promote: 0..CANARY_COHORT,
                    progress: percent(CANARY_COHORT),
                    phase: Phase::AwaitingCutover,
                },
                ScriptedStep {
                    at: bake,
                    promote: 0..SLOT_COUNT,
                    progress: 100,
                    phase: Phase::Done,
                },
            ],
        }
    }
}

fn percent(slots: usize) -> u8 {
    u8::try_from(slots * 100 / SLOT_COUNT).unwrap_or(100)
}

/// Mutable simulator state
#[derive(Debug, Clone)]
pub(crate) struct RunState {
    pub(crate) strategy: Strategy,
    pub(crate) slots: [Version; SLOT_COUNT],
    pub(crate) running: bool,
    pub(crate) progress: u8,
    pub(crate) phase: Phase,
    /// Bumped by every start and reset; scheduled steps carry the value
    /// they were scheduled under.
    pub(crate) generation: u64,
}

impl RunState {
    pub(crate) fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            slots: [Version::Old; SLOT_COUNT],
            running: false,
            progress: 0,
            phase: Phase::Idle,
            generation: 0,
        }
    }

    /// Return to all-old and invalidate anything scheduled
    pub(crate) fn reset(&mut self) {
        self.generation += 1;
        self.slots = [Version::Old; SLOT_COUNT];
        self.running = false;
        self.progress = 0;
        self.phase = Phase::Idle;
    }

    /// Enter a fresh run from `Idle` or `Done`; returns the run's generation
    ///
    /// Slots are left as they are. Only `reset` returns them to the old version.
    pub(crate) fn begin(&mut self, initial_phase: Phase) -> u64 {
        debug_assert!(matches!(self.phase, Phase::Idle | Phase::Done));
        self.generation += 1;
        self.running = true;
        self.progress = 0;
        self.phase = initial_phase;
        self.generation
    }

    pub(crate) fn apply(&mut self, step: &ScriptedStep) -> Result<(), SimulatorError> {
        validate_transition(self.phase, step.phase)?;
        for slot in &mut self.slots[step.promote.clone()] {
            *slot = Version::New;
        }
        self.progress = self.progress.max(step.progress);
        self.phase = step.phase;
        if step.phase == Phase::Done {
            self.running = false;
        }
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> SimulatorSnapshot {
        SimulatorSnapshot {
            strategy: self.strategy,
            slots: self.slots,
            running: self.running,
            progress: self.progress,
            phase: self.phase,
        }
    }
}
