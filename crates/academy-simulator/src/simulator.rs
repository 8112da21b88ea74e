//! Deployment strategy simulator
//!
//! Drives ten instance slots through a scripted version transition. At most
//! one driver task exists per simulator. The driver only mutates state when
//! the generation it was spawned under is still current, so a reset or a
//! strategy change can never be undone by a step that was already in flight.

use crate::error::SimulatorError;
use crate::timeline::{RunState, ScriptedStep, Timeline};
use crate::types::{SimulatorConfig, SimulatorSnapshot, StartOutcome, Strategy};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// State shared with the driver task
#[derive(Debug)]
struct Shared {
    state: Mutex<RunState>,
    updates: watch::Sender<SimulatorSnapshot>,
}

impl Shared {
    fn publish(&self, state: &RunState) {
        self.updates.send_replace(state.snapshot());
    }
}

/// Deployment strategy simulator
///
/// `start()` spawns onto the current Tokio runtime. Dropping the simulator
/// aborts its driver.
#[derive(Debug)]
pub struct DeploymentSimulator {
    config: SimulatorConfig,
    shared: Arc<Shared>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl DeploymentSimulator {
    /// Create a simulator with the default (rolling) strategy
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        let state = RunState::new(Strategy::default());
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            config,
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                updates,
            }),
            driver: Mutex::new(None),
        }
    }

    /// Timings in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Selected strategy
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.shared.state.lock().strategy
    }

    /// Whether a run is active
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.state.lock().running
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> SimulatorSnapshot {
        self.shared.state.lock().snapshot()
    }

    /// Receive a snapshot after every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SimulatorSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Select a strategy and reset
    ///
    /// # Errors
    /// `SimulatorError::RunInProgress` while a run is active; nothing changes.
    pub fn select_strategy(&self, strategy: Strategy) -> Result<(), SimulatorError> {
        let mut state = self.shared.state.lock();
        if state.running {
            return Err(SimulatorError::RunInProgress {
                active: state.strategy,
            });
        }
        state.strategy = strategy;
        self.reset_locked(&mut state);
        tracing::debug!(%strategy, "strategy selected");
        Ok(())
    }

    /// Return every slot to the old version and cancel any scheduled step
    pub fn reset(&self) {
        let mut state = self.shared.state.lock();
        self.reset_locked(&mut state);
    }

    fn reset_locked(&self, state: &mut RunState) {
        let was_running = state.running;
        state.reset();
        if let Some(driver) = self.driver.lock().take() {
            driver.abort();
        }
        if was_running {
            tracing::info!(strategy = %state.strategy, "deployment cancelled by reset");
        }
        self.shared.publish(state);
    }

    /// Begin a run of the selected strategy
    ///
    /// Zero-delay steps (the canary checkpoint) are applied before this
    /// returns; the rest are handed to a freshly spawned driver.
    pub fn start(&self) -> StartOutcome {
        let mut state = self.shared.state.lock();
        if state.running {
            tracing::debug!("start ignored: run in progress");
            return StartOutcome::AlreadyRunning;
        }

        let timeline = Timeline::for_strategy(state.strategy, &self.config);
        let generation = state.begin(timeline.initial_phase);
        let origin = Instant::now();

        let mut scheduled = Vec::with_capacity(timeline.steps.len());
        for step in timeline.steps {
            if step.at.is_zero() && scheduled.is_empty() {
                if let Err(err) = state.apply(&step) {
                    tracing::error!(%err, "immediate deployment step rejected");
                }
            } else {
                scheduled.push(step);
            }
        }

        tracing::info!(
            strategy = %state.strategy,
            generation,
            steps = scheduled.len(),
            "deployment started"
        );
        self.shared.publish(&state);

        if !scheduled.is_empty() {
            let driver = tokio::spawn(drive(
                Arc::clone(&self.shared),
                generation,
                origin,
                scheduled,
            ));
            if let Some(previous) = self.driver.lock().replace(driver) {
                previous.abort();
            }
        }

        StartOutcome::Started
    }

    /// Wait until no run is active
    pub async fn finished(&self) -> SimulatorSnapshot {
        let mut updates = self.subscribe();
        // The sender lives as long as `self`, so the wait cannot fail.
        let _ = updates.wait_for(|snapshot| !snapshot.running).await;
        self.snapshot()
    }
}

impl Default for DeploymentSimulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl Drop for DeploymentSimulator {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.get_mut().take() {
            driver.abort();
        }
    }
}

/// Fire scheduled steps in order, each at its offset from `origin`
async fn drive(shared: Arc<Shared>, generation: u64, origin: Instant, steps: Vec<ScriptedStep>) {
    for step in steps {
        sleep_until(origin + step.at).await;
        if !fire(&shared, generation, &step) {
            return;
        }
    }
}

/// Apply one step if its run is still current; false stops the driver
fn fire(shared: &Shared, generation: u64, step: &ScriptedStep) -> bool {
    let mut state = shared.state.lock();
    if state.generation != generation {
        tracing::debug!(
            generation,
            current = state.generation,
            "discarding stale deployment step"
        );
        return false;
    }
    if let Err(err) = state.apply(step) {
        tracing::error!(%err, "deployment step rejected");
        return false;
    }
    tracing::debug!(progress = state.progress, phase = ?state.phase, "deployment step applied");
    if !state.running {
        tracing::info!(strategy = %state.strategy, "deployment finished");
    }
    shared.publish(&state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;
    use crate::types::{Version, SLOT_COUNT};
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn select_strategy_rejected_while_running() {
        let sim = DeploymentSimulator::default();
        assert_eq!(sim.start(), StartOutcome::Started);

        let err = sim.select_strategy(Strategy::Canary).unwrap_err();
        assert_eq!(
            err,
            SimulatorError::RunInProgress {
                active: Strategy::Rolling
            }
        );
        assert_eq!(sim.strategy(), Strategy::Rolling);
        assert!(sim.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn select_strategy_resets_finished_run() {
        let sim = DeploymentSimulator::default();
        sim.select_strategy(Strategy::BlueGreen).unwrap();
        sim.start();
        let done = sim.finished().await;
        assert_eq!(done.progress, 100);

        sim.select_strategy(Strategy::Canary).unwrap();
        let snap = sim.snapshot();
        assert_eq!(snap.strategy, Strategy::Canary);
        assert_eq!(snap.progress, 0);
        assert_eq!(snap.slots, [Version::Old; SLOT_COUNT]);
        assert_eq!(snap.phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn start_after_completion_runs_again() {
        let sim = DeploymentSimulator::default();
        sim.select_strategy(Strategy::BlueGreen).unwrap();
        sim.start();
        sim.finished().await;

        assert_eq!(sim.start(), StartOutcome::Started);
        let snap = sim.snapshot();
        assert!(snap.running);
        assert_eq!(snap.progress, 0);
        assert_eq!(snap.phase, Phase::AwaitingCutover);

        let done = sim.finished().await;
        assert_eq!(done.progress, 100);
        assert_eq!(done.phase, Phase::Done);
        assert_eq!(done.slots, [Version::New; SLOT_COUNT]);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_every_rolling_step() {
        let sim = DeploymentSimulator::default();
        let mut updates = sim.subscribe();
        sim.start();

        let mut seen = Vec::new();
        while updates.changed().await.is_ok() {
            let snap = updates.borrow_and_update().clone();
            seen.push(snap.progress);
            if !snap.running {
                break;
            }
        }
        // Paused time fires steps 800ms apart, one publish each.
        assert_eq!(seen, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }
}
