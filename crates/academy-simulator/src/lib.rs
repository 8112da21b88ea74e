//! Deployment strategy simulator
//!
//! Ten instance slots move from `v1.0` to `v2.0` following one of three
//! scripted strategies:
//! - **Rolling**: one slot every step interval
//! - **Blue-green**: every slot at once after the cutover delay
//! - **Canary**: two slots immediately, the rest after a bake period
//!
//! Runs are driven by a Tokio task. Reset and strategy changes invalidate
//! the task so a stale step never lands on a fresh run.
//!
//! # Example
//!
//! ```rust,ignore
//! use academy_simulator::{DeploymentSimulator, SimulatorConfig, Strategy};
//!
//! let sim = DeploymentSimulator::new(SimulatorConfig::default());
//! sim.select_strategy(Strategy::Canary)?;
//! sim.start();
//! let done = sim.finished().await;
//! assert_eq!(done.progress, 100);
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod phase;
pub mod simulator;
pub mod timeline;
pub mod types;

pub use error::SimulatorError;
pub use phase::{allowed_transitions, validate_transition, Phase};
pub use simulator::DeploymentSimulator;
pub use timeline::{ScriptedStep, Timeline};
pub use types::{
    LogLevel, LogLine, SimulatorConfig, SimulatorSnapshot, StartOutcome, Strategy, Version,
    CANARY_COHORT, SLOT_COUNT,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
