//! Core simulator types
//!
//! Slots, strategies, configuration and the observable snapshot.

use crate::error::SimulatorError;
use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Number of simulated instances
pub const SLOT_COUNT: usize = 10;

/// Instances promoted at the canary checkpoint
pub const CANARY_COHORT: usize = 2;

/// Version tag held by an instance slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// Currently deployed release
    #[default]
    Old,
    /// Release being rolled out
    New,
}

impl Version {
    /// Release label shown under each instance
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Old => "v1.0",
            Self::New => "v2.0",
        }
    }
}

/// Deployment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Replace instances one at a time
    #[default]
    Rolling,
    /// Swap the whole environment at once
    BlueGreen,
    /// Small cohort first, then everyone
    Canary,
}

impl Strategy {
    /// All strategies in menu order
    pub const ALL: [Strategy; 3] = [Strategy::Rolling, Strategy::BlueGreen, Strategy::Canary];

    /// Kebab-case name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rolling => "rolling",
            Self::BlueGreen => "blue-green",
            Self::Canary => "canary",
        }
    }

    /// Menu label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rolling => "Rolling",
            Self::BlueGreen => "Blue Green",
            Self::Canary => "Canary",
        }
    }

    /// One-line explanation
    #[inline]
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rolling => "Instances are replaced one by one.",
            Self::BlueGreen => "A whole new environment is swapped in.",
            Self::Canary => "Small group gets v2 first, then everyone else.",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rolling" => Ok(Self::Rolling),
            "blue-green" | "bluegreen" | "blue_green" => Ok(Self::BlueGreen),
            "canary" => Ok(Self::Canary),
            _ => Err(SimulatorError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Simulator timings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Delay between rolling steps
    pub rolling_step_ms: u64,
    /// Delay before the blue-green cutover
    pub blue_green_cutover_ms: u64,
    /// Bake time between the canary checkpoint and full rollout
    pub canary_bake_ms: u64,
}

impl SimulatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With rolling step interval
    #[inline]
    #[must_use]
    pub fn with_rolling_step(mut self, step: Duration) -> Self {
        self.rolling_step_ms = duration_ms(step);
        self
    }

    /// With blue-green cutover delay
    #[inline]
    #[must_use]
    pub fn with_blue_green_cutover(mut self, delay: Duration) -> Self {
        self.blue_green_cutover_ms = duration_ms(delay);
        self
    }

    /// With canary bake time
    #[inline]
    #[must_use]
    pub fn with_canary_bake(mut self, delay: Duration) -> Self {
        self.canary_bake_ms = duration_ms(delay);
        self
    }

    /// Rolling step interval
    #[inline]
    #[must_use]
    pub fn rolling_step(&self) -> Duration {
        Duration::from_millis(self.rolling_step_ms)
    }

    /// Blue-green cutover delay
    #[inline]
    #[must_use]
    pub fn blue_green_cutover(&self) -> Duration {
        Duration::from_millis(self.blue_green_cutover_ms)
    }

    /// Canary bake time
    #[inline]
    #[must_use]
    pub fn canary_bake(&self) -> Duration {
        Duration::from_millis(self.canary_bake_ms)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            rolling_step_ms: 800,
            blue_green_cutover_ms: 3000,
            canary_bake_ms: 4000,
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new run began
    Started,
    /// A run is already active; nothing changed
    AlreadyRunning,
}

/// Severity of a deployment log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Informational
    Info,
    /// Something disruptive is happening
    Warn,
    /// Rollout finished
    Success,
}

impl LogLevel {
    /// Bracketed tag
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Info => "[INFO]",
            Self::Warn => "[WARN]",
            Self::Success => "[SUCCESS]",
        }
    }
}

/// One deployment log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    /// Severity
    pub level: LogLevel,
    /// Message
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.tag(), self.message)
    }
}

/// Point-in-time view of the simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorSnapshot {
    /// Selected strategy
    pub strategy: Strategy,
    /// Instance versions by position
    pub slots: [Version; SLOT_COUNT],
    /// Whether a run is active
    pub running: bool,
    /// Percentage of traffic on the new version
    pub progress: u8,
    /// Run phase
    pub phase: Phase,
}

impl SimulatorSnapshot {
    /// Number of slots on the new version
    #[must_use]
    pub fn new_count(&self) -> usize {
        self.slots.iter().filter(|v| **v == Version::New).count()
    }

    /// Whether every slot holds the same version
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.slots.iter().all(|v| *v == self.slots[0])
    }

    /// Deployment log derived from progress
    #[must_use]
    pub fn log_lines(&self) -> Vec<LogLine> {
        let line = |level, message: String| LogLine { level, message };
        let mut lines = vec![line(
            LogLevel::Info,
            format!("Initializing {} strategy...", self.strategy),
        )];
        if self.progress > 0 {
            lines.push(line(LogLevel::Warn, "Terminating v1 instances...".to_string()));
        }
        if self.progress > 50 {
            lines.push(line(LogLevel::Info, "Health checks passing for v2...".to_string()));
        }
        if self.progress == 100 {
            lines.push(line(
                LogLevel::Success,
                "Traffic fully shifted to v2.0".to_string(),
            ));
        }
        lines
    }

    /// Progress bar of `width` cells followed by the percentage
    #[must_use]
    pub fn progress_bar(&self, width: usize) -> String {
        let filled = width * usize::from(self.progress) / 100;
        format!(
            "[{}{}] {:>3}% v2",
            "#".repeat(filled),
            "-".repeat(width - filled),
            self.progress
        )
    }

    /// Instance row, e.g. `v2.0 v2.0 v1.0 ...`
    #[must_use]
    pub fn slot_row(&self) -> String {
        self.slots
            .iter()
            .map(Version::label)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(progress: u8) -> SimulatorSnapshot {
        SimulatorSnapshot {
            strategy: Strategy::BlueGreen,
            slots: [Version::Old; SLOT_COUNT],
            running: false,
            progress,
            phase: Phase::Idle,
        }
    }

    #[test]
    fn strategy_parses_names() {
        for s in Strategy::ALL {
            assert_eq!(s.as_str().parse::<Strategy>(), Ok(s));
        }
        assert_eq!(" Blue-Green ".parse::<Strategy>(), Ok(Strategy::BlueGreen));
        assert!(matches!(
            "big-bang".parse::<Strategy>(),
            Err(SimulatorError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn default_timings() {
        let config = SimulatorConfig::default();
        assert_eq!(config.rolling_step(), Duration::from_millis(800));
        assert_eq!(config.blue_green_cutover(), Duration::from_millis(3000));
        assert_eq!(config.canary_bake(), Duration::from_millis(4000));
    }

    #[test]
    fn log_lines_follow_progress() {
        assert_eq!(snapshot(0).log_lines().len(), 1);
        assert_eq!(
            snapshot(0).log_lines()[0].to_string(),
            "[INFO] Initializing blue-green strategy..."
        );
        assert_eq!(snapshot(20).log_lines().len(), 2);
        assert_eq!(snapshot(50).log_lines().len(), 2);
        assert_eq!(snapshot(60).log_lines().len(), 3);
        let done = snapshot(100).log_lines();
        assert_eq!(done.len(), 4);
        assert_eq!(done[3].to_string(), "[SUCCESS] Traffic fully shifted to v2.0");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(snapshot(0).progress_bar(10), "[----------]   0% v2");
        assert_eq!(snapshot(30).progress_bar(10), "[###-------]  30% v2");
        assert_eq!(snapshot(100).progress_bar(10), "[##########] 100% v2");
    }
}
