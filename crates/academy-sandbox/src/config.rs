//! Lab session settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lab session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Delay before each response lands
    pub latency_ms: u64,
    /// Start the transcript with the three-line welcome
    pub welcome_banner: bool,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            latency_ms: 500,
            welcome_banner: true,
        }
    }
}

impl SandboxConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With response latency
    #[inline]
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With or without the welcome banner
    #[inline]
    #[must_use]
    pub fn with_welcome_banner(mut self, enabled: bool) -> Self {
        self.welcome_banner = enabled;
        self
    }

    /// Response latency
    #[inline]
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
