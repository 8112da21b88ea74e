//! Mentor backend settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Mentor backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorConfig {
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// API root, without the version path
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout; none by default
    pub timeout_ms: Option<u64>,
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            temperature: 0.7,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_ms: None,
        }
    }
}

impl MentorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// With API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With credential variable
    #[must_use]
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = var.into();
        self
    }

    /// With request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Full `generateContent` URL for the configured model
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        assert_eq!(
            MentorConfig::default().endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let config = MentorConfig::new()
            .with_base_url("http://localhost:8080/")
            .with_model("test-model");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn timeout_is_optional() {
        assert_eq!(MentorConfig::default().timeout(), None);
        let config = MentorConfig::new().with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }
}
