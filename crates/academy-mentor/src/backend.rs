//! Mentor backends
//!
//! [`MentorBackend`] is the seam between the chat session and whatever
//! produces replies. [`GeminiBackend`] talks to the Gemini
//! `generateContent` endpoint; tests substitute a mock.

use crate::config::MentorConfig;
use crate::error::MentorError;
use crate::wire::{GenerateRequest, GenerateResponse};
use academy_catalog::ChatMessage;
use async_trait::async_trait;

/// Persona sent with every request
pub const SYSTEM_INSTRUCTION: &str = "You are a world-class DevOps Engineer and mentor. \
Your goal is to help users learn DevOps concepts, troubleshooting server deployments, \
cloud infrastructure (AWS, Azure, GCP), CI/CD pipelines, Docker, Kubernetes, and Linux. \
Provide clear, technical yet accessible explanations with code examples where relevant. \
Format your responses in clean Markdown.";

/// Produces a mentor reply
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MentorBackend: Send + Sync {
    /// Reply to `prompt` given the earlier turns
    ///
    /// An empty string means the model produced no text.
    async fn generate(&self, prompt: &str, history: &[ChatMessage]) -> Result<String, MentorError>;
}

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    config: MentorConfig,
    api_key: String,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GeminiBackend {
    /// Create a backend with an explicit key
    ///
    /// # Errors
    /// `MentorError::Http` if the HTTP client cannot be built.
    pub fn new(config: MentorConfig, api_key: impl Into<String>) -> Result<Self, MentorError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
            api_key: api_key.into(),
        })
    }

    /// Create a backend with the key read from `config.api_key_env`
    ///
    /// # Errors
    /// `MentorError::MissingApiKey` if the variable is unset or empty.
    pub fn from_env(config: MentorConfig) -> Result<Self, MentorError> {
        let key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| MentorError::MissingApiKey {
                var: config.api_key_env.clone(),
            })?;
        Self::new(config, key)
    }

    /// Settings in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MentorConfig {
        &self.config
    }
}

#[async_trait]
impl MentorBackend for GeminiBackend {
    async fn generate(&self, prompt: &str, history: &[ChatMessage]) -> Result<String, MentorError> {
        let body = GenerateRequest::new(
            prompt,
            history,
            SYSTEM_INSTRUCTION,
            self.config.temperature,
        );
        tracing::debug!(
            model = %self.config.model,
            turns = body.contents.len(),
            "sending mentor request"
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(MentorError::status(status.as_u16(), text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_key() {
        let config = MentorConfig::new().with_api_key_env("ACADEMY_MENTOR_TEST_UNSET_KEY");
        let err = GeminiBackend::from_env(config).unwrap_err();
        assert!(matches!(
            err,
            MentorError::MissingApiKey { ref var } if var == "ACADEMY_MENTOR_TEST_UNSET_KEY"
        ));
    }

    #[test]
    fn explicit_key_builds_client() {
        let backend = GeminiBackend::new(
            MentorConfig::new().with_timeout(std::time::Duration::from_secs(5)),
            "test-key",
        )
        .unwrap();
        assert_eq!(backend.config().model, "gemini-3-flash-preview");
        assert!(!format!("{backend:?}").contains("test-key"));
    }
}
