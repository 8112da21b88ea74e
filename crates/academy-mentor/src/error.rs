//! Error types for the mentor backend

/// Mentor backend errors
///
/// `MentorSession` never surfaces these to the learner; they are logged and
/// replaced by a fixed apology.
#[derive(Debug, thiserror::Error)]
pub enum MentorError {
    /// Credential variable unset or empty
    #[error("mentor API key not found in environment variable {var}")]
    MissingApiKey {
        /// Variable consulted
        var: String,
    },

    /// Transport failure, including timeouts
    #[error("mentor request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("mentor service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("malformed mentor response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MentorError {
    /// Create a status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Whether the same request may succeed later
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::MissingApiKey { .. } | Self::Decode(_) => false,
        }
    }
}
