//! Transcript entries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Echo of a submitted line
    Command,
    /// Normal output
    Response,
    /// Unrecognised command
    Error,
}

/// One transcript line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Tag
    pub kind: EntryKind,
    /// Text, possibly multi-line
    pub text: String,
}

impl LogEntry {
    /// Command echo
    #[must_use]
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Command,
            text: text.into(),
        }
    }

    /// Normal output
    #[must_use]
    pub fn response(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Response,
            text: text.into(),
        }
    }

    /// Error output
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Command => write!(f, "$ {}", self.text),
            EntryKind::Response | EntryKind::Error => f.write_str(&self.text),
        }
    }
}
