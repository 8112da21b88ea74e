//! `generateContent` request and response bodies

use academy_catalog::{ChatMessage, Role};
use serde::{Deserialize, Serialize};

/// One text part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Text; absent for non-text parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// A turn or the system instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Speaker; omitted for the system instruction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: Some(message.role),
            parts: vec![Part::text(message.text.as_str())],
        }
    }
}

/// Sampling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
}

/// Request body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// History followed by the new prompt
    pub contents: Vec<Content>,
    /// Persona
    pub system_instruction: Content,
    /// Sampling settings
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    /// Build a request: prior turns in order, then `prompt` as a user turn
    #[must_use]
    pub fn new(
        prompt: &str,
        history: &[ChatMessage],
        system_instruction: &str,
        temperature: f32,
    ) -> Self {
        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content::from(&ChatMessage::user(prompt)));
        Self {
            contents,
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(system_instruction)],
            },
            generation_config: GenerationConfig { temperature },
        }
    }
}

/// One generated candidate
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    /// Generated content; missing when the candidate was blocked
    #[serde(default)]
    pub content: Option<Content>,
}

/// Response body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateResponse {
    /// Candidates, best first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate; empty if there is none
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
