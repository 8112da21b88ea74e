//! Mentor conversation
//!
//! One question at a time. Backend failures never reach the learner; they
//! become a fixed apology in the transcript.

use crate::backend::MentorBackend;
use academy_catalog::ChatMessage;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reply used when the model returns no text
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response.";

/// Reply used when the backend fails
pub const ERROR_REPLY: &str =
    "I encountered an error while processing your request. Please check your connection and try again.";

/// Chat with a mentor backend
#[derive(Debug)]
pub struct MentorSession<B> {
    backend: B,
    history: Mutex<Vec<ChatMessage>>,
    busy: AtomicBool,
}

/// Clears the busy flag even if `ask` is cancelled mid-request
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<B: MentorBackend> MentorSession<B> {
    /// Start an empty conversation
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            history: Mutex::new(Vec::new()),
            busy: AtomicBool::new(false),
        }
    }

    /// Conversation so far
    pub fn history(&self) -> Vec<ChatMessage> {
        self.history.lock().clone()
    }

    /// Whether a question is awaiting its reply
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Ask a question
    ///
    /// Returns `None` without touching the conversation when `text` is blank
    /// or another question is in flight. Otherwise the question and the
    /// reply are both appended and the reply is returned.
    pub async fn ask(&self, text: &str) -> Option<String> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return None;
        }
        if self.busy.swap(true, Ordering::AcqRel) {
            tracing::debug!("mentor busy, question ignored");
            return None;
        }
        let _guard = BusyGuard(&self.busy);

        let prior = {
            let mut history = self.history.lock();
            let prior = history.clone();
            history.push(ChatMessage::user(prompt));
            prior
        };

        let reply = match self.backend.generate(prompt, &prior).await {
            Ok(reply) if reply.trim().is_empty() => {
                tracing::warn!("mentor returned no text");
                EMPTY_REPLY.to_string()
            }
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(%err, retryable = err.is_retryable(), "mentor request failed");
                ERROR_REPLY.to_string()
            }
        };

        self.history.lock().push(ChatMessage::model(reply.as_str()));
        Some(reply)
    }
}
