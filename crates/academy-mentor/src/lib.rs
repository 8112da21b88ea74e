//! DevOps mentor chat
//!
//! A [`MentorSession`] keeps the conversation and turns backend failures
//! into fixed replies. [`GeminiBackend`] is the production backend.

#![warn(unreachable_pub)]

pub mod backend;
pub mod config;
pub mod error;
pub mod session;
pub mod wire;

pub use backend::{GeminiBackend, MentorBackend, SYSTEM_INSTRUCTION};
pub use config::MentorConfig;
pub use error::MentorError;
pub use session::{MentorSession, EMPTY_REPLY, ERROR_REPLY};
