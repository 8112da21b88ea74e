//! Simulated terminal lab
//!
//! - [`Interpreter`]: ordered dispatch table mapping a line and a
//!   [`ModuleContext`] to an [`Outcome`]
//! - [`LabSession`]: transcript, response latency and one-at-a-time
//!   serialisation on top of the interpreter
//!
//! Domain-specific commands (`git ...`, `docker ...`) are gated on the
//! module's [`academy_catalog::Domain`], never on its identifier.
//!
//! # Example
//!
//! ```rust,ignore
//! use academy_sandbox::{LabSession, ModuleContext, SandboxConfig};
//!
//! let session = LabSession::open(ModuleContext::from(module), &SandboxConfig::default());
//! session.submit("help");
//! let snapshot = session.settled().await;
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod context;
pub mod entry;
pub mod interpreter;
pub mod session;

pub use config::SandboxConfig;
pub use context::ModuleContext;
pub use entry::{EntryKind, LogEntry};
pub use interpreter::{help_text, Interpreter, Invocation, Outcome, Rule};
pub use session::{welcome_banner, LabSession, SessionSnapshot, SubmitOutcome};
