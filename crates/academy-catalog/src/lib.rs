//! DevOps Academy catalogue
//!
//! Read-only learning content:
//! - Learning modules, each tagged with a tooling [`Domain`]
//! - Cheat sheets and glossary, with substring search
//! - Learning paths and the survival kit
//! - Icon lookup and the sample pipeline
//!
//! # Example
//!
//! ```rust,ignore
//! use academy_catalog::Catalog;
//!
//! let catalog = Catalog::builtin()?;
//! for sheet in catalog.search_cheat_sheets("docker") {
//!     println!("{}: {} commands", sheet.title, sheet.commands.len());
//! }
//! ```

#![warn(unreachable_pub)]

pub mod catalog;
pub mod error;
pub mod icon;
pub mod pipeline;
pub mod types;

pub use catalog::{Catalog, ResolvedPath};
pub use error::CatalogError;
pub use icon::Icon;
pub use pipeline::{sample_pipeline, Pipeline, PipelineStep, StepStatus};
pub use types::{
    ChatMessage, CheatSheet, Command, Difficulty, Domain, GlossaryTerm, LearningPath, Module,
    Role, SurvivalItem, SurvivalKitCategory,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
