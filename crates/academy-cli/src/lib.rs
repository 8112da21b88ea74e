//! DevOps Academy command line
//!
//! Library half of the `academy` binary:
//! - [`config`]: TOML configuration covering every component
//! - [`app`]: view host owning the simulator and the lab session
//! - [`render`]: plain-text pages for terminal output

#![warn(unreachable_pub)]

pub mod app;
pub mod config;
pub mod render;

pub use app::{AppError, AppState, View};
pub use config::{AcademyConfig, ConfigError};
