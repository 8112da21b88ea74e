//! Application configuration
//!
//! Every field has a default, so an empty or partial TOML file is valid:
//!
//! ```toml
//! catalog_path = "content/catalog.yaml"
//!
//! [simulator]
//! rolling_step_ms = 400
//!
//! [sandbox]
//! latency_ms = 250
//! welcome_banner = false
//!
//! [mentor]
//! model = "gemini-3-flash-preview"
//! api_key_env = "GEMINI_API_KEY"
//! timeout_ms = 30000
//! ```

use academy_catalog::{Catalog, CatalogError};
use academy_mentor::MentorConfig;
use academy_sandbox::SandboxConfig;
use academy_simulator::SimulatorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File consulted
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration TOML
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// File consulted
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Configured catalogue failed to load
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcademyConfig {
    /// Strategy simulator timings
    pub simulator: SimulatorConfig,
    /// Terminal lab settings
    pub sandbox: SandboxConfig,
    /// Mentor backend settings
    pub mentor: MentorConfig,
    /// Catalogue document replacing the builtin one
    pub catalog_path: Option<PathBuf>,
}

impl AcademyConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed input; `origin` names the source
    /// in the message.
    pub fn from_toml_str(text: &str, origin: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.into(),
            source,
        })
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Parse`
    /// if it is not valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    ///
    /// # Errors
    /// As [`AcademyConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// With simulator timings
    #[must_use]
    pub fn with_simulator(mut self, simulator: SimulatorConfig) -> Self {
        self.simulator = simulator;
        self
    }

    /// With lab settings
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: SandboxConfig) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// With mentor settings
    #[must_use]
    pub fn with_mentor(mut self, mentor: MentorConfig) -> Self {
        self.mentor = mentor;
        self
    }

    /// With a catalogue document
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// The configured catalogue, or the builtin one
    ///
    /// # Errors
    /// `ConfigError::Catalog` if the document is unreadable or invalid.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::builtin()?,
        };
        Ok(catalog)
    }
}
