//! Error types for catalogue loading

use std::path::PathBuf;

/// Catalogue loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Document is not valid YAML for the catalogue schema
    #[error("malformed catalogue document: {0}")]
    Malformed(#[from] serde_yaml::Error),

    /// IO error while reading a catalogue file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Two records in the same table share an id
    #[error("duplicate {table} id: '{id}'")]
    DuplicateId {
        /// Table name
        table: &'static str,
        /// Offending id
        id: String,
    },

    /// A record has an empty id
    #[error("empty id in {table}")]
    EmptyId {
        /// Table name
        table: &'static str,
    },

    /// Catalogue has no modules at all
    #[error("catalogue contains no modules")]
    NoModules,
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error comes from the content itself rather than the
    /// environment
    #[inline]
    #[must_use]
    pub fn is_content_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}
