//! What the interpreter knows about the current module

use academy_catalog::{Domain, Module};
use serde::{Deserialize, Serialize};

/// Read-only view of a learning module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContext {
    /// Module title
    pub title: String,
    /// Sidebar category, used in the welcome scenario
    pub category: String,
    /// Tooling domain; gates the git and docker rules
    pub domain: Domain,
    /// Worked example
    pub example: String,
}

impl ModuleContext {
    /// Create a context
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        domain: Domain,
        example: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            domain,
            example: example.into(),
        }
    }

    /// First line of the example
    #[must_use]
    pub fn example_headline(&self) -> &str {
        self.example.lines().next().unwrap_or_default()
    }
}

impl From<&Module> for ModuleContext {
    fn from(module: &Module) -> Self {
        Self {
            title: module.title.clone(),
            category: module.category.clone(),
            domain: module.domain,
            example: module.example.clone(),
        }
    }
}
