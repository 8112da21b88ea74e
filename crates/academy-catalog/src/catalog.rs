//! The in-memory catalogue
//!
//! Holds every table keyed by id in document order. Loading validates ids;
//! lookups and searches never fail.

use crate::error::CatalogError;
use crate::types::{CheatSheet, GlossaryTerm, LearningPath, Module, SurvivalKitCategory};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_DOCUMENT: &str = include_str!("../data/catalog.yaml");

/// Raw document shape
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    modules: Vec<Module>,
    #[serde(default)]
    cheat_sheets: Vec<CheatSheet>,
    #[serde(default)]
    glossary: Vec<GlossaryTerm>,
    #[serde(default)]
    learning_paths: Vec<LearningPath>,
    #[serde(default)]
    survival_kit: Vec<SurvivalKitCategory>,
}

/// Learning path with its references looked up
#[derive(Debug, Clone)]
pub struct ResolvedPath<'a> {
    /// The path itself
    pub path: &'a LearningPath,
    /// Modules in study order, unknown ids skipped
    pub modules: Vec<&'a Module>,
    /// Cheat sheets, unknown ids skipped
    pub cheat_sheets: Vec<&'a CheatSheet>,
}

/// Static learning content
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: IndexMap<String, Module>,
    cheat_sheets: IndexMap<String, CheatSheet>,
    glossary: Vec<GlossaryTerm>,
    learning_paths: IndexMap<String, LearningPath>,
    survival_kit: IndexMap<String, SurvivalKitCategory>,
}

impl Catalog {
    /// Load the catalogue compiled into the binary
    ///
    /// # Errors
    /// Only if the embedded document is broken, which the test suite guards.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_DOCUMENT)
    }

    /// Parse and validate a catalogue document
    ///
    /// # Errors
    /// - `CatalogError::Malformed` if the YAML does not match the schema
    /// - `CatalogError::DuplicateId` / `EmptyId` on bad identifiers
    /// - `CatalogError::NoModules` if the module table is empty
    pub fn from_yaml_str(document: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_yaml::from_str(document)?;
        if doc.modules.is_empty() {
            return Err(CatalogError::NoModules);
        }

        let catalog = Self {
            modules: index_by_id("modules", doc.modules, |m| &m.id)?,
            cheat_sheets: index_by_id("cheat_sheets", doc.cheat_sheets, |c| &c.id)?,
            glossary: doc.glossary,
            learning_paths: index_by_id("learning_paths", doc.learning_paths, |p| &p.id)?,
            survival_kit: index_by_id("survival_kit", doc.survival_kit, |s| &s.id)?,
        };

        tracing::debug!(
            modules = catalog.modules.len(),
            cheat_sheets = catalog.cheat_sheets.len(),
            glossary = catalog.glossary.len(),
            "catalogue loaded"
        );
        Ok(catalog)
    }

    /// Read a catalogue document from disk
    ///
    /// # Errors
    /// `CatalogError::Io` on read failure, otherwise as [`Self::from_yaml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let document =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        Self::from_yaml_str(&document)
    }

    /// Module by id
    #[inline]
    #[must_use]
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    /// The landing module
    #[must_use]
    pub fn default_module(&self) -> &Module {
        // Construction rejects an empty module table.
        &self.modules[0]
    }

    /// Module by id, falling back to the landing module
    #[must_use]
    pub fn module_or_default(&self, id: &str) -> &Module {
        self.module(id).unwrap_or_else(|| self.default_module())
    }

    /// All modules in document order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Modules grouped by category, categories in order of first appearance
    #[must_use]
    pub fn modules_by_category(&self) -> IndexMap<&str, Vec<&Module>> {
        let mut groups: IndexMap<&str, Vec<&Module>> = IndexMap::new();
        for module in self.modules.values() {
            groups.entry(module.category.as_str()).or_default().push(module);
        }
        groups
    }

    /// Cheat sheet by id
    #[inline]
    #[must_use]
    pub fn cheat_sheet(&self, id: &str) -> Option<&CheatSheet> {
        self.cheat_sheets.get(id)
    }

    /// All cheat sheets in document order
    pub fn cheat_sheets(&self) -> impl Iterator<Item = &CheatSheet> {
        self.cheat_sheets.values()
    }

    /// Cheat sheets narrowed to commands matching `query`
    ///
    /// Matches case-insensitively on command text or description. Sheets
    /// left with no commands are dropped.
    #[must_use]
    pub fn search_cheat_sheets(&self, query: &str) -> Vec<CheatSheet> {
        let needle = query.to_lowercase();
        self.cheat_sheets
            .values()
            .filter_map(|sheet| {
                let commands: Vec<_> = sheet
                    .commands
                    .iter()
                    .filter(|c| {
                        c.cmd.to_lowercase().contains(&needle)
                            || c.desc.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect();
                (!commands.is_empty()).then(|| CheatSheet {
                    commands,
                    ..sheet.clone()
                })
            })
            .collect()
    }

    /// All glossary terms
    #[inline]
    #[must_use]
    pub fn glossary(&self) -> &[GlossaryTerm] {
        &self.glossary
    }

    /// Glossary terms whose term or definition contains `query`
    #[must_use]
    pub fn search_glossary(&self, query: &str) -> Vec<&GlossaryTerm> {
        let needle = query.to_lowercase();
        self.glossary
            .iter()
            .filter(|t| {
                t.term.to_lowercase().contains(&needle)
                    || t.definition.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Learning path by id
    #[inline]
    #[must_use]
    pub fn learning_path(&self, id: &str) -> Option<&LearningPath> {
        self.learning_paths.get(id)
    }

    /// All learning paths
    pub fn learning_paths(&self) -> impl Iterator<Item = &LearningPath> {
        self.learning_paths.values()
    }

    /// Look up the modules and cheat sheets a path references
    #[must_use]
    pub fn resolve_path<'a>(&'a self, path: &'a LearningPath) -> ResolvedPath<'a> {
        let modules = path
            .modules
            .iter()
            .filter_map(|id| {
                let found = self.module(id);
                if found.is_none() {
                    tracing::warn!(path = %path.id, module = %id, "learning path references unknown module");
                }
                found
            })
            .collect();
        let cheat_sheets = path
            .cheat_sheets
            .iter()
            .filter_map(|id| {
                let found = self.cheat_sheet(id);
                if found.is_none() {
                    tracing::warn!(path = %path.id, cheat_sheet = %id, "learning path references unknown cheat sheet");
                }
                found
            })
            .collect();

        ResolvedPath {
            path,
            modules,
            cheat_sheets,
        }
    }

    /// Survival kit category by id
    #[inline]
    #[must_use]
    pub fn survival_category(&self, id: &str) -> Option<&SurvivalKitCategory> {
        self.survival_kit.get(id)
    }

    /// All survival kit categories
    pub fn survival_kit(&self) -> impl Iterator<Item = &SurvivalKitCategory> {
        self.survival_kit.values()
    }
}

fn index_by_id<T>(
    table: &'static str,
    records: Vec<T>,
    id_of: impl Fn(&T) -> &String,
) -> Result<IndexMap<String, T>, CatalogError> {
    let mut map = IndexMap::with_capacity(records.len());
    for record in records {
        let id = id_of(&record).clone();
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId { table });
        }
        if map.contains_key(&id) {
            return Err(CatalogError::DuplicateId { table, id });
        }
        map.insert(id, record);
    }
    Ok(map)
}
