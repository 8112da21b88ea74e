//! View host
//!
//! Tracks which page is showing and owns the two interactive components.
//! The simulator only exists while its view is active and the lab only
//! while it is open; dropping either cancels its pending timers.

use crate::config::AcademyConfig;
use academy_catalog::{Catalog, LearningPath, Module, SurvivalKitCategory};
use academy_sandbox::{LabSession, ModuleContext, SandboxConfig};
use academy_simulator::{DeploymentSimulator, SimulatorConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Lesson for the active module
    #[default]
    Module,
    /// Searchable cheat sheets
    CheatSheet,
    /// Deployment strategy simulator
    Simulator,
    /// Glossary
    Glossary,
    /// Active learning path
    LearningPath,
    /// Active survival-kit category
    SurvivalKit,
}

impl View {
    /// Kebab-case name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::CheatSheet => "cheat-sheet",
            Self::Simulator => "simulator",
            Self::Glossary => "glossary",
            Self::LearningPath => "learning-path",
            Self::SurvivalKit => "survival-kit",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "module" => Ok(Self::Module),
            "cheat-sheet" | "cheatsheet" => Ok(Self::CheatSheet),
            "simulator" => Ok(Self::Simulator),
            "glossary" => Ok(Self::Glossary),
            "learning-path" => Ok(Self::LearningPath),
            "survival-kit" => Ok(Self::SurvivalKit),
            other => Err(AppError::UnknownView(other.to_string())),
        }
    }
}

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// No learning path with this id
    #[error("unknown learning path: '{0}'")]
    UnknownPath(String),

    /// No survival-kit category with this id
    #[error("unknown survival kit category: '{0}'")]
    UnknownSurvivalCategory(String),

    /// No view with this name
    #[error("unknown view: '{0}'")]
    UnknownView(String),
}

/// Navigation state plus the mounted interactive components
#[derive(Debug)]
pub struct AppState {
    catalog: Catalog,
    simulator_config: SimulatorConfig,
    sandbox_config: SandboxConfig,
    view: View,
    active_module: String,
    active_path: Option<String>,
    active_survival: Option<String>,
    simulator: Option<DeploymentSimulator>,
    lab: Option<LabSession>,
}

impl AppState {
    /// Start on the first module's lesson
    #[must_use]
    pub fn new(catalog: Catalog, config: &AcademyConfig) -> Self {
        let active_module = catalog.default_module().id.clone();
        Self {
            catalog,
            simulator_config: config.simulator.clone(),
            sandbox_config: config.sandbox.clone(),
            view: View::Module,
            active_module,
            active_path: None,
            active_survival: None,
            simulator: None,
            lab: None,
        }
    }

    /// Content being browsed
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current view
    #[inline]
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Active module
    #[must_use]
    pub fn active_module(&self) -> &Module {
        self.catalog.module_or_default(&self.active_module)
    }

    /// Active learning path, if one is selected
    #[must_use]
    pub fn active_path(&self) -> Option<&LearningPath> {
        self.active_path
            .as_deref()
            .and_then(|id| self.catalog.learning_path(id))
    }

    /// Active survival-kit category, if one is selected
    #[must_use]
    pub fn active_survival(&self) -> Option<&SurvivalKitCategory> {
        self.active_survival
            .as_deref()
            .and_then(|id| self.catalog.survival_category(id))
    }

    /// Mounted simulator; present only on the simulator view
    #[inline]
    #[must_use]
    pub fn simulator(&self) -> Option<&DeploymentSimulator> {
        self.simulator.as_ref()
    }

    /// Mounted lab session
    #[inline]
    #[must_use]
    pub fn lab(&self) -> Option<&LabSession> {
        self.lab.as_ref()
    }

    /// Switch view, mounting or dropping the simulator as needed
    pub fn select_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        if self.view == View::Simulator {
            if let Some(simulator) = self.simulator.take() {
                tracing::debug!(strategy = %simulator.strategy(), "simulator unmounted");
            }
        }
        if view == View::Simulator {
            self.simulator = Some(DeploymentSimulator::new(self.simulator_config.clone()));
        }
        tracing::debug!(from = %self.view, to = %view, "view changed");
        self.view = view;
    }

    /// Show a module; unknown ids fall back to the first module
    ///
    /// An open lab is reopened for the new module.
    pub fn select_module(&mut self, id: &str) {
        let module = self.catalog.module_or_default(id);
        if module.id != id {
            tracing::warn!(requested = id, fallback = %module.id, "unknown module");
        }
        let changed = module.id != self.active_module;
        self.active_module = module.id.clone();
        self.active_path = None;
        self.active_survival = None;
        self.select_view(View::Module);

        if changed && self.lab.is_some() {
            self.open_lab();
        }
    }

    /// Show a learning path
    ///
    /// # Errors
    /// `AppError::UnknownPath`; nothing changes.
    pub fn select_path(&mut self, id: &str) -> Result<(), AppError> {
        if self.catalog.learning_path(id).is_none() {
            return Err(AppError::UnknownPath(id.to_string()));
        }
        self.active_path = Some(id.to_string());
        self.active_survival = None;
        self.select_view(View::LearningPath);
        Ok(())
    }

    /// Show a survival-kit category
    ///
    /// # Errors
    /// `AppError::UnknownSurvivalCategory`; nothing changes.
    pub fn select_survival(&mut self, id: &str) -> Result<(), AppError> {
        if self.catalog.survival_category(id).is_none() {
            return Err(AppError::UnknownSurvivalCategory(id.to_string()));
        }
        self.active_survival = Some(id.to_string());
        self.active_path = None;
        self.select_view(View::SurvivalKit);
        Ok(())
    }

    /// Open the lab for the active module, replacing any open session
    pub fn open_lab(&mut self) -> &LabSession {
        let context = ModuleContext::from(self.active_module());
        // Replacing the old session drops it, which aborts its driver.
        self.lab.insert(LabSession::open(context, &self.sandbox_config))
    }

    /// Close the lab
    pub fn close_lab(&mut self) {
        self.lab = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_test_utils::setup_small_catalog;

    fn state() -> AppState {
        AppState::new(setup_small_catalog(), &AcademyConfig::default())
    }

    #[test]
    fn starts_on_first_module() {
        let app = state();
        assert_eq!(app.view(), View::Module);
        assert_eq!(app.active_module().id, "vcs");
        assert!(app.simulator().is_none());
        assert!(app.lab().is_none());
    }

    #[test]
    fn unknown_module_falls_back() {
        let mut app = state();
        app.select_module("docker");
        app.select_module("nope");
        assert_eq!(app.active_module().id, "vcs");
    }

    #[test]
    fn selecting_module_clears_path_and_survival() {
        let mut app = state();
        app.select_path("starter").unwrap();
        assert_eq!(app.view(), View::LearningPath);
        assert_eq!(app.active_path().map(|p| p.id.as_str()), Some("starter"));

        app.select_module("docker");
        assert_eq!(app.view(), View::Module);
        assert!(app.active_path().is_none());
        assert!(app.active_survival().is_none());
    }

    #[test]
    fn unknown_path_changes_nothing() {
        let mut app = state();
        app.select_view(View::Glossary);
        assert_eq!(
            app.select_path("nowhere"),
            Err(AppError::UnknownPath("nowhere".to_string()))
        );
        assert_eq!(app.view(), View::Glossary);
    }

    #[test]
    fn view_names_parse() {
        for view in [
            View::Module,
            View::CheatSheet,
            View::Simulator,
            View::Glossary,
            View::LearningPath,
            View::SurvivalKit,
        ] {
            assert_eq!(view.as_str().parse::<View>(), Ok(view));
        }
        assert!("settings".parse::<View>().is_err());
    }
}
