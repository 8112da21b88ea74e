//! Catalogue record types
//!
//! Every record deserialises from the catalogue YAML document. Identifiers
//! are plain strings chosen by the content authors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Learning module difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// First steps
    Beginner,
    /// Assumes the foundations
    Intermediate,
    /// Production-grade material
    Advanced,
}

impl Difficulty {
    /// Display label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tooling domain a module teaches
///
/// The sandbox branches on this capability field to decide which
/// domain-specific commands it recognises. Modules sharing a domain behave
/// the same regardless of their identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    /// git and friends
    VersionControl,
    /// docker and container runtimes
    Containers,
    /// nginx style web servers and reverse proxies
    WebServer,
    /// No domain-specific commands
    #[default]
    Generic,
}

impl Domain {
    /// Kebab-case name as used in the catalogue document
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VersionControl => "version-control",
            Self::Containers => "containers",
            Self::WebServer => "web-server",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "version-control" => Ok(Self::VersionControl),
            "containers" => Ok(Self::Containers),
            "web-server" => Ok(Self::WebServer),
            "generic" => Ok(Self::Generic),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

/// A learning module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier
    pub id: String,
    /// Title shown in navigation
    pub title: String,
    /// Sidebar grouping
    pub category: String,
    /// Icon name, see [`crate::Icon`]
    pub icon: String,
    /// Long-form lesson text
    pub content: String,
    /// Worked example, usually a shell snippet
    pub example: String,
    /// Difficulty badge
    pub difficulty: Difficulty,
    /// Tooling domain capability
    #[serde(default)]
    pub domain: Domain,
}

impl Module {
    /// First `max_chars` characters of the lesson text
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }

    /// First line of the worked example
    #[must_use]
    pub fn example_headline(&self) -> &str {
        self.example.lines().next().unwrap_or_default()
    }
}

/// One cheat-sheet line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Command text
    pub cmd: String,
    /// What it does
    pub desc: String,
}

/// A themed list of commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatSheet {
    /// Unique identifier
    pub id: String,
    /// Sheet title
    pub title: String,
    /// Grouping label
    pub category: String,
    /// Commands in display order
    pub commands: Vec<Command>,
}

/// Glossary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    /// The jargon
    pub term: String,
    /// Plain explanation
    pub definition: String,
    /// Grouping label
    pub category: String,
}

/// Guided sequence of modules and cheat sheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    /// Unique identifier
    pub id: String,
    /// Path title
    pub title: String,
    /// Short pitch
    pub description: String,
    /// Icon name
    pub icon: String,
    /// Module ids in study order
    pub modules: Vec<String>,
    /// Cheat sheet ids to keep open alongside
    #[serde(default)]
    pub cheat_sheets: Vec<String>,
}

/// Survival kit item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivalItem {
    /// Tool or step name
    pub name: String,
    /// What it is for
    pub desc: String,
    /// Copyable example
    #[serde(default)]
    pub example: Option<String>,
}

/// Survival kit category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivalKitCategory {
    /// Unique identifier
    pub id: String,
    /// Category title
    pub title: String,
    /// Icon name
    pub icon: String,
    /// Short description
    pub description: String,
    /// Items in display order
    pub items: Vec<SurvivalItem>,
}

/// Speaker of a mentor chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The learner
    User,
    /// The mentor model
    Model,
}

/// One mentor chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker
    pub role: Role,
    /// Message text
    pub text: String,
}

impl ChatMessage {
    /// Learner turn
    #[inline]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Mentor turn
    #[inline]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(content: &str, example: &str) -> Module {
        Module {
            id: "m".to_string(),
            title: "M".to_string(),
            category: "Foundations".to_string(),
            icon: "Terminal".to_string(),
            content: content.to_string(),
            example: example.to_string(),
            difficulty: Difficulty::Beginner,
            domain: Domain::Generic,
        }
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let m = module("héllo wörld", "");
        assert_eq!(m.excerpt(5), "héllo");
        assert_eq!(m.excerpt(100), "héllo wörld");
    }

    #[test]
    fn example_headline_is_first_line() {
        let m = module("", "# comment\ngit rebase -i HEAD~3");
        assert_eq!(m.example_headline(), "# comment");
        assert_eq!(module("", "").example_headline(), "");
    }

    #[test]
    fn domain_parses_kebab_case() {
        assert_eq!("web-server".parse::<Domain>(), Ok(Domain::WebServer));
        assert!("nginx".parse::<Domain>().is_err());
        assert_eq!(Domain::default(), Domain::Generic);
    }
}
