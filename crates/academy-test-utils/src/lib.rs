//! Testing utilities for the DevOps Academy workspace
//!
//! Shared fixtures and paused-clock helpers.

#![allow(missing_docs)]

use academy_catalog::{Catalog, Difficulty, Domain, Module};
use std::time::Duration;

/// Two modules, one sheet, one path; enough for view-host tests.
pub const SMALL_CATALOG_YAML: &str = r#"
modules:
  - id: vcs
    title: Version Control
    category: Foundations
    icon: GitBranch
    content: Track every change.
    example: "git log --oneline\ngit status"
    difficulty: Beginner
    domain: version-control
  - id: docker
    title: Docker
    category: Containers
    icon: Box
    content: Package once, run anywhere.
    example: "docker build -t app .\ndocker run app"
    difficulty: Intermediate
    domain: containers
cheat_sheets:
  - id: git-cs
    title: Git Essentials
    category: Version Control
    commands:
      - cmd: git status
        desc: Show the working tree status
glossary:
  - term: CI
    definition: Continuous Integration
    category: Practice
learning_paths:
  - id: starter
    title: Starter
    description: First steps
    icon: Map
    modules: [vcs, docker, missing]
    cheat_sheets: [git-cs]
survival_kit: []
"#;

pub fn create_test_module_with(id: &str, domain: Domain, example: &str) -> Module {
    Module {
        id: id.to_string(),
        title: format!("{id} module"),
        category: format!("{domain} category"),
        icon: "Terminal".to_string(),
        content: format!("Lesson text for {id}."),
        example: example.to_string(),
        difficulty: Difficulty::Beginner,
        domain,
    }
}

pub fn create_test_module(domain: Domain) -> Module {
    let (id, example) = match domain {
        Domain::VersionControl => ("vcs", "git rebase -i HEAD~3\ngit push --force-with-lease"),
        Domain::Containers => ("docker", "docker build -t app .\ndocker run -p 80:80 app"),
        Domain::WebServer => ("nginx", "nginx -t\nsystemctl reload nginx"),
        Domain::Generic => ("intro", "echo hello\necho world"),
    };
    create_test_module_with(id, domain, example)
}

pub fn setup_builtin_catalog() -> Catalog {
    Catalog::builtin().unwrap()
}

pub fn setup_small_catalog() -> Catalog {
    Catalog::from_yaml_str(SMALL_CATALOG_YAML).unwrap()
}

/// Let a paused clock run forward; timers due in between fire in order.
pub async fn elapse_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
