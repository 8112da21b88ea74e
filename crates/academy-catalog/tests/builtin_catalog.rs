//! Tests against the catalogue compiled into the binary.

use academy_catalog::{Catalog, Domain, Icon};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn builtin() -> Catalog {
    Catalog::builtin().expect("builtin catalogue must load")
}

#[test]
fn builtin_catalogue_loads() {
    let catalog = builtin();
    assert_eq!(catalog.default_module().id, "intro");
    assert!(catalog.modules().count() >= 3);
    assert!(catalog.cheat_sheets().count() >= 5);
    assert!(!catalog.glossary().is_empty());
}

#[test]
fn every_learning_path_resolves_completely() {
    let catalog = builtin();
    for path in catalog.learning_paths() {
        let resolved = catalog.resolve_path(path);
        assert_eq!(resolved.modules.len(), path.modules.len(), "path {}", path.id);
        assert_eq!(
            resolved.cheat_sheets.len(),
            path.cheat_sheets.len(),
            "path {}",
            path.id
        );
    }
}

#[test]
fn domains_are_declared_explicitly() {
    let catalog = builtin();
    assert_eq!(catalog.module("git-mastery").unwrap().domain, Domain::VersionControl);
    assert_eq!(catalog.module("docker").unwrap().domain, Domain::Containers);
    assert_eq!(catalog.module("nginx").unwrap().domain, Domain::WebServer);
    assert_eq!(catalog.module("intro").unwrap().domain, Domain::Generic);
}

#[test]
fn every_icon_name_is_known() {
    let catalog = builtin();
    let names = catalog
        .modules()
        .map(|m| m.icon.as_str())
        .chain(catalog.learning_paths().map(|p| p.icon.as_str()))
        .chain(catalog.survival_kit().map(|s| s.icon.as_str()));
    for name in names {
        assert_eq!(Icon::from_name(name).name(), name);
    }
}

#[test]
fn cheat_sheet_search_drops_empty_sheets() {
    let catalog = builtin();
    let hits = catalog.search_cheat_sheets("DOCKER");
    assert!(!hits.is_empty());
    for sheet in &hits {
        assert!(!sheet.commands.is_empty());
        for c in &sheet.commands {
            assert!(
                c.cmd.to_lowercase().contains("docker") || c.desc.to_lowercase().contains("docker")
            );
        }
    }
    assert!(catalog.search_cheat_sheets("no-such-command-xyz").is_empty());
}

#[test]
fn empty_search_returns_everything() {
    let catalog = builtin();
    assert_eq!(
        catalog.search_cheat_sheets("").len(),
        catalog.cheat_sheets().count()
    );
    assert_eq!(catalog.search_glossary("").len(), catalog.glossary().len());
}

#[test]
fn glossary_search_matches_term_or_definition() {
    let catalog = builtin();
    let terms: Vec<_> = catalog
        .search_glossary("sre")
        .into_iter()
        .map(|t| t.term.as_str())
        .collect();
    assert!(terms.contains(&"SRE"));

    let by_definition = catalog.search_glossary("traffic between them");
    assert_eq!(by_definition.len(), 1);
    assert_eq!(by_definition[0].term, "Blue-Green");
}

proptest! {
    #[test]
    fn glossary_search_results_always_match(query in "[a-zA-Z ]{0,6}") {
        let catalog = builtin();
        let needle = query.to_lowercase();
        for term in catalog.search_glossary(&query) {
            prop_assert!(
                term.term.to_lowercase().contains(&needle)
                    || term.definition.to_lowercase().contains(&needle)
            );
        }
    }

    #[test]
    fn cheat_sheet_search_never_grows(query in "[a-z\\-]{0,5}") {
        let catalog = builtin();
        let total: usize = catalog.cheat_sheets().map(|s| s.commands.len()).sum();
        let found: usize = catalog
            .search_cheat_sheets(&query)
            .iter()
            .map(|s| s.commands.len())
            .sum();
        prop_assert!(found <= total);
    }
}
