//! Plain-text rendering for terminal output

use academy_catalog::{
    Catalog, CheatSheet, GlossaryTerm, Icon, Module, ResolvedPath, SurvivalKitCategory,
};
use academy_sandbox::LogEntry;
use academy_simulator::SimulatorSnapshot;
use std::fmt::Write;

/// Characters of lesson text shown per module on a learning path
pub const PATH_EXCERPT_CHARS: usize = 160;

const PROGRESS_BAR_WIDTH: usize = 20;

fn heading(out: &mut String, icon: &str, title: &str) {
    let _ = writeln!(out, "{} {title}", Icon::from_name(icon).glyph());
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count() + 2));
}

/// Sidebar: modules grouped by category
#[must_use]
pub fn module_index(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (category, modules) in catalog.modules_by_category() {
        let _ = writeln!(out, "{category}");
        for module in modules {
            let _ = writeln!(
                out,
                "  {} {:<20} {}",
                Icon::from_name(&module.icon).glyph(),
                module.id,
                module.title
            );
        }
    }
    out
}

/// Full lesson page
#[must_use]
pub fn module_page(module: &Module) -> String {
    let mut out = String::new();
    heading(&mut out, &module.icon, &module.title);
    let _ = writeln!(out, "{} | {}\n", module.category, module.difficulty);
    let _ = writeln!(out, "{}\n", module.content.trim_end());
    let _ = writeln!(out, "Example:");
    for line in module.example.lines() {
        let _ = writeln!(out, "    {line}");
    }
    out
}

/// Cheat sheets with their commands
#[must_use]
pub fn cheat_sheets(sheets: &[CheatSheet]) -> String {
    if sheets.is_empty() {
        return "No matching commands.\n".to_string();
    }
    let mut out = String::new();
    for sheet in sheets {
        let _ = writeln!(out, "[{}] {}", sheet.category, sheet.title);
        for command in &sheet.commands {
            let _ = writeln!(out, "  {:<32} {}", command.cmd, command.desc);
        }
        out.push('\n');
    }
    out
}

/// Glossary entries
#[must_use]
pub fn glossary(terms: &[&GlossaryTerm]) -> String {
    if terms.is_empty() {
        return "No matching terms.\n".to_string();
    }
    let mut out = String::new();
    for term in terms {
        let _ = writeln!(out, "{} ({})\n  {}", term.term, term.category, term.definition);
    }
    out
}

/// Learning path with module excerpts and attached cheat sheets
#[must_use]
pub fn learning_path(resolved: &ResolvedPath<'_>) -> String {
    let mut out = String::new();
    heading(&mut out, &resolved.path.icon, &resolved.path.title);
    let _ = writeln!(out, "{}\n", resolved.path.description);
    for (step, module) in resolved.modules.iter().enumerate() {
        let excerpt = module.excerpt(PATH_EXCERPT_CHARS);
        let ellipsis = if excerpt.len() < module.content.len() { "..." } else { "" };
        let _ = writeln!(out, "{}. {} [{}]", step + 1, module.title, module.difficulty);
        let _ = writeln!(out, "   {excerpt}{ellipsis}");
    }
    if !resolved.cheat_sheets.is_empty() {
        let _ = writeln!(out, "\nCheat sheets:");
        for sheet in &resolved.cheat_sheets {
            let _ = writeln!(out, "  - {} ({} commands)", sheet.title, sheet.commands.len());
        }
    }
    out
}

/// Survival-kit category with examples
#[must_use]
pub fn survival_category(category: &SurvivalKitCategory) -> String {
    let mut out = String::new();
    heading(&mut out, &category.icon, &category.title);
    let _ = writeln!(out, "{}\n", category.description);
    for item in &category.items {
        let _ = writeln!(out, "- {}: {}", item.name, item.desc);
        if let Some(example) = &item.example {
            let _ = writeln!(out, "    $ {example}");
        }
    }
    out
}

/// Survival-kit index
#[must_use]
pub fn survival_index<'a>(categories: impl IntoIterator<Item = &'a SurvivalKitCategory>) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(
            out,
            "{} {:<14} {}",
            Icon::from_name(&category.icon).glyph(),
            category.id,
            category.title
        );
    }
    out
}

/// One frame of the strategy simulator
#[must_use]
pub fn simulator_frame(snapshot: &SimulatorSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {}",
        snapshot.strategy.label(),
        snapshot.strategy.description()
    );
    let _ = writeln!(out, "{}", snapshot.slot_row());
    let _ = writeln!(out, "{}", snapshot.progress_bar(PROGRESS_BAR_WIDTH));
    for line in snapshot.log_lines() {
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Transcript lines
#[must_use]
pub fn transcript(entries: &[LogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{entry}");
    }
    out
}
