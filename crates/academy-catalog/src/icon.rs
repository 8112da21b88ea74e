//! Icon names used by catalogue records
//!
//! Records reference icons by name. Unknown names render as [`Icon::Terminal`].

use std::fmt;

/// Named icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Icon {
    Terminal,
    Container,
    GitBranch,
    ShieldCheck,
    Cloud,
    Activity,
    Cpu,
    Workflow,
    Lock,
    FileArchive,
    Server,
    Move,
    FileText,
    Command,
    Map,
    Layers,
    Zap,
    Compass,
    Box,
    BookOpen,
    Eye,
    Shield,
    HardDrive,
    Network,
    Settings,
    AlertTriangle,
    ClipboardCheck,
}

impl Icon {
    const ALL: [Icon; 27] = [
        Icon::Terminal,
        Icon::Container,
        Icon::GitBranch,
        Icon::ShieldCheck,
        Icon::Cloud,
        Icon::Activity,
        Icon::Cpu,
        Icon::Workflow,
        Icon::Lock,
        Icon::FileArchive,
        Icon::Server,
        Icon::Move,
        Icon::FileText,
        Icon::Command,
        Icon::Map,
        Icon::Layers,
        Icon::Zap,
        Icon::Compass,
        Icon::Box,
        Icon::BookOpen,
        Icon::Eye,
        Icon::Shield,
        Icon::HardDrive,
        Icon::Network,
        Icon::Settings,
        Icon::AlertTriangle,
        Icon::ClipboardCheck,
    ];

    /// Look up an icon by name, falling back to `Terminal`
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|icon| icon.name() == name)
            .unwrap_or(Icon::Terminal)
    }

    /// Catalogue name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Terminal => "Terminal",
            Icon::Container => "Container",
            Icon::GitBranch => "GitBranch",
            Icon::ShieldCheck => "ShieldCheck",
            Icon::Cloud => "Cloud",
            Icon::Activity => "Activity",
            Icon::Cpu => "Cpu",
            Icon::Workflow => "Workflow",
            Icon::Lock => "Lock",
            Icon::FileArchive => "FileArchive",
            Icon::Server => "Server",
            Icon::Move => "Move",
            Icon::FileText => "FileText",
            Icon::Command => "Command",
            Icon::Map => "Map",
            Icon::Layers => "Layers",
            Icon::Zap => "Zap",
            Icon::Compass => "Compass",
            Icon::Box => "Box",
            Icon::BookOpen => "BookOpen",
            Icon::Eye => "Eye",
            Icon::Shield => "Shield",
            Icon::HardDrive => "HardDrive",
            Icon::Network => "Network",
            Icon::Settings => "Settings",
            Icon::AlertTriangle => "AlertTriangle",
            Icon::ClipboardCheck => "ClipboardCheck",
        }
    }

    /// Single-glyph stand-in for terminal output
    #[must_use]
    pub fn glyph(&self) -> char {
        match self {
            Icon::GitBranch => '⎇',
            Icon::Container | Icon::Box => '▣',
            Icon::Server | Icon::HardDrive => '▤',
            Icon::Shield | Icon::ShieldCheck | Icon::Lock => '◈',
            Icon::Cloud => '☁',
            Icon::Network | Icon::Workflow => '⇄',
            Icon::AlertTriangle => '⚠',
            Icon::ClipboardCheck => '✓',
            Icon::Map | Icon::Compass => '◎',
            Icon::Zap => '⚡',
            _ => '›',
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
