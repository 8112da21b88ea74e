//! Command dispatch table
//!
//! An ordered list of rules, first match wins. Matching happens on the
//! trimmed, lowercased line; replies that echo the line keep its case.

use crate::context::ModuleContext;
use crate::entry::{EntryKind, LogEntry};
use academy_catalog::Domain;

/// Result of evaluating one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Empty the transcript
    Clear,
    /// Append one entry
    Reply {
        /// `Response` or `Error`
        kind: EntryKind,
        /// Entry text
        text: String,
    },
}

impl Outcome {
    fn response(text: impl Into<String>) -> Self {
        Self::Reply {
            kind: EntryKind::Response,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self::Reply {
            kind: EntryKind::Error,
            text: text.into(),
        }
    }

    /// The entry this outcome appends, if any
    #[must_use]
    pub fn into_entry(self) -> Option<LogEntry> {
        match self {
            Self::Clear => None,
            Self::Reply { kind, text } => Some(LogEntry { kind, text }),
        }
    }
}

/// A line as seen by the rules
#[derive(Debug)]
pub struct Invocation<'a> {
    /// Trimmed, case preserved
    pub line: &'a str,
    /// Trimmed and lowercased
    pub normalized: String,
    /// Current module
    pub context: &'a ModuleContext,
}

/// One dispatch rule
#[derive(Clone, Copy)]
pub struct Rule {
    /// Name used in logs
    pub name: &'static str,
    /// Whether the rule handles the invocation
    pub matches: fn(&Invocation<'_>) -> bool,
    /// Produce the outcome
    pub respond: fn(&Invocation<'_>) -> Outcome,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

const STATUS_LINE: &str = "System: HEALTHY | Uptime: 4h 12m | Load: 0.23, 0.15, 0.08";

const GIT_STATUS: &str = "On branch main\n\
Your branch is up to date with 'origin/main'.\n\
\n\
nothing to commit, working tree clean";

const DOCKER_PS: &str = "CONTAINER ID   IMAGE     COMMAND                  CREATED          STATUS          PORTS     NAMES\n\
7f1a23b89e   nginx     \"/docker-entrypoint.…\"   2 minutes ago    Up 2 minutes    80/tcp    web-proxy";

/// Help text for a module domain
#[must_use]
pub fn help_text(domain: Domain) -> String {
    let last = match domain {
        Domain::VersionControl => "git status, git add, git commit",
        Domain::Containers => "docker ps, docker build, docker run",
        Domain::WebServer => "nginx -t, service nginx status",
        Domain::Generic => "run-example: Execute the module code",
    };
    format!(
        "Available commands:\n\
         - help: Show this menu\n\
         - clear: Clear terminal\n\
         - status: Check system status\n\
         - ls: List files in current directory\n\
         - cat [file]: Read file content\n\
         - {last}"
    )
}

fn listing(domain: Domain) -> &'static str {
    match domain {
        Domain::Containers => "Dockerfile  src/  package.json",
        Domain::WebServer => "nginx.conf  sites-available/  sites-enabled/",
        Domain::VersionControl | Domain::Generic => "README.md  main.js  config.json",
    }
}

fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "clear",
            matches: |inv| inv.normalized == "clear",
            respond: |_| Outcome::Clear,
        },
        Rule {
            name: "help",
            matches: |inv| inv.normalized == "help",
            respond: |inv| Outcome::response(help_text(inv.context.domain)),
        },
        Rule {
            name: "ls",
            matches: |inv| inv.normalized == "ls",
            respond: |inv| Outcome::response(listing(inv.context.domain)),
        },
        Rule {
            name: "status",
            matches: |inv| inv.normalized == "status",
            respond: |_| Outcome::response(STATUS_LINE),
        },
        Rule {
            name: "run-example",
            matches: |inv| inv.normalized == "run-example",
            respond: |inv| {
                Outcome::response(format!(
                    "Executing simulated task for {}...\nResult: SUCCESS\nLogs: {} ... executed successfully.",
                    inv.context.title,
                    inv.context.example_headline()
                ))
            },
        },
        Rule {
            name: "git",
            matches: |inv| {
                inv.context.domain == Domain::VersionControl && inv.normalized.starts_with("git ")
            },
            respond: |inv| {
                if inv.normalized == "git status" {
                    Outcome::response(GIT_STATUS)
                } else {
                    Outcome::response("Git command executed successfully.")
                }
            },
        },
        Rule {
            name: "docker",
            matches: |inv| {
                inv.context.domain == Domain::Containers && inv.normalized.starts_with("docker ")
            },
            respond: |inv| {
                if inv.normalized == "docker ps" {
                    Outcome::response(DOCKER_PS)
                } else {
                    Outcome::response("Docker instruction processed.")
                }
            },
        },
    ]
}

/// Evaluates lines against the dispatch table
#[derive(Debug, Clone)]
pub struct Interpreter {
    rules: Vec<Rule>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter with the standard rules
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    /// Evaluate `line` for `context`
    ///
    /// Lines no rule claims get the not-found error.
    #[must_use]
    pub fn evaluate(&self, line: &str, context: &ModuleContext) -> Outcome {
        let line = line.trim();
        let inv = Invocation {
            line,
            normalized: line.to_lowercase(),
            context,
        };
        for rule in &self.rules {
            if (rule.matches)(&inv) {
                tracing::debug!(rule = rule.name, domain = %context.domain, "dispatched");
                return (rule.respond)(&inv);
            }
        }
        tracing::debug!(domain = %context.domain, "no rule matched");
        Outcome::error(format!(
            "Command not found: {line}. Type 'help' for assistance."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(domain: Domain) -> ModuleContext {
        ModuleContext::new(
            "Docker",
            "Containers",
            domain,
            "# Build an image\ndocker build -t app .",
        )
    }

    fn text(outcome: Outcome) -> String {
        match outcome {
            Outcome::Reply { text, .. } => text,
            Outcome::Clear => panic!("unexpected clear"),
        }
    }

    #[test]
    fn rules_are_ordered_with_catch_all_last() {
        let names: Vec<_> = Interpreter::new().rule_names().collect();
        assert_eq!(
            names,
            vec!["clear", "help", "ls", "status", "run-example", "git", "docker"]
        );
    }

    #[test]
    fn matching_ignores_case_and_padding() {
        let interp = Interpreter::new();
        assert_eq!(interp.evaluate("  CLEAR ", &ctx(Domain::Generic)), Outcome::Clear);
        assert_eq!(
            text(interp.evaluate("Status", &ctx(Domain::Generic))),
            STATUS_LINE
        );
    }

    #[test]
    fn help_last_line_follows_domain() {
        let interp = Interpreter::new();
        let cases = [
            (Domain::VersionControl, "- git status, git add, git commit"),
            (Domain::Containers, "- docker ps, docker build, docker run"),
            (Domain::WebServer, "- nginx -t, service nginx status"),
            (Domain::Generic, "- run-example: Execute the module code"),
        ];
        for (domain, last) in cases {
            let help = text(interp.evaluate("help", &ctx(domain)));
            assert!(help.starts_with("Available commands:\n- help: Show this menu"));
            assert_eq!(help.lines().last(), Some(last));
            assert_eq!(help.lines().count(), 7);
        }
    }

    #[test]
    fn listing_follows_domain() {
        let interp = Interpreter::new();
        assert_eq!(
            text(interp.evaluate("ls", &ctx(Domain::Containers))),
            "Dockerfile  src/  package.json"
        );
        assert_eq!(
            text(interp.evaluate("ls", &ctx(Domain::WebServer))),
            "nginx.conf  sites-available/  sites-enabled/"
        );
        assert_eq!(
            text(interp.evaluate("ls", &ctx(Domain::VersionControl))),
            "README.md  main.js  config.json"
        );
    }

    #[test]
    fn run_example_echoes_first_line() {
        let out = text(Interpreter::new().evaluate("run-example", &ctx(Domain::Containers)));
        assert_eq!(
            out,
            "Executing simulated task for Docker...\nResult: SUCCESS\nLogs: # Build an image ... executed successfully."
        );
    }

    #[test]
    fn git_rules_need_version_control_domain() {
        let interp = Interpreter::new();
        let vcs = ctx(Domain::VersionControl);
        assert!(text(interp.evaluate("git status", &vcs)).starts_with("On branch main"));
        assert_eq!(
            text(interp.evaluate("git push origin main", &vcs)),
            "Git command executed successfully."
        );
        assert_eq!(
            interp.evaluate("git status", &ctx(Domain::Containers)),
            Outcome::error("Command not found: git status. Type 'help' for assistance.")
        );
        // Bare `git` has no trailing space and is not a git command.
        assert!(matches!(
            interp.evaluate("git", &vcs),
            Outcome::Reply {
                kind: EntryKind::Error,
                ..
            }
        ));
    }

    #[test]
    fn docker_rules_need_containers_domain() {
        let interp = Interpreter::new();
        let containers = ctx(Domain::Containers);
        let ps = text(interp.evaluate("docker ps", &containers));
        assert!(ps.starts_with("CONTAINER ID"));
        assert_eq!(ps.lines().count(), 2);
        assert_eq!(
            text(interp.evaluate("docker run nginx", &containers)),
            "Docker instruction processed."
        );
        assert!(matches!(
            interp.evaluate("docker ps", &ctx(Domain::WebServer)),
            Outcome::Reply {
                kind: EntryKind::Error,
                ..
            }
        ));
    }

    #[test]
    fn unknown_command_keeps_submitted_case() {
        let out = Interpreter::new().evaluate("  Kubectl GET pods ", &ctx(Domain::Generic));
        assert_eq!(
            out.into_entry(),
            Some(LogEntry::error(
                "Command not found: Kubectl GET pods. Type 'help' for assistance."
            ))
        );
    }
}
