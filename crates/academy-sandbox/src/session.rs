//! Interactive lab session
//!
//! Owns the transcript for one module. Responses land after a fixed latency
//! and are strictly serialised: a line submitted while another is pending
//! waits in a queue, and its command echo is only appended once the
//! previous response is in. `clear` takes effect immediately and cancels
//! anything in flight.

use crate::config::SandboxConfig;
use crate::context::ModuleContext;
use crate::entry::LogEntry;
use crate::interpreter::Interpreter;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Result of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened
    Ignored,
    /// Transcript emptied
    Cleared,
    /// Command echoed; response scheduled
    Accepted,
    /// Waiting behind the pending line
    Queued,
}

/// Observable session state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Transcript
    pub entries: Vec<LogEntry>,
    /// Whether a response is outstanding
    pub pending: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    entries: Vec<LogEntry>,
    pending: bool,
    queue: VecDeque<String>,
    generation: u64,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            entries: self.entries.clone(),
            pending: self.pending,
        }
    }
}

#[derive(Debug)]
struct Shared {
    context: ModuleContext,
    interpreter: Interpreter,
    latency: Duration,
    state: Mutex<SessionState>,
    updates: watch::Sender<SessionSnapshot>,
}

impl Shared {
    fn publish(&self, state: &SessionState) {
        self.updates.send_replace(state.snapshot());
    }
}

/// Lab session bound to one module
///
/// Responses are driven on the Tokio runtime the session was opened in, so
/// lines may be submitted from any thread. A session opened outside a
/// runtime uses whichever runtime is current at submission, and answers
/// immediately when there is none.
///
/// Dropping the session aborts its driver; nothing is appended afterwards.
#[derive(Debug)]
pub struct LabSession {
    shared: Arc<Shared>,
    runtime: Option<Handle>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl LabSession {
    /// Open a session for `context`
    #[must_use]
    pub fn open(context: ModuleContext, config: &SandboxConfig) -> Self {
        let mut state = SessionState::default();
        if config.welcome_banner {
            state.entries = welcome_banner(&context);
        }
        let (updates, _) = watch::channel(state.snapshot());
        tracing::debug!(module = %context.title, domain = %context.domain, "lab opened");
        Self {
            shared: Arc::new(Shared {
                context,
                interpreter: Interpreter::new(),
                latency: config.latency(),
                state: Mutex::new(state),
                updates,
            }),
            runtime: Handle::try_current().ok(),
            driver: Mutex::new(None),
        }
    }

    /// Module this session is bound to
    #[inline]
    #[must_use]
    pub fn context(&self) -> &ModuleContext {
        &self.shared.context
    }

    /// Current transcript
    #[must_use]
    pub fn transcript(&self) -> Vec<LogEntry> {
        self.shared.state.lock().entries.clone()
    }

    /// Whether a response is outstanding
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.state.lock().snapshot()
    }

    /// Receive a snapshot after every transcript change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Submit one line
    pub fn submit(&self, line: &str) -> SubmitOutcome {
        let line = line.trim();
        if line.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let mut state = self.shared.state.lock();

        if line.eq_ignore_ascii_case("clear") {
            state.generation += 1;
            state.entries.clear();
            state.queue.clear();
            state.pending = false;
            if let Some(driver) = self.driver.lock().take() {
                driver.abort();
            }
            self.shared.publish(&state);
            tracing::debug!("transcript cleared");
            return SubmitOutcome::Cleared;
        }

        if state.pending {
            state.queue.push_back(line.to_string());
            tracing::debug!(queued = state.queue.len(), "line queued behind pending response");
            return SubmitOutcome::Queued;
        }

        state.entries.push(LogEntry::command(line));
        state.pending = true;
        self.shared.publish(&state);
        let generation = state.generation;

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            tracing::warn!("no Tokio runtime, answering without latency");
            drop(state);
            respond(&self.shared, generation, line);
            return SubmitOutcome::Accepted;
        };

        let driver = runtime.spawn(drive(
            Arc::clone(&self.shared),
            generation,
            line.to_string(),
        ));
        if let Some(previous) = self.driver.lock().replace(driver) {
            previous.abort();
        }
        SubmitOutcome::Accepted
    }

    /// Wait until no response is outstanding
    pub async fn settled(&self) -> SessionSnapshot {
        let mut updates = self.subscribe();
        // The sender lives as long as `self`, so the wait cannot fail.
        let _ = updates.wait_for(|snapshot| !snapshot.pending).await;
        self.snapshot()
    }
}

impl Drop for LabSession {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.get_mut().take() {
            driver.abort();
        }
        tracing::debug!(module = %self.shared.context.title, "lab closed");
    }
}

/// The three-line greeting shown when a lab opens
#[must_use]
pub fn welcome_banner(context: &ModuleContext) -> Vec<LogEntry> {
    vec![
        LogEntry::response(format!("--- DevOps Interactive Lab: {} ---", context.title)),
        LogEntry::response(
            "Welcome to the interactive terminal. Type 'help' to see available commands.",
        ),
        LogEntry::response(format!(
            "Scenario: You are working on a {} task. Try practicing the examples mentioned in the guide.",
            context.category
        )),
    ]
}

/// Answer `line`, then keep answering queued lines until the queue is empty
async fn drive(shared: Arc<Shared>, generation: u64, mut line: String) {
    loop {
        sleep(shared.latency).await;
        match respond(&shared, generation, &line) {
            Some(next) => line = next,
            None => return,
        }
    }
}

/// Land the response for `line`; returns the next queued line, already echoed
fn respond(shared: &Shared, generation: u64, line: &str) -> Option<String> {
    let mut state = shared.state.lock();
    if state.generation != generation {
        tracing::debug!(generation, "discarding stale lab response");
        return None;
    }

    // `clear` is handled by `submit` and never reaches here.
    if let Some(entry) = shared.interpreter.evaluate(line, &shared.context).into_entry() {
        state.entries.push(entry);
    }

    let next = state.queue.pop_front();
    match &next {
        Some(queued) => state.entries.push(LogEntry::command(queued.as_str())),
        None => state.pending = false,
    }
    shared.publish(&state);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use academy_catalog::Domain;
    use pretty_assertions::assert_eq;

    fn context() -> ModuleContext {
        ModuleContext::new("Git Mastery", "Version Control", Domain::VersionControl, "git log")
    }

    #[test]
    fn banner_mentions_title_and_category() {
        let banner = welcome_banner(&context());
        assert_eq!(banner.len(), 3);
        assert_eq!(banner[0].text, "--- DevOps Interactive Lab: Git Mastery ---");
        assert!(banner[2].text.contains("working on a Version Control task"));
        assert!(banner.iter().all(|e| e.kind == EntryKind::Response));
    }

    #[test]
    fn banner_can_be_disabled() {
        let session = LabSession::open(context(), &SandboxConfig::new().with_welcome_banner(false));
        assert!(session.transcript().is_empty());
        assert!(!session.is_pending());
    }

    #[test]
    fn blank_and_clear_need_no_runtime() {
        let session = LabSession::open(context(), &SandboxConfig::default());
        assert_eq!(session.submit("   "), SubmitOutcome::Ignored);
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.submit("Clear"), SubmitOutcome::Cleared);
        assert!(session.transcript().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn accepted_line_echoes_immediately() {
        let session = LabSession::open(context(), &SandboxConfig::new().with_welcome_banner(false));
        assert_eq!(session.submit("  git status  "), SubmitOutcome::Accepted);
        assert_eq!(session.transcript(), vec![LogEntry::command("git status")]);
        assert!(session.is_pending());

        let done = session.settled().await;
        assert!(!done.pending);
        assert_eq!(done.entries.len(), 2);
        assert!(done.entries[1].text.starts_with("On branch main"));
    }

    #[test]
    fn submit_without_runtime_answers_immediately() {
        let session = LabSession::open(context(), &SandboxConfig::new().with_welcome_banner(false));
        assert_eq!(session.submit("status"), SubmitOutcome::Accepted);
        assert!(!session.is_pending());
        assert_eq!(
            session.transcript(),
            vec![
                LogEntry::command("status"),
                LogEntry::response("System: HEALTHY | Uptime: 4h 12m | Load: 0.23, 0.15, 0.08"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn lines_from_another_thread_use_the_opening_runtime() {
        let session = LabSession::open(context(), &SandboxConfig::new().with_welcome_banner(false));
        let outcome = std::thread::scope(|scope| {
            scope.spawn(|| session.submit("ls")).join().unwrap()
        });
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert!(session.is_pending());

        let done = session.settled().await;
        assert_eq!(done.entries.len(), 2);
        assert_eq!(done.entries[1].text, "README.md  main.js  config.json");
    }
}
