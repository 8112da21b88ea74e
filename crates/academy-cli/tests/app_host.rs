use academy_cli::{AcademyConfig, AppState, View};
use academy_sandbox::{EntryKind, SandboxConfig, SubmitOutcome};
use academy_simulator::{StartOutcome, Strategy, Version, SLOT_COUNT};
use academy_test_utils::{elapse_ms, setup_builtin_catalog, setup_small_catalog};
use pretty_assertions::assert_eq;

fn quiet_config() -> AcademyConfig {
    AcademyConfig::new().with_sandbox(SandboxConfig::new().with_welcome_banner(false))
}

#[tokio::test(start_paused = true)]
async fn test_simulator_mounted_only_on_its_view() {
    let mut app = AppState::new(setup_small_catalog(), &AcademyConfig::default());
    assert!(app.simulator().is_none());

    app.select_view(View::Simulator);
    let simulator = app.simulator().unwrap();
    assert_eq!(simulator.start(), StartOutcome::Started);
    let mut updates = simulator.subscribe();
    elapse_ms(1_000).await;
    assert_eq!(app.simulator().unwrap().snapshot().new_count(), 1);

    app.select_view(View::Glossary);
    assert!(app.simulator().is_none());

    // The dropped simulator's driver is gone with it.
    elapse_ms(10_000).await;
    updates.borrow_and_update();
    assert!(updates.has_changed().is_err());

    // Coming back mounts a fresh, idle simulator.
    app.select_view(View::Simulator);
    let snapshot = app.simulator().unwrap().snapshot();
    assert_eq!(snapshot.slots, [Version::Old; SLOT_COUNT]);
    assert!(!snapshot.running);
}

#[tokio::test(start_paused = true)]
async fn test_simulator_survives_reselecting_its_view() {
    let mut app = AppState::new(setup_small_catalog(), &AcademyConfig::default());
    app.select_view(View::Simulator);
    let simulator = app.simulator().unwrap();
    simulator.select_strategy(Strategy::BlueGreen).unwrap();
    simulator.start();

    app.select_view(View::Simulator);
    elapse_ms(3_100).await;
    assert_eq!(app.simulator().unwrap().snapshot().progress, 100);
}

#[tokio::test(start_paused = true)]
async fn test_module_change_remounts_open_lab() {
    let mut app = AppState::new(setup_small_catalog(), &quiet_config());
    app.select_module("vcs");
    let lab = app.open_lab();
    assert_eq!(lab.submit("git status"), SubmitOutcome::Accepted);
    let mut updates = lab.subscribe();
    updates.borrow_and_update();
    elapse_ms(200).await;

    app.select_module("docker");
    let lab = app.lab().unwrap();
    assert_eq!(lab.context().title, "Docker");
    assert!(lab.transcript().is_empty());
    assert!(!lab.is_pending());

    // The old session's pending response never lands anywhere.
    elapse_ms(1_000).await;
    assert!(app.lab().unwrap().transcript().is_empty());
    assert!(updates.has_changed().is_err());

    // Container commands now work, git ones do not.
    let lab = app.lab().unwrap();
    lab.submit("git status");
    let entries = lab.settled().await.entries;
    assert_eq!(entries[1].kind, EntryKind::Error);
    lab.submit("docker ps");
    let entries = lab.settled().await.entries;
    assert!(entries[3].text.starts_with("CONTAINER ID"));
}

#[tokio::test(start_paused = true)]
async fn test_selecting_same_module_keeps_lab() {
    let mut app = AppState::new(setup_small_catalog(), &quiet_config());
    app.open_lab().submit("status");
    app.select_module("vcs");
    let entries = app.lab().unwrap().settled().await.entries;
    assert_eq!(entries.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_close_lab_cancels_pending_response() {
    let mut app = AppState::new(setup_small_catalog(), &quiet_config());
    let lab = app.open_lab();
    lab.submit("ls");
    let mut updates = lab.subscribe();
    updates.borrow_and_update();

    app.close_lab();
    assert!(app.lab().is_none());
    elapse_ms(1_000).await;
    assert!(updates.has_changed().is_err());
}

#[test]
fn test_lab_welcome_uses_module_category() {
    let mut app = AppState::new(setup_builtin_catalog(), &AcademyConfig::default());
    app.select_module("docker");
    let transcript = app.open_lab().transcript();
    assert_eq!(transcript.len(), 3);
    assert!(transcript[0].text.contains(&app.active_module().title));
    assert!(transcript[2]
        .text
        .contains(&format!("working on a {} task", app.active_module().category)));
}

#[test]
fn test_survival_selection_clears_path() {
    let mut app = AppState::new(setup_builtin_catalog(), &AcademyConfig::default());
    let path_id = app.catalog().learning_paths().next().unwrap().id.clone();
    let survival_id = app.catalog().survival_kit().next().unwrap().id.clone();

    app.select_path(&path_id).unwrap();
    app.select_survival(&survival_id).unwrap();
    assert_eq!(app.view(), View::SurvivalKit);
    assert!(app.active_path().is_none());
    assert_eq!(app.active_survival().unwrap().id, survival_id);
}
