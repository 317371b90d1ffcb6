use trialpulse_core::{
    capacity::CapacityFactor,
    command::TwinCommand,
    config::TwinConfig,
    error::TwinError,
    event::TwinEvent,
    scenario::Scenario,
    session::TwinSession,
};

fn build_session(id: &str) -> TwinSession {
    let _ = env_logger::builder().is_test(true).try_init();
    TwinSession::with_id(id.into(), TwinConfig::builtin()).expect("session")
}

#[test]
fn new_session_starts_at_baseline_nominal() {
    let session = build_session("start-test");

    assert_eq!(session.scenario(), Scenario::Baseline);
    assert_eq!(session.capacity(), CapacityFactor::nominal());
    assert_eq!(session.projection().backlog_series(), vec![20, 45, 80, 120]);
    assert_eq!(session.event_count("session_started"), 1);
    assert_eq!(session.event_count("projection_computed"), 1);
}

#[test]
fn random_ids_are_unique() {
    let a = TwinSession::new(TwinConfig::builtin()).unwrap();
    let b = TwinSession::new(TwinConfig::builtin()).unwrap();
    assert_ne!(a.session_id, b.session_id);
}

#[test]
fn select_scenario_recomputes_projection() {
    let mut session = build_session("select-test");

    let events = session
        .apply(TwinCommand::SelectScenario { scenario: Scenario::Reassign })
        .unwrap();

    assert_eq!(
        events[0],
        TwinEvent::ScenarioSelected { from: Scenario::Baseline, to: Scenario::Reassign }
    );
    assert!(matches!(events.last(), Some(TwinEvent::ProjectionComputed { final_backlog: 5, .. })));
    assert_eq!(session.projection().backlog_series(), vec![20, 25, 15, 5]);
}

#[test]
fn capacity_change_applies_to_active_scenario() {
    let mut session = build_session("capacity-test");
    session
        .apply(TwinCommand::SelectScenario { scenario: Scenario::Reassign })
        .unwrap();

    let events = session.apply(TwinCommand::SetCapacity { percent: 50 }).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(session.capacity().percent(), 50);
    assert_eq!(session.projection().final_backlog(), 8);
    assert_eq!(session.event_count("capacity_adjusted"), 1);
}

#[test]
fn out_of_range_capacity_is_rejected_without_state_change() {
    let mut session = build_session("reject-test");
    session.apply(TwinCommand::SetCapacity { percent: 120 }).unwrap();
    let before = session.projection().clone();

    for bad in [49, 151] {
        let err = session.apply(TwinCommand::SetCapacity { percent: bad }).unwrap_err();
        assert!(matches!(err, TwinError::CapacityOutOfRange { value, .. } if value == bad));
    }

    assert_eq!(session.capacity().percent(), 120);
    assert_eq!(session.projection(), &before);
    assert_eq!(session.event_count("command_rejected"), 2);
}

#[test]
fn repeated_selection_changes_nothing() {
    let mut session = build_session("noop-test");

    let events = session
        .apply(TwinCommand::SelectScenario { scenario: Scenario::Baseline })
        .unwrap();

    assert_eq!(events.len(), 1, "only projection_computed");
    assert_eq!(session.event_count("scenario_selected"), 0);
}

#[test]
fn reset_returns_to_defaults() {
    let mut session = build_session("reset-test");
    session.apply(TwinCommand::SelectScenario { scenario: Scenario::Sla }).unwrap();
    session.apply(TwinCommand::SetCapacity { percent: 70 }).unwrap();

    let events = session.apply(TwinCommand::Reset).unwrap();

    assert_eq!(events[0], TwinEvent::SessionReset);
    assert_eq!(session.scenario(), Scenario::Baseline);
    assert_eq!(session.capacity().percent(), 100);
    assert_eq!(session.projection().backlog_series(), vec![20, 45, 80, 120]);
}

#[test]
fn log_entries_are_sequenced_and_decodable() {
    let mut session = build_session("log-test");
    session.apply(TwinCommand::SetCapacity { percent: 90 }).unwrap();

    let log = session.log();
    let seqs: Vec<u64> = log.iter().map(|e| e.seq).collect();
    assert_eq!(seqs, (1..=log.len() as u64).collect::<Vec<_>>());

    for entry in log {
        assert_eq!(entry.session_id, "log-test");
        let event: TwinEvent = serde_json::from_str(&entry.payload).expect("payload decodes");
        assert_eq!(event.type_name(), entry.event_type);
    }
}

#[test]
fn snapshot_reflects_current_view() {
    let mut session = build_session("snapshot-test");
    session.apply(TwinCommand::SelectScenario { scenario: Scenario::Reassign }).unwrap();

    let snap = session.snapshot();

    assert_eq!(snap.session_id, "snapshot-test");
    assert_eq!(snap.scenario, Scenario::Reassign);
    assert_eq!(snap.scenario_label, "Strategy A: Reassign CRA");
    assert_eq!(snap.events_logged, session.log().len() as u64);
    assert_eq!(snap.projection.final_backlog(), 5);
}

#[test]
fn commands_decode_from_ipc_json() {
    let cmd: TwinCommand = serde_json::from_str(r#"{"cmd":"set_capacity","percent":80}"#).unwrap();
    assert_eq!(cmd, TwinCommand::SetCapacity { percent: 80 });

    let cmd: TwinCommand =
        serde_json::from_str(r#"{"cmd":"select_scenario","scenario":"sla"}"#).unwrap();
    assert_eq!(cmd, TwinCommand::SelectScenario { scenario: Scenario::Sla });

    assert!(serde_json::from_str::<TwinCommand>(r#"{"cmd":"select_scenario","scenario":"hire"}"#).is_err());
}
