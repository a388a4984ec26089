//! End-to-end runs of the CLI against a state file in a temp dir.

use std::path::Path;

use clap::Parser;
use edit_timeline::{PersistedState, StopId};
use edit_timeline_cli::{Cli, run};

fn exec(state: &Path, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["edit-timeline", "--state", state.to_str().unwrap()];
    argv.extend_from_slice(args);
    run(&Cli::try_parse_from(argv).unwrap())
}

fn load(state: &Path) -> PersistedState {
    PersistedState::from_json(&std::fs::read_to_string(state).unwrap()).unwrap()
}

#[test]
fn push_undo_redo_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");

    exec(&state, &["push", "r1", "--root", "--file", "file:///a.rs=v0"]).unwrap();
    exec(&state, &["push", "r1", "--post-edit", "--file", "file:///a.rs=v1"]).unwrap();
    assert_eq!(load(&state).index, 2);

    let out = exec(&state, &["undo"]).unwrap();
    let moved: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(moved["kind"], "undo");
    assert!(moved["stopId"].is_null());
    assert_eq!(moved["snapshot"]["file:///a.rs"]["content"], "v0");
    assert_eq!(load(&state).index, 1);

    assert_eq!(exec(&state, &["undo"]).unwrap(), "nothing to undo");

    exec(&state, &["redo"]).unwrap();
    assert_eq!(load(&state).index, 2);
}

#[test]
fn restore_and_disablement() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");

    exec(&state, &["push", "r1", "--stop", "s1"]).unwrap();
    exec(&state, &["push", "r2", "--stop", "s2"]).unwrap();
    exec(&state, &["push", "r3", "--stop", "s3"]).unwrap();

    exec(&state, &["restore", "r1", "--stop", "s1"]).unwrap();
    let out = exec(&state, &["disablement"]).unwrap();
    let list: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        list,
        serde_json::json!([{ "requestId": "r2" }, { "requestId": "r3" }])
    );

    assert_eq!(exec(&state, &["restore", "r9", "--stop", "s1"]).unwrap(), "no such stop");
}

#[test]
fn show_marks_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");

    exec(&state, &["push", "r1", "--stop", "a"]).unwrap();
    exec(&state, &["push", "r1", "--stop", "b"]).unwrap();
    exec(&state, &["undo"]).unwrap();

    let out = exec(&state, &["show"]).unwrap();
    assert!(out.starts_with("index 1/2"));
    assert!(out.contains("> a"));
    assert!(out.contains("x b"));
}

#[test]
fn show_does_not_rewrite_state() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");

    exec(&state, &["show"]).unwrap();
    assert!(!state.exists());
}

#[test]
fn corrupt_cursor_needs_clamp() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");

    exec(&state, &["push", "r1", "--stop", "a"]).unwrap();
    let mut persisted = load(&state);
    persisted.index = 7;
    std::fs::write(&state, persisted.to_json().unwrap()).unwrap();

    let err = exec(&state, &["show"]).unwrap_err();
    assert!(format!("{err:#}").contains("out of range"));

    let out = exec(&state, &["--restore-policy", "clamp", "show"]).unwrap();
    assert!(out.starts_with("index 1/1"));
}

#[test]
fn config_file_sets_policy() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");
    let config = dir.path().join("timeline.ron");
    std::fs::write(&config, "(restore_policy: clamp)").unwrap();

    std::fs::write(&state, r#"{"history": [], "index": 4}"#).unwrap();

    let out = exec(&state, &["--config", config.to_str().unwrap(), "show"]).unwrap();
    assert!(out.starts_with("index 0/0"));
}

#[test]
fn post_edit_sentinel_persists_as_constant() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");

    exec(&state, &["push", "r1", "--post-edit"]).unwrap();
    let persisted = load(&state);
    assert_eq!(persisted.history[0].stops[0].stop_id, StopId::PostEdit);

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&state).unwrap()).unwrap();
    assert_eq!(raw["history"][0]["stops"][0]["stopId"], edit_timeline::POST_EDIT_STOP_ID);
}

#[test]
fn restore_to_active_stop_leaves_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");

    exec(&state, &["push", "r1", "--stop", "a"]).unwrap();
    let before = std::fs::read_to_string(&state).unwrap();
    std::fs::write(&state, format!("{before}\n")).unwrap();

    let out = exec(&state, &["restore", "r1", "--stop", "a"]).unwrap();
    let moved: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(moved["index"], 1);
    assert_eq!(std::fs::read_to_string(&state).unwrap(), format!("{before}\n"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");
    let config = dir.path().join("nope.ron");

    let err = exec(&state, &["--config", config.to_str().unwrap(), "show"]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load config"));
}

#[test]
fn unparseable_state_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("timeline.json");
    std::fs::write(&state, "not json").unwrap();

    let err = exec(&state, &["show"]).unwrap_err();
    assert!(format!("{err:#}").contains("invalid timeline"));
}
