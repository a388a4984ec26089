//! Host-level scenarios: push, undo, redo, and what the host sees.

use edit_timeline::{
    FileUri, RequestDisablement, Snapshot, SnapshotEntry, StepKind, StopId, Timeline,
};

fn snapshot(request: &str, content: &str) -> Snapshot {
    Snapshot::new().with_entry("file:///main.rs", SnapshotEntry::new(request, content))
}

fn push(tl: &mut Timeline, request: &str, stop: &str) {
    tl.push_snapshot(request.into(), stop.into(), Snapshot::new());
}

fn undo(tl: &mut Timeline) {
    let mut step = tl.undo_step().expect("undo available");
    assert!(step.apply(tl));
}

#[test]
fn undo_to_first_stop() {
    let mut tl = Timeline::new();
    tl.push_snapshot("r1".into(), "s1".into(), snapshot("r1", "A"));
    tl.push_snapshot("r1".into(), "s2".into(), snapshot("r1", "B"));

    assert!(tl.can_undo());
    assert!(!tl.can_redo());

    let mut step = tl.undo_step().unwrap();
    assert_eq!(step.stop().stop_id, StopId::named("s1"));
    assert_eq!(
        step.stop().snapshot.get(&FileUri::from("file:///main.rs")).unwrap().content,
        "A"
    );
    assert!(step.apply(&mut tl));

    assert!(!tl.can_undo());
    assert!(tl.can_redo());
}

#[test]
fn push_after_two_undos_branches() {
    let mut tl = Timeline::new();
    push(&mut tl, "r1", "s1");
    push(&mut tl, "r1", "s2");
    push(&mut tl, "r1", "s3");
    undo(&mut tl);
    undo(&mut tl);
    push(&mut tl, "r1", "new");

    let state = tl.state_for_persistence();
    let ids: Vec<_> = state.history[0].stops.iter().map(|s| s.stop_id.clone()).collect();
    assert_eq!(ids, vec![StopId::named("s1"), StopId::named("new")]);
    assert_eq!(state.index, 2);
}

#[test]
fn disablement_tracks_undone_requests() {
    let mut tl = Timeline::new();
    push(&mut tl, "r1", "s1");
    push(&mut tl, "r2", "s2");
    push(&mut tl, "r3", "s3");

    undo(&mut tl);
    assert_eq!(tl.request_disablement(), &[RequestDisablement::full("r3")]);

    undo(&mut tl);
    assert_eq!(
        tl.request_disablement(),
        &[RequestDisablement::full("r2"), RequestDisablement::full("r3")]
    );

    tl.redo_step().unwrap().apply(&mut tl);
    assert_eq!(tl.request_disablement(), &[RequestDisablement::full("r3")]);
}

#[test]
fn hundred_requests() {
    let mut tl = Timeline::new();
    for i in 0..100 {
        push(&mut tl, &format!("r{i}"), &format!("s{i}"));
    }

    let state = tl.state_for_persistence();
    assert_eq!(state.history.len(), 100);
    assert_eq!(state.index, 100);
}

/// A request with a root stop, interior stops, and a post-edit stop, walked
/// back one stop at a time.
#[test]
fn disablement_walks_back_through_root_requests() {
    let mut tl = Timeline::new();
    tl.push_snapshot("r1".into(), StopId::Root, Snapshot::new());
    tl.push_snapshot("r1".into(), StopId::PostEdit, Snapshot::new());
    tl.push_snapshot("r2".into(), StopId::Root, Snapshot::new());
    tl.push_snapshot("r2".into(), "a".into(), Snapshot::new());
    tl.push_snapshot("r2".into(), StopId::PostEdit, Snapshot::new());
    assert!(tl.request_disablement().is_empty());

    undo(&mut tl);
    assert_eq!(
        tl.request_disablement(),
        &[RequestDisablement::after("r2", StopId::named("a"))]
    );

    undo(&mut tl);
    assert_eq!(
        tl.request_disablement(),
        &[RequestDisablement::after("r2", StopId::Root)]
    );

    undo(&mut tl);
    assert_eq!(tl.request_disablement(), &[RequestDisablement::full("r2")]);

    undo(&mut tl);
    assert_eq!(
        tl.request_disablement(),
        &[
            RequestDisablement::after("r1", StopId::Root),
            RequestDisablement::full("r2"),
        ]
    );

    assert!(tl.undo_step().is_none());
    assert_eq!(tl.index(), 1);
}

#[test]
fn restore_to_post_edit_of_earlier_request() {
    let mut tl = Timeline::new();
    tl.push_snapshot("r1".into(), StopId::Root, snapshot("r1", "v0"));
    tl.push_snapshot("r1".into(), StopId::PostEdit, snapshot("r1", "v1"));
    tl.push_snapshot("r2".into(), StopId::Root, snapshot("r1", "v1"));
    tl.push_snapshot("r2".into(), StopId::PostEdit, snapshot("r2", "v2"));

    let mut step = tl.snapshot_for_restore("r1", &StopId::PostEdit).unwrap();
    assert_eq!(step.kind(), StepKind::Restore);
    assert!(step.apply(&mut tl));

    assert_eq!(tl.index(), 2);
    assert_eq!(tl.request_disablement(), &[RequestDisablement::full("r2")]);
    assert_eq!(
        tl.current_stop().unwrap().snapshot.get(&FileUri::from("file:///main.rs")).unwrap().content,
        "v1"
    );
}

#[test]
fn redo_to_tip_then_push_keeps_everything() {
    let mut tl = Timeline::new();
    push(&mut tl, "r1", "s1");
    push(&mut tl, "r2", "s2");
    undo(&mut tl);
    tl.redo_step().unwrap().apply(&mut tl);
    push(&mut tl, "r3", "s3");

    assert_eq!(tl.history().len(), 3);
    assert_eq!(tl.stop_count(), 3);
}
