//! Tests for tree structure and the deferred-free lifecycle.
//!
//! These tests verify that:
//! - Parent/child links are consistent after `add_child` and `adopt`
//! - `ready` runs once, `attached` on every attach
//! - `queue_free` is idempotent and resolved on the next process pass
//! - Teardown runs children-first

use std::cell::RefCell;
use std::rc::Rc;

use arbor_test::prelude::*;
use arbor_test::LifecycleRecorder;

fn shared_log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

/// A newly added child has its parent set and appears exactly once in the
/// parent's children.
#[test]
fn test_add_child_links_once() {
    let app = HeadlessApp::new();
    let root = app.root();
    let panel = root.add_child_named(Group::new(), "Panel");

    assert_eq!(panel.parent(), Some(root));
    assert_eq!(
        root.children().iter().filter(|c| **c == panel).count(),
        1,
        "child must appear exactly once"
    );
}

/// `attached` fires on every attach, `ready` only on the first.
#[test]
fn test_ready_runs_once_across_reparenting() {
    let mut app = HeadlessApp::new();
    let root = app.root();
    let log = shared_log();

    let a = root.add_child_named(Group::new(), "A");
    let b = root.add_child_named(Group::new(), "B");
    let recorder = a.add_child(LifecycleRecorder::new("p", log.clone()));

    b.adopt(recorder).unwrap();
    app.step();

    let entries = log.borrow().clone();
    assert_eq!(
        entries,
        vec!["p:attached", "p:ready", "p:attached"],
        "second attach must not re-run ready"
    );
}

/// Freeing is deferred: the node survives the frame that requested it and
/// disappears on the next process pass. A second `queue_free` changes nothing.
#[test]
fn test_queue_free_is_deferred_and_idempotent() {
    let mut app = HeadlessApp::new();
    let log = shared_log();
    let recorder = app.root().add_child(LifecycleRecorder::new("p", log.clone()));
    app.step();

    recorder.queue_free();
    recorder.queue_free();
    assert!(recorder.is_valid(), "free must not happen synchronously");

    app.step();
    assert!(!recorder.is_valid());
    assert_eq!(
        log.borrow().iter().filter(|e| *e == "p:cleanup").count(),
        1,
        "cleanup must run exactly once"
    );
}

/// For a chain A -> B -> C, freeing A cleans up C first, then B, then A.
#[test]
fn test_teardown_is_children_first() {
    let mut app = HeadlessApp::new();
    let log = shared_log();

    let a = app.root().add_child(LifecycleRecorder::new("a", log.clone()));
    let b = a.add_child(LifecycleRecorder::new("b", log.clone()));
    let _c = b.add_child(LifecycleRecorder::new("c", log.clone()));
    app.step();

    log.borrow_mut().clear();
    a.queue_free();
    app.step();

    assert_eq!(
        log.borrow().clone(),
        vec!["c:cleanup", "b:cleanup", "a:cleanup"]
    );
}

/// Deactivating a subtree stops `process` from running in it, and
/// `ProcessMode::Always` opts a node back in.
#[test]
fn test_active_flag_and_process_mode_gate_processing() {
    let mut app = HeadlessApp::new();
    let log = shared_log();

    let panel = app.root().add_child_named(Group::new(), "Panel");
    let gated = panel.add_child(LifecycleRecorder::new("gated", log.clone()));
    let always = panel.add_child(LifecycleRecorder::new("always", log.clone()));
    always.set_process_mode(ProcessMode::Always);

    let gated_calls = gated
        .with_node(|p: &mut LifecycleRecorder| p.process_counter())
        .unwrap();
    let always_calls = always
        .with_node(|p: &mut LifecycleRecorder| p.process_counter())
        .unwrap();

    panel.set_active(false);
    app.steps(3);

    assert_eq!(gated_calls.get(), 0, "inactive subtree must not process");
    assert_eq!(always_calls.get(), 3, "Always mode ignores ancestry");

    panel.set_active(true);
    app.step();
    assert_eq!(gated_calls.get(), 1);
}

/// Reparenting under a descendant is rejected and leaves the tree intact.
#[test]
fn test_adopt_rejects_cycles() {
    let app = HeadlessApp::new();
    let a = app.root().add_child_named(Group::new(), "A");
    let b = a.add_child_named(Group::new(), "B");

    assert!(matches!(b.adopt(a), Err(TreeError::WouldCycle(_))));
    assert_eq!(a.parent(), Some(app.root()));
    assert_eq!(b.parent(), Some(a));
}
