//! Tests for mouse-driven focus: grant, revoke and window-awareness.

use arbor_test::prelude::*;
use arbor_test::button_at;

fn is_focused(button: NodeId) -> bool {
    button
        .with_node(|b: &mut Button| b.control().is_focused())
        .unwrap()
}

/// Mouse-down over a focusable, enabled widget grants focus and fires the
/// gained event once; re-clicking while focused does not fire it again.
#[test]
fn test_mouse_down_grants_focus_once() {
    let mut app = HeadlessApp::new();
    let tracker = FocusTracker::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));
    tracker.attach(button, "ok");

    app.click_at(20.0, 20.0);
    assert!(is_focused(button));
    assert_eq!(tracker.gained_count(), 1);

    app.click_at(20.0, 20.0);
    assert_eq!(tracker.gained_count(), 1, "already focused, no second event");
}

/// Mouse-down outside a focused widget revokes focus and fires the
/// clicked-outside notification.
#[test]
fn test_click_outside_revokes_focus() {
    let mut app = HeadlessApp::new();
    let tracker = FocusTracker::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));
    tracker.attach(button, "ok");

    app.click_at(20.0, 20.0);
    assert!(is_focused(button));

    app.click_at(400.0, 400.0);
    assert!(!is_focused(button));
    assert_eq!(tracker.clicked_outside(), vec!["ok"]);
}

/// A non-focusable widget never takes focus from a click.
#[test]
fn test_non_focusable_widget_ignores_clicks() {
    let mut app = HeadlessApp::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));
    button
        .with_node(|b: &mut Button| b.control_mut().unwrap().set_focusable(false))
        .unwrap();

    app.click_at(20.0, 20.0);
    assert!(!is_focused(button));
}

/// Focus checks are owner-window-aware: a widget in a secondary window only
/// loses focus to clicks in its own window, not to global ones.
#[test]
fn test_window_local_focus_survives_global_clicks() {
    let mut app = HeadlessApp::new();
    let tools = app
        .root()
        .add_child_named(WindowNode::secondary("Tools"), "Tools");
    let button = button_at(tools, "Apply", (10.0, 10.0), (80.0, 30.0));
    app.step();
    let tools_id = app.window_id_of(tools).unwrap();

    app.cursor_move_in(tools_id, 20.0, 20.0);
    app.step();
    app.mouse_down_in(tools_id, MouseButton::Left);
    app.step();
    app.mouse_up_in(tools_id, MouseButton::Left);
    app.step();
    assert!(is_focused(button));

    app.click_at(400.0, 400.0);
    assert!(
        is_focused(button),
        "a primary-window click is not this widget's click stream"
    );

    app.cursor_move_in(tools_id, 300.0, 300.0);
    app.step();
    app.mouse_down_in(tools_id, MouseButton::Left);
    app.step();
    assert!(!is_focused(button), "a local outside-click still revokes");
}
