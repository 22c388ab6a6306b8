//! Tests for keyboard focus navigation between neighbor widgets.

use arbor_test::prelude::*;
use arbor_test::button_at;

fn is_focused(button: NodeId) -> bool {
    button
        .with_node(|b: &mut Button| b.control().is_focused())
        .unwrap()
}

fn set_neighbor(button: NodeId, direction: NavDirection, path: &str) {
    let path = path.to_string();
    button
        .with_node(|b: &mut Button| {
            b.control_mut().unwrap().set_neighbor(direction, path.as_str());
        })
        .unwrap();
}

fn make_rapid(button: NodeId, initial_delay: f64, repeat_interval: f64) {
    button
        .with_node(|b: &mut Button| {
            let control = b.control_mut().unwrap();
            control.set_nav_mode(NavMode::Rapid);
            control.set_nav_timing(initial_delay, repeat_interval);
        })
        .unwrap();
}

fn row_of_buttons(app: &HeadlessApp, names: &[&str]) -> Vec<NodeId> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            button_at(
                app.root(),
                name,
                (10.0 + 100.0 * i as f64, 10.0),
                (80.0, 30.0),
            )
        })
        .collect()
}

/// A single Tab press navigates exactly one hop, even when the neighbor has
/// a neighbor of its own.
#[test]
fn test_single_shot_tab_moves_once() {
    let mut app = HeadlessApp::new();
    let buttons = row_of_buttons(&app, &["A", "B", "C"]);
    set_neighbor(buttons[0], NavDirection::Next, "../B");
    set_neighbor(buttons[1], NavDirection::Next, "../C");

    app.click_at(20.0, 20.0);
    assert!(is_focused(buttons[0]));

    app.key_down(Key::Tab);
    app.steps(5);
    assert!(!is_focused(buttons[0]), "source loses focus");
    assert!(is_focused(buttons[1]));
    assert!(
        !is_focused(buttons[2]),
        "one key edge must navigate one hop"
    );

    app.key_up(Key::Tab);
    app.step();
    app.key_down(Key::Tab);
    app.step();
    assert!(is_focused(buttons[2]), "a fresh edge navigates again");
}

/// Shift+Tab navigates along the Prev binding.
#[test]
fn test_shift_tab_navigates_prev() {
    let mut app = HeadlessApp::new();
    let buttons = row_of_buttons(&app, &["A", "B"]);
    set_neighbor(buttons[1], NavDirection::Prev, "../A");

    app.click_at(120.0, 20.0);
    assert!(is_focused(buttons[1]));

    app.key_down(Key::ShiftLeft);
    app.step();
    app.key_down(Key::Tab);
    app.step();
    assert!(is_focused(buttons[0]));
    assert!(!is_focused(buttons[1]));
}

/// Holding a direction in rapid mode for `initial_delay + 2 * repeat_interval`
/// triggers at least three navigations: one on the press edge, one at the
/// delay, one more after a repeat interval.
#[test]
fn test_rapid_navigation_repeats_while_held() {
    let mut app = HeadlessApp::new();
    let buttons = row_of_buttons(&app, &["A", "B", "C", "D"]);
    for (i, target) in [(0, "../B"), (1, "../C"), (2, "../D")] {
        set_neighbor(buttons[i], NavDirection::Right, target);
        make_rapid(buttons[i], 0.2, 0.05);
    }
    make_rapid(buttons[3], 0.2, 0.05);

    let tracker = FocusTracker::new();
    tracker.attach(buttons[1], "b");
    tracker.attach(buttons[2], "c");
    tracker.attach(buttons[3], "d");

    app.click_at(20.0, 20.0);
    assert!(is_focused(buttons[0]));

    app.key_down(Key::ArrowRight);
    // 25 frames at 60 Hz > 0.2 + 2 * 0.05 seconds of hold.
    app.steps(25);

    assert_eq!(
        tracker.gained(),
        vec!["b", "c", "d"],
        "hold must chain through the row"
    );
    assert!(is_focused(buttons[3]));
}

/// The hold timer travels with the focus: the second hop happens one repeat
/// interval after the first, not after a fresh initial delay.
#[test]
fn test_rapid_hold_time_transfers_to_neighbor() {
    let mut app = HeadlessApp::new();
    let buttons = row_of_buttons(&app, &["A", "B", "C"]);
    for (i, target) in [(0, "../B"), (1, "../C")] {
        set_neighbor(buttons[i], NavDirection::Right, target);
        make_rapid(buttons[i], 0.2, 0.05);
    }
    make_rapid(buttons[2], 0.2, 0.05);

    app.click_at(20.0, 20.0);
    app.key_down(Key::ArrowRight);
    // Past the initial delay plus one interval, but well under two full
    // initial delays: C is only reachable if B inherited A's hold time.
    app.steps(20);
    assert!(is_focused(buttons[2]));
}

/// Navigation into a disabled neighbor is a no-op and the source keeps
/// focus.
#[test]
fn test_navigation_into_disabled_neighbor_is_noop() {
    let mut app = HeadlessApp::new();
    let buttons = row_of_buttons(&app, &["A", "B"]);
    set_neighbor(buttons[0], NavDirection::Next, "../B");
    buttons[1]
        .with_node(|b: &mut Button| b.control_mut().unwrap().set_enabled(false))
        .unwrap();

    app.click_at(20.0, 20.0);
    app.key_down(Key::Tab);
    app.steps(2);

    assert!(is_focused(buttons[0]), "source must keep focus");
    assert!(!is_focused(buttons[1]));
}

/// A direction with no binding does nothing.
#[test]
fn test_unbound_direction_is_ignored() {
    let mut app = HeadlessApp::new();
    let buttons = row_of_buttons(&app, &["A", "B"]);

    app.click_at(20.0, 20.0);
    app.key_down(Key::ArrowDown);
    app.steps(2);
    assert!(is_focused(buttons[0]));
    assert!(!is_focused(buttons[1]));
}
