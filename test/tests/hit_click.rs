//! Tests for hit-testing and the per-button click state machine.

use arbor_test::prelude::*;
use arbor_test::button_at;

fn is_hovered(button: NodeId) -> bool {
    button
        .with_node(|b: &mut Button| b.control().is_hovered())
        .unwrap()
}

fn is_pressed(button: NodeId) -> bool {
    button.with_node(|b: &mut Button| b.is_pressed()).unwrap()
}

/// Containment is half-open: the top-left corner is inside, the far edges
/// are not.
#[test]
fn test_half_open_containment() {
    let mut app = HeadlessApp::new();
    let button = button_at(app.root(), "B", (10.0, 10.0), (20.0, 20.0));

    for (x, y, inside) in [
        (10.0, 10.0, true),
        (29.0, 29.0, true),
        (30.0, 10.0, false),
        (10.0, 30.0, false),
    ] {
        app.cursor_move(x, y);
        app.step();
        assert_eq!(is_hovered(button), inside, "({x}, {y})");
    }
}

/// Offsets accumulate through ancestors: a widget's bounds follow its
/// parents' positions.
#[test]
fn test_hit_test_uses_accumulated_offsets() {
    let mut app = HeadlessApp::new();
    let panel = app.root().add_child_named(Group::new(), "Panel");
    panel.set_offset((100.0, 50.0));
    let button = button_at(panel, "B", (10.0, 10.0), (20.0, 20.0));

    app.cursor_move(15.0, 15.0);
    app.step();
    assert!(!is_hovered(button), "widget-local position must not match");

    app.cursor_move(115.0, 65.0);
    app.step();
    assert!(is_hovered(button));
}

/// Release-triggered click: down over the widget then up over the widget
/// fires exactly one click.
#[test]
fn test_release_click_over_widget_fires_once() {
    let mut app = HeadlessApp::new();
    let tracker = ClickTracker::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));
    tracker.attach(button, "ok");

    app.click_at(20.0, 20.0);
    assert_eq!(tracker.count(), 1);
}

/// Release-triggered click: releasing outside the widget fires nothing and
/// clears the pressed state.
#[test]
fn test_release_outside_widget_fires_nothing() {
    let mut app = HeadlessApp::new();
    let tracker = ClickTracker::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));
    tracker.attach(button, "ok");

    app.cursor_move(20.0, 20.0);
    app.step();
    app.mouse_down(MouseButton::Left);
    app.step();
    assert!(is_pressed(button));

    app.cursor_move(200.0, 200.0);
    app.step();
    app.mouse_up(MouseButton::Left);
    app.step();

    assert_eq!(tracker.count(), 0);
    assert!(!is_pressed(button), "pressed must reset on release");
}

/// Press-triggered buttons fire on the down edge.
#[test]
fn test_press_trigger_fires_on_down() {
    let mut app = HeadlessApp::new();
    let tracker = ClickTracker::new();
    let button = app
        .root()
        .add_child_named(Button::new("Ok").with_trigger(ClickTrigger::OnPress), "Ok");
    button.set_offset((10.0, 10.0));
    button.set_size((80.0, 30.0));
    tracker.attach(button, "ok");

    app.cursor_move(20.0, 20.0);
    app.step();
    app.mouse_down(MouseButton::Left);
    app.step();
    assert_eq!(tracker.count(), 1, "must fire before release");

    app.mouse_up(MouseButton::Left);
    app.step();
    assert_eq!(tracker.count(), 1, "release must not fire again");
}

/// Left and right buttons are tracked independently.
#[test]
fn test_left_and_right_clicks_are_independent() {
    let mut app = HeadlessApp::new();
    let tracker = ClickTracker::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));
    tracker.attach(button, "ok");

    app.cursor_move(20.0, 20.0);
    app.step();
    app.mouse_down(MouseButton::Left);
    app.step();
    app.mouse_down(MouseButton::Right);
    app.step();
    app.mouse_up(MouseButton::Right);
    app.step();
    app.mouse_up(MouseButton::Left);
    app.step();

    assert_eq!(tracker.count(), 2);
}

/// With stay-pressed set, the pressed look latches past release until
/// explicitly released.
#[test]
fn test_stay_pressed_latches() {
    let mut app = HeadlessApp::new();
    let button = app
        .root()
        .add_child_named(Button::new("Ok").with_stay_pressed(), "Ok");
    button.set_offset((10.0, 10.0));
    button.set_size((80.0, 30.0));

    app.click_at(20.0, 20.0);
    assert!(is_pressed(button), "latch must survive release");
    assert_eq!(
        button.with_node(|b: &mut Button| b.visual_state()).unwrap(),
        VisualState::Pressed
    );

    button
        .with_node(|b: &mut Button| b.release_latch())
        .unwrap();
    assert!(!is_pressed(button));
}

/// With stay-pressed set, releasing off the widget keeps the pressed look
/// even though no click fires.
#[test]
fn test_stay_pressed_survives_release_outside() {
    let mut app = HeadlessApp::new();
    let tracker = ClickTracker::new();
    let button = app
        .root()
        .add_child_named(Button::new("Ok").with_stay_pressed(), "Ok");
    button.set_offset((10.0, 10.0));
    button.set_size((80.0, 30.0));
    tracker.attach(button, "ok");

    app.cursor_move(20.0, 20.0);
    app.step();
    app.mouse_down(MouseButton::Left);
    app.step();
    app.cursor_move(300.0, 300.0);
    app.step();
    app.mouse_up(MouseButton::Left);
    app.step();

    assert_eq!(tracker.count(), 0, "release outside must not click");
    assert!(is_pressed(button), "pressed look must persist");

    button
        .with_node(|b: &mut Button| b.release_latch())
        .unwrap();
    assert!(!is_pressed(button));
}

/// Hover loss without stay-pressed resets pressed state for both buttons.
#[test]
fn test_hover_loss_resets_pressed() {
    let mut app = HeadlessApp::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));

    app.cursor_move(20.0, 20.0);
    app.step();
    app.mouse_down(MouseButton::Left);
    app.step();
    assert!(is_pressed(button));

    app.cursor_move(300.0, 300.0);
    app.step();
    assert!(!is_pressed(button), "hover loss must reset pressed");
}

/// The rendered look follows interaction state: normal when idle, hover
/// under the cursor, pressed while held, focused after focus moves away from
/// the cursor, disabled overriding everything.
#[test]
fn test_visual_state_reflects_interaction() {
    let mut app = HeadlessApp::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));
    let state = |b: NodeId| b.with_node(|b: &mut Button| b.visual_state()).unwrap();

    app.step();
    assert_eq!(state(button), VisualState::Normal);

    app.cursor_move(20.0, 20.0);
    app.step();
    assert_eq!(state(button), VisualState::Hover);

    app.mouse_down(MouseButton::Left);
    app.step();
    assert_eq!(state(button), VisualState::Pressed);

    app.mouse_up(MouseButton::Left);
    app.step();
    app.cursor_move(300.0, 300.0);
    app.step();
    assert_eq!(state(button), VisualState::Focused, "click granted focus");

    button
        .with_node(|b: &mut Button| b.control_mut().unwrap().set_enabled(false))
        .unwrap();
    assert_eq!(state(button), VisualState::Disabled);
}

/// Disabled buttons neither hover nor click, and hover exits synthetically
/// on the frame they are disabled.
#[test]
fn test_disabled_button_is_inert() {
    let mut app = HeadlessApp::new();
    let tracker = ClickTracker::new();
    let button = button_at(app.root(), "Ok", (10.0, 10.0), (80.0, 30.0));
    tracker.attach(button, "ok");

    app.cursor_move(20.0, 20.0);
    app.step();
    assert!(is_hovered(button));

    button
        .with_node(|b: &mut Button| b.control_mut().unwrap().set_enabled(false))
        .unwrap();
    assert!(!is_hovered(button), "disable forces a synthetic hover exit");

    app.click_at(20.0, 20.0);
    assert_eq!(tracker.count(), 0);
}
