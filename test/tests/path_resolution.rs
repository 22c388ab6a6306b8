//! Tests for typed node lookup by path.

use arbor_test::prelude::*;

fn build_panel(app: &HeadlessApp) -> NodeId {
    let panel = app.root().add_child_named(Group::new(), "Panel");
    arbor_test::button_at(panel, "OkButton", (10.0, 10.0), (80.0, 30.0));
    panel.add_child_named(Label::new("hint"), "Hint");
    panel
}

/// The strict typed lookup returns the button at the exact chain.
#[test]
fn test_typed_lookup_finds_button() {
    let app = HeadlessApp::new();
    let panel = build_panel(&app);

    let found = app
        .root()
        .get_node_as::<Button>("/root/Panel/OkButton")
        .unwrap();
    assert_eq!(found, panel.get_node("OkButton").unwrap());
}

/// The null-returning variant folds a miss into `None` without an error.
#[test]
fn test_null_variant_on_missing_path() {
    let app = HeadlessApp::new();
    build_panel(&app);

    assert!(app.root().get_node_as_or_null::<Button>("/root/Missing").is_none());
    assert!(matches!(
        app.root().get_node("/root/Missing"),
        Err(TreeError::NotFound(_))
    ));
}

/// Asking for the wrong type at an existing path is a distinct error from a
/// missing node.
#[test]
fn test_wrong_type_is_reported_as_such() {
    let app = HeadlessApp::new();
    build_panel(&app);

    let err = app
        .root()
        .get_node_as::<Label>("/root/Panel/OkButton")
        .unwrap_err();
    assert!(matches!(err, TreeError::WrongType { .. }), "got {err:?}");
}

/// Relative paths resolve from the caller, including `..` escapes.
#[test]
fn test_relative_resolution_with_parent_escape() {
    let app = HeadlessApp::new();
    let panel = build_panel(&app);
    let ok = panel.get_node("OkButton").unwrap();

    assert_eq!(ok.get_node("../Hint").unwrap(), panel.get_node("Hint").unwrap());
    assert_eq!(ok.get_node("/root/Panel").unwrap(), panel);
}

/// `absolute_path` reports the full chain from the tree root.
#[test]
fn test_absolute_path_reports_position() {
    let app = HeadlessApp::new();
    let panel = build_panel(&app);
    let ok = panel.get_node("OkButton").unwrap();
    assert_eq!(ok.absolute_path(), "/root/Panel/OkButton");
}
