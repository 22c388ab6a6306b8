//! Deferred application-level requests.
//!
//! Anything that must not happen mid-traversal (opening a native window,
//! closing one, quitting) is queued here and drained by the application loop
//! at the top of the next frame.

use std::cell::RefCell;

use crate::input::InputSnapshot;
use crate::node::NodeId;

thread_local! {
    static APP_UPDATE_EVENTS: RefCell<Vec<AppUpdateEvent>> = Default::default();
}

pub(crate) enum AppUpdateEvent {
    OpenWindow { host: NodeId },
    CloseWindow { host: NodeId },
    Quit,
}

pub(crate) fn add_app_update_event(event: AppUpdateEvent) {
    APP_UPDATE_EVENTS.with_borrow_mut(|events| events.push(event));
}

pub(crate) fn take_app_update_events() -> Vec<AppUpdateEvent> {
    APP_UPDATE_EVENTS.with_borrow_mut(std::mem::take)
}

/// Request a window host's teardown from anywhere, without holding a borrow
/// on the host node.
pub fn close_window(host: NodeId) {
    add_app_update_event(AppUpdateEvent::CloseWindow { host });
}

/// Request application shutdown at the end of the current frame.
pub fn quit() {
    add_app_update_event(AppUpdateEvent::Quit);
}

/// Mutable per-run state owned by the application loop.
#[derive(Default)]
pub(crate) struct AppState {
    /// Snapshot fed by the primary window's messages; windowless widgets and
    /// the primary window's widgets read this one.
    pub(crate) global_input: InputSnapshot,
    pub(crate) frame: u64,
}
