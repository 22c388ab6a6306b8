//! Headless test harness.
//!
//! Drives the real frame loop against the in-process platform backend, with
//! helpers that synthesize cursor, button and key messages for the primary
//! window or for a specific secondary window.

use peniko::kurbo::{Point, Size};

use crate::app_handle::AppHandle;
use crate::event::{MouseButton, WindowMessage};
use crate::input::Key;
use crate::node::NodeId;
use crate::platform::{HeadlessEvents, HeadlessPlatform, PlatformWindowId, WindowDesc};
use crate::views::Group;
use crate::window::WindowNode;

const DEFAULT_DT: f64 = 1.0 / 60.0;

pub struct HeadlessApp {
    handle: AppHandle,
    events: HeadlessEvents,
}

impl HeadlessApp {
    /// A running app with an open primary window and an empty `root` tree.
    ///
    /// Panics when the primary window cannot be opened, which the headless
    /// backend only does under injected failure.
    pub fn new() -> Self {
        let platform = HeadlessPlatform::new();
        let events = platform.events();
        let root = Group::new_root("root");
        let desc = WindowDesc {
            title: "headless".to_string(),
            size: Size::new(800.0, 600.0),
            resizable: true,
            owner: None,
        };
        let handle = AppHandle::new(Box::new(platform), root, desc)
            .expect("headless primary window always opens");
        Self { handle, events }
    }

    pub fn root(&self) -> NodeId {
        self.handle.root()
    }

    pub fn events(&self) -> HeadlessEvents {
        self.events.clone()
    }

    pub fn primary_open(&self) -> bool {
        self.handle.primary_open()
    }

    pub fn primary_id(&self) -> PlatformWindowId {
        self.handle.primary_id()
    }

    /// Whether the primary window holds native activation, as last reported
    /// by the platform.
    pub fn primary_focused(&self) -> bool {
        self.handle.primary_focused()
    }

    pub fn primary_size(&self) -> Size {
        self.handle.primary_size()
    }

    pub fn modal_top(&self) -> Option<NodeId> {
        self.handle.modal_top()
    }

    pub fn open_window_count(&self) -> usize {
        self.handle.open_window_count()
    }

    /// The platform id of a window host's native window, once open.
    pub fn window_id_of(&self, host: NodeId) -> Option<PlatformWindowId> {
        host.with_node(|window: &mut WindowNode| window.platform_id())
            .ok()
            .flatten()
    }

    /// Run one frame at the default 60 Hz delta.
    pub fn step(&mut self) {
        self.step_dt(DEFAULT_DT);
    }

    pub fn step_dt(&mut self, dt: f64) {
        self.handle.frame(dt);
    }

    pub fn steps(&mut self, frames: usize) {
        for _ in 0..frames {
            self.step();
        }
    }

    fn primary(&self) -> PlatformWindowId {
        self.primary_id()
    }

    pub fn send(&mut self, window: PlatformWindowId, message: WindowMessage) {
        self.events.push(window, message);
    }

    pub fn cursor_move(&mut self, x: f64, y: f64) {
        let id = self.primary();
        self.send(id, WindowMessage::CursorMoved(Point::new(x, y)));
    }

    pub fn cursor_move_in(&mut self, window: PlatformWindowId, x: f64, y: f64) {
        self.send(window, WindowMessage::CursorMoved(Point::new(x, y)));
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        let id = self.primary();
        self.send(id, WindowMessage::MouseDown(button));
    }

    pub fn mouse_down_in(&mut self, window: PlatformWindowId, button: MouseButton) {
        self.send(window, WindowMessage::MouseDown(button));
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        let id = self.primary();
        self.send(id, WindowMessage::MouseUp(button));
    }

    pub fn mouse_up_in(&mut self, window: PlatformWindowId, button: MouseButton) {
        self.send(window, WindowMessage::MouseUp(button));
    }

    pub fn key_down(&mut self, key: Key) {
        let id = self.primary();
        self.send(id, WindowMessage::KeyDown { key, repeat: false });
    }

    pub fn key_up(&mut self, key: Key) {
        let id = self.primary();
        self.send(id, WindowMessage::KeyUp { key });
    }

    /// Click at a point in the primary window, spread over the frames a real
    /// user interaction takes: move, press, release.
    pub fn click_at(&mut self, x: f64, y: f64) {
        self.cursor_move(x, y);
        self.step();
        self.mouse_down(MouseButton::Left);
        self.step();
        self.mouse_up(MouseButton::Left);
        self.step();
    }

    /// Deliver a user close request to the primary window.
    pub fn close_primary(&mut self) {
        let id = self.primary();
        self.send(id, WindowMessage::CloseRequested);
    }

    /// Deliver a user close request to a secondary window.
    pub fn close_window(&mut self, window: PlatformWindowId) {
        self.send(window, WindowMessage::CloseRequested);
    }

    /// Run the same teardown sequence the real loop runs after the primary
    /// window closes.
    pub fn teardown(&mut self) {
        self.handle.teardown();
    }
}

impl Default for HeadlessApp {
    fn default() -> Self {
        Self::new()
    }
}
