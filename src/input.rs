//! Frame-scoped input state.
//!
//! Two kinds of snapshot exist at runtime: one global snapshot for the
//! primary window and window-less nodes, and one local snapshot per secondary
//! window. Each snapshot is advanced exactly once per frame, after the frame's
//! messages have been pumped and before the next pump begins, which is what
//! makes the `*_just_*` edge queries meaningful.

use peniko::kurbo::Point;
use rustc_hash::FxHashSet;

use crate::event::{MouseButton, WindowMessage};

/// Physical key identity, shared with the winit backend.
pub use winit::keyboard::KeyCode as Key;

bitflags::bitflags! {
    /// Set of mouse buttons currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
        }
    }
}

/// Input state for one window scope, with the previous frame's down-sets
/// retained for edge detection.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    keys_down: FxHashSet<Key>,
    keys_down_prev: FxHashSet<Key>,
    buttons_down: MouseButtons,
    buttons_down_prev: MouseButtons,
    cursor: Point,
    cursor_inside: bool,
    wheel_delta: f64,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one routed message into the current frame's state.
    ///
    /// Non-input messages are ignored so callers can forward everything that
    /// survived modal filtering without pre-sorting.
    pub fn apply(&mut self, message: &WindowMessage) {
        match message {
            WindowMessage::CursorMoved(point) => {
                self.cursor = *point;
                self.cursor_inside = true;
            }
            WindowMessage::CursorLeft => {
                self.cursor_inside = false;
            }
            WindowMessage::MouseDown(button) => {
                self.buttons_down.insert(MouseButtons::from(*button));
            }
            WindowMessage::MouseUp(button) => {
                self.buttons_down.remove(MouseButtons::from(*button));
            }
            WindowMessage::Wheel(delta) => {
                self.wheel_delta += delta;
            }
            WindowMessage::KeyDown { key, .. } => {
                self.keys_down.insert(*key);
            }
            WindowMessage::KeyUp { key } => {
                self.keys_down.remove(key);
            }
            _ => {}
        }
    }

    /// Roll the frame over: current down-sets become the previous ones and
    /// the wheel accumulator resets. Must run exactly once per frame.
    pub fn advance(&mut self) {
        self.keys_down_prev = self.keys_down.clone();
        self.buttons_down_prev = self.buttons_down;
        self.wheel_delta = 0.0;
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn cursor_inside(&self) -> bool {
        self.cursor_inside
    }

    pub fn wheel_delta(&self) -> f64 {
        self.wheel_delta
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn key_just_pressed(&self, key: Key) -> bool {
        self.keys_down.contains(&key) && !self.keys_down_prev.contains(&key)
    }

    pub fn key_just_released(&self, key: Key) -> bool {
        !self.keys_down.contains(&key) && self.keys_down_prev.contains(&key)
    }

    pub fn shift_down(&self) -> bool {
        self.is_key_down(Key::ShiftLeft) || self.is_key_down(Key::ShiftRight)
    }

    pub fn buttons_down(&self) -> MouseButtons {
        self.buttons_down
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(MouseButtons::from(button))
    }

    pub fn button_just_pressed(&self, button: MouseButton) -> bool {
        let flag = MouseButtons::from(button);
        self.buttons_down.contains(flag) && !self.buttons_down_prev.contains(flag)
    }

    pub fn button_just_released(&self, button: MouseButton) -> bool {
        let flag = MouseButtons::from(button);
        !self.buttons_down.contains(flag) && self.buttons_down_prev.contains(flag)
    }

    /// Buttons that transitioned to down this frame.
    pub fn buttons_just_pressed(&self) -> MouseButtons {
        self.buttons_down & !self.buttons_down_prev
    }
}
