//! Platform window messages.
//!
//! Every backend translates its native events into [`WindowMessage`]s keyed
//! by the window they target. The application loop filters them through the
//! modal stack before any snapshot or widget sees them.

use peniko::kurbo::{Point, Size};

use crate::input::Key;

/// Mouse buttons the engine routes. Buttons outside this set are dropped at
/// the platform boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One message from the platform layer, addressed to a single window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowMessage {
    /// The user (or the platform) asked the window to close. The engine
    /// decides whether to honor it; nothing is destroyed yet.
    CloseRequested,
    /// Final teardown notification. The platform handle is gone; the
    /// handle-to-instance association must be released exactly once.
    Destroyed,
    Resized(Size),
    Focused(bool),
    CursorMoved(Point),
    CursorLeft,
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Vertical wheel motion in lines, accumulated per frame by the snapshot.
    Wheel(f64),
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key },
    RedrawRequested,
}

impl WindowMessage {
    /// Whether this message is keyboard/pointer input, i.e. subject to modal
    /// exclusivity filtering. Lifecycle messages always pass through.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            WindowMessage::CursorMoved(_)
                | WindowMessage::CursorLeft
                | WindowMessage::MouseDown(_)
                | WindowMessage::MouseUp(_)
                | WindowMessage::Wheel(_)
                | WindowMessage::KeyDown { .. }
                | WindowMessage::KeyUp { .. }
        )
    }
}
