//! Widget visual states and the default palette.

use peniko::Color;

/// The state a widget should render as, resolved from its interaction flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Normal,
    Hover,
    Pressed,
    Focused,
    Disabled,
}

/// Fill colors per visual state.
#[derive(Debug, Clone)]
pub struct Palette {
    pub normal: Color,
    pub hover: Color,
    pub pressed: Color,
    pub focused: Color,
    pub disabled: Color,
    pub outline: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            normal: Color::from_rgb8(0x3a, 0x3d, 0x41),
            hover: Color::from_rgb8(0x4a, 0x4e, 0x54),
            pressed: Color::from_rgb8(0x2b, 0x5c, 0x8a),
            focused: Color::from_rgb8(0x44, 0x48, 0x4e),
            disabled: Color::from_rgb8(0x2a, 0x2c, 0x2e),
            outline: Color::from_rgb8(0x6a, 0x9e, 0xd4),
            text: Color::from_rgb8(0xe8, 0xe8, 0xe8),
        }
    }
}

impl Palette {
    pub fn fill_for(&self, state: VisualState) -> Color {
        match state {
            VisualState::Normal => self.normal,
            VisualState::Hover => self.hover,
            VisualState::Pressed => self.pressed,
            VisualState::Focused => self.focused,
            VisualState::Disabled => self.disabled,
        }
    }
}
