//! Clickable button widget.

use std::any::Any;

use arbor_renderer::TextAttrs;

use crate::context::{InputCx, PaintCx};
use crate::event::MouseButton;
use crate::node::{Node, NodeId};
use crate::theme::{Palette, VisualState};

use super::Control;

/// Which edge of the mouse press fires the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickTrigger {
    OnPress,
    #[default]
    OnRelease,
}

const TEXT_SIZE: f32 = 14.0;
const TEXT_PADDING: f64 = 6.0;

pub struct Button {
    id: NodeId,
    control: Control,
    label: String,
    palette: Palette,
    trigger: ClickTrigger,
    stay_pressed: bool,
    /// Physical pressed state, left and right tracked independently.
    pressed: [bool; 2],
    /// Pressed look kept past release while `stay_pressed` is set.
    latched: bool,
    clicks: u64,
    on_click: Option<Box<dyn FnMut(NodeId, MouseButton)>>,
}

impl Button {
    pub fn new(label: &str) -> Self {
        let id = NodeId::new();
        Self {
            id,
            control: Control::new(id),
            label: label.to_string(),
            palette: Palette::default(),
            trigger: ClickTrigger::default(),
            stay_pressed: false,
            pressed: [false; 2],
            latched: false,
            clicks: 0,
            on_click: None,
        }
    }

    pub fn with_trigger(mut self, trigger: ClickTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_stay_pressed(mut self) -> Self {
        self.stay_pressed = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn set_on_click(&mut self, f: impl FnMut(NodeId, MouseButton) + 'static) {
        self.on_click = Some(Box::new(f));
    }

    pub fn click_count(&self) -> u64 {
        self.clicks
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.iter().any(|p| *p) || self.latched
    }

    /// Explicitly drop a stay-pressed latch.
    pub fn release_latch(&mut self) {
        self.latched = false;
    }

    /// The look to render this frame, recomputed from the interaction flags.
    pub fn visual_state(&self) -> VisualState {
        if !self.control.enabled() {
            VisualState::Disabled
        } else if self.is_pressed() {
            VisualState::Pressed
        } else if self.control.is_focused() {
            if self.control.is_hovered() {
                VisualState::Hover
            } else {
                VisualState::Focused
            }
        } else if self.control.is_hovered() {
            VisualState::Hover
        } else {
            VisualState::Normal
        }
    }

    fn fire(&mut self, button: MouseButton) {
        self.clicks += 1;
        if self.stay_pressed {
            self.latched = true;
        }
        let id = self.id;
        if let Some(f) = &mut self.on_click {
            f(id, button);
        }
    }
}

impl Node for Button {
    fn id(&self) -> NodeId {
        self.id
    }

    fn default_name(&self) -> &'static str {
        "Button"
    }

    fn update_input(&mut self, cx: &mut InputCx) {
        self.control.update(cx);
        if !self.control.enabled() {
            self.pressed = [false; 2];
            return;
        }

        let hovered = self.control.is_hovered();
        if !hovered && !self.stay_pressed {
            self.pressed = [false; 2];
        }

        for (slot, button) in [(0, MouseButton::Left), (1, MouseButton::Right)] {
            if hovered && cx.input.button_just_pressed(button) {
                self.pressed[slot] = true;
                if self.trigger == ClickTrigger::OnPress {
                    self.fire(button);
                }
            }
            if cx.input.button_just_released(button) && self.pressed[slot] {
                if hovered && self.trigger == ClickTrigger::OnRelease {
                    self.fire(button);
                } else if self.stay_pressed {
                    // Pressed state persists past release even when no click
                    // fires, until release_latch.
                    self.latched = true;
                }
                // Release always clears the physical flag; stay-pressed
                // survives through the latch instead.
                self.pressed[slot] = false;
            }
        }
    }

    fn draw(&self, cx: &mut PaintCx) {
        let rect = cx.local_rect(self.id);
        let state = self.visual_state();
        cx.renderer.fill_rect(rect, self.palette.fill_for(state));
        if self.control.is_focused() {
            cx.renderer.stroke_rect(rect, self.palette.outline, 1.0);
        }
        let at = peniko::kurbo::Point::new(cx.origin.x + TEXT_PADDING, cx.origin.y + TEXT_PADDING);
        cx.renderer.draw_text(
            &self.label,
            at,
            &TextAttrs {
                size: TEXT_SIZE,
                color: self.palette.text,
            },
        );
    }

    fn control_mut(&mut self) -> Option<&mut Control> {
        Some(&mut self.control)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
