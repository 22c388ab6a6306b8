use std::any::Any;

use arbor_renderer::TextAttrs;
use peniko::Color;

use crate::context::PaintCx;
use crate::node::{Node, NodeId};
use crate::theme::Palette;

/// Static text.
pub struct Label {
    id: NodeId,
    text: String,
    size: f32,
    color: Color,
}

impl Label {
    pub fn new(text: &str) -> Self {
        Self {
            id: NodeId::new(),
            text: text.to_string(),
            size: 14.0,
            color: Palette::default().text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.size = size;
    }
}

impl Node for Label {
    fn id(&self) -> NodeId {
        self.id
    }

    fn default_name(&self) -> &'static str {
        "Label"
    }

    fn draw(&self, cx: &mut PaintCx) {
        cx.renderer.draw_text(
            &self.text,
            cx.origin,
            &TextAttrs {
                size: self.size,
                color: self.color,
            },
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
