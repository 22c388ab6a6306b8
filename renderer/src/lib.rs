//! Drawing-context interface for the arbor scene-tree runtime.
//!
//! The engine never talks to a GPU or a font shaper directly; every widget
//! paints through the [`Renderer`] trait. A backend owns its brush and bitmap
//! caches and may lose its render target mid-frame, which it reports through
//! [`Renderer::begin`] so callers can abort that window's drawing for the
//! frame without crashing.

use peniko::Color;
use peniko::kurbo::{Point, Rect};

/// Text styling for [`Renderer::draw_text`].
///
/// Shaping, fallback and metrics are the backend's problem; the engine only
/// carries what it was configured with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttrs {
    pub size: f32,
    pub color: Color,
}

impl Default for TextAttrs {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
        }
    }
}

/// Opaque handle to a bitmap loaded by the resource collaborator.
///
/// The scene tree never owns pixel data; it only references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// A drawing context for one window's surface.
pub trait Renderer {
    /// Start a frame. Returns `false` when the render target is invalid and
    /// needs recreation; the caller must skip all drawing for this window
    /// this frame.
    fn begin(&mut self) -> bool;

    /// Fill an axis-aligned rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    /// Draw formatted text with its top-left corner at `pos`.
    fn draw_text(&mut self, text: &str, pos: Point, attrs: &TextAttrs);

    /// Draw a loaded bitmap into `rect`.
    fn draw_image(&mut self, image: ImageHandle, rect: Rect);

    /// End the frame and present.
    fn finish(&mut self);
}

/// A renderer that accepts and discards every draw call.
///
/// Used by the headless platform and by windows whose graphics
/// initialization is intentionally skipped.
#[derive(Debug, Default)]
pub struct NoopRenderer {
    valid: bool,
    frames: u64,
}

impl NoopRenderer {
    pub fn new() -> Self {
        Self {
            valid: true,
            frames: 0,
        }
    }

    /// Simulate a lost render target: every subsequent `begin` fails until
    /// [`NoopRenderer::restore`] is called.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn restore(&mut self) {
        self.valid = true;
    }

    /// Number of frames that were successfully begun.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for NoopRenderer {
    fn begin(&mut self) -> bool {
        if self.valid {
            self.frames += 1;
        }
        self.valid
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _width: f64) {}

    fn draw_text(&mut self, _text: &str, _pos: Point, _attrs: &TextAttrs) {}

    fn draw_image(&mut self, _image: ImageHandle, _rect: Rect) {}

    fn finish(&mut self) {}
}
