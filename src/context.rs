//! Per-pass contexts handed to node hooks.

use peniko::kurbo::{Point, Rect};

use crate::input::InputSnapshot;
use crate::node::NodeId;
use arbor_renderer::Renderer;

/// Context for the input pass. The snapshot is the one belonging to the
/// node's owning window; `dt` is the frame delta in seconds.
pub struct InputCx<'a> {
    pub input: &'a InputSnapshot,
    pub dt: f64,
}

/// Context for the process pass.
pub struct ProcessCx {
    pub dt: f64,
    pub frame: u64,
}

/// Context for the draw pass. `origin` is the top-left of the node being
/// drawn, in the coordinate space of its owning window.
pub struct PaintCx<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub origin: Point,
}

impl PaintCx<'_> {
    /// The node's own rectangle, for the common fill/stroke calls.
    pub fn local_rect(&self, id: NodeId) -> Rect {
        Rect::from_origin_size(self.origin, id.size())
    }

    /// Draw `id`'s visible children and their subtrees, depth-first. Window
    /// hosts are skipped: their subtrees are drawn into their own surfaces.
    pub fn paint_children(&mut self, id: NodeId) {
        for child in id.children() {
            if child.is_window_host() || !child.is_visible() {
                continue;
            }
            let saved = self.origin;
            self.origin += child.offset();
            if let Some(node) = child.node()
                && let Ok(node) = node.try_borrow()
            {
                node.draw(self);
            }
            self.paint_children(child);
            self.origin = saved;
        }
    }
}

/// Paint a whole window subtree rooted at `root`, whose content starts at
/// the window origin.
pub(crate) fn paint_tree(root: NodeId, renderer: &mut dyn Renderer) {
    let mut cx = PaintCx {
        renderer,
        origin: Point::ZERO,
    };
    if let Some(node) = root.node()
        && let Ok(node) = node.try_borrow()
    {
        node.draw(&mut cx);
    }
    cx.paint_children(root);
}
