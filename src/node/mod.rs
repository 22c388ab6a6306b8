//! The scene tree: node identity, ownership, lifecycle and addressing.
//!
//! Ownership flows strictly parent to children. A node's lifetime never
//! exceeds its parent's: destruction is always requested via
//! [`NodeId::queue_free`] and resolved at the next frame's process pass,
//! children first, so nothing is torn down mid-traversal of the frame that
//! requested it.

use std::any::Any;

pub(crate) mod id;
pub(crate) mod path;
pub(crate) mod state;
pub(crate) mod storage;

pub use id::NodeId;
pub use path::NodePath;
pub use state::{NodeState, ProcessMode};
pub(crate) use storage::NODE_STORAGE;

use crate::context::{InputCx, PaintCx, ProcessCx};
use crate::views::Control;
use crate::window::WindowNode;

/// A unit in the scene tree: a widget, a window host or a grouping construct.
///
/// Lifecycle hooks, in order: [`attached`](Node::attached) runs every time the
/// node gains a parent (the parent link is already set, so ancestors are
/// visible); [`ready`](Node::ready) runs once, after the first attach;
/// [`update_input`](Node::update_input) and [`process`](Node::process) run
/// each frame; [`cleanup`](Node::cleanup) runs exactly once during deferred
/// teardown, after all descendants have been cleaned up and before the node
/// is unlinked from its parent.
pub trait Node: 'static {
    fn id(&self) -> NodeId;

    /// Name assigned when the node is added without an explicit one.
    fn default_name(&self) -> &'static str {
        "Node"
    }

    fn attached(&mut self) {}

    fn ready(&mut self) {}

    /// Notification that `child` was just added under this node.
    fn child_added(&mut self, _child: NodeId) {}

    /// Hover/focus/click pass. Runs before `process`, with the input snapshot
    /// of the node's owning window (global when window-less).
    fn update_input(&mut self, _cx: &mut InputCx) {}

    fn process(&mut self, _cx: &mut ProcessCx) {}

    fn draw(&self, _cx: &mut PaintCx) {}

    fn cleanup(&mut self) {}

    /// Access to the interaction state machine, for widgets that have one.
    fn control_mut(&mut self) -> Option<&mut Control> {
        None
    }

    /// Access to the window host, for nodes that own a native window.
    fn window_mut(&mut self) -> Option<&mut WindowNode> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub(crate) type AnyNode = Box<dyn Node>;

/// Install a node as a detached tree root. Roots have no parent; `ready`
/// still runs once, here.
pub(crate) fn install_root(node: AnyNode, name: impl Into<String>) -> NodeId {
    use std::{cell::RefCell, rc::Rc};
    let id = node.id();
    NODE_STORAGE.with_borrow_mut(|s| {
        s.nodes.insert(id, Rc::new(RefCell::new(node)));
        s.parent.insert(id, None);
    });
    id.set_name(name.into());
    id.run_attach_hooks();
    id
}

/// Perform the actual teardown of a queued-free node: free descendants
/// depth-first (each through the queue mechanism), run the node's `cleanup`,
/// then unlink it from its parent and drop its storage entries.
pub(crate) fn perform_free(id: NodeId) {
    if !id.is_valid() {
        return;
    }
    for child in id.children() {
        child.queue_free();
        perform_free(child);
    }
    if let Some(node) = id.node()
        && let Ok(mut node) = node.try_borrow_mut()
    {
        node.cleanup();
    }
    NODE_STORAGE.with_borrow_mut(|s| {
        if let Some(Some(parent)) = s.parent.get(id).copied()
            && let Some(children) = s.children.get_mut(parent)
        {
            children.retain(|c| *c != id);
        }
        s.children.remove(id);
        s.parent.remove(id);
        s.states.remove(id);
        s.nodes.remove(id);
        s.node_ids.remove(id);
    });
}
