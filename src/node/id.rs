//! `NodeId`s are small unique identifiers for nodes in the scene tree.
//!
//! All tree structure queries and mutations go through the id rather than
//! the node object, so they stay usable while the node itself is borrowed
//! inside one of its own hooks.

use std::{cell::RefCell, rc::Rc};

use peniko::kurbo::{Point, Size, Vec2};
use slotmap::new_key_type;

use super::state::{NodeState, ProcessMode};
use super::storage::NODE_STORAGE;
use super::{AnyNode, Node};
use crate::error::TreeError;

new_key_type! {
    /// A small unique identifier for an instance of a [`Node`].
    pub struct NodeId;
}

pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

impl NodeId {
    /// Allocate a fresh id. Node constructors call this; the id only becomes
    /// part of a tree once the node is added under a parent.
    pub fn new() -> NodeId {
        NODE_STORAGE.with_borrow_mut(|s| s.node_ids.insert(()))
    }

    /// Whether this id still refers to a live node.
    pub fn is_valid(&self) -> bool {
        NODE_STORAGE.with_borrow(|s| s.node_ids.contains_key(*self))
    }

    pub(crate) fn state(&self) -> Rc<RefCell<NodeState>> {
        NODE_STORAGE.with_borrow_mut(|s| {
            if !s.node_ids.contains_key(*self) {
                // Removed ids get an inert shared state instead of a panic.
                s.stale_state.clone()
            } else {
                s.states
                    .entry(*self)
                    .unwrap()
                    .or_insert_with(|| Rc::new(RefCell::new(NodeState::default())))
                    .clone()
            }
        })
    }

    pub(crate) fn node(&self) -> Option<Rc<RefCell<AnyNode>>> {
        NODE_STORAGE.with_borrow(|s| s.nodes.get(*self).cloned())
    }

    pub fn name(&self) -> String {
        self.state().borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.state().borrow_mut().name = name.into();
    }

    pub fn parent(&self) -> Option<NodeId> {
        NODE_STORAGE.with_borrow(|s| s.parent.get(*self).copied().flatten())
    }

    pub fn children(&self) -> Vec<NodeId> {
        NODE_STORAGE.with_borrow(|s| s.children.get(*self).cloned().unwrap_or_default())
    }

    pub fn child_count(&self) -> usize {
        NODE_STORAGE.with_borrow(|s| s.children.get(*self).map_or(0, |c| c.len()))
    }

    /// The root of the tree this node belongs to (itself when detached).
    pub fn tree_root(&self) -> NodeId {
        NODE_STORAGE.with_borrow(|s| s.root_of(*self))
    }

    pub fn is_descendant_of(&self, ancestor: NodeId) -> bool {
        let mut current = self.parent();
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = id.parent();
        }
        false
    }

    /// Add a newly constructed node as the last child, using the node's
    /// default name. Returns the child's id.
    pub fn add_child(&self, child: impl Node + 'static) -> NodeId {
        let name = child.default_name().to_string();
        self.add_child_impl(Box::new(child), name)
    }

    /// Add a newly constructed node as the last child under an explicit name.
    pub fn add_child_named(&self, child: impl Node + 'static, name: impl Into<String>) -> NodeId {
        self.add_child_impl(Box::new(child), name.into())
    }

    fn add_child_impl(&self, child: AnyNode, name: String) -> NodeId {
        let child_id = child.id();
        NODE_STORAGE.with_borrow_mut(|s| {
            s.children.entry(*self).unwrap().or_default().push(child_id);
            s.parent.insert(child_id, Some(*self));
            s.nodes.insert(child_id, Rc::new(RefCell::new(child)));
        });
        child_id.set_name(name);
        child_id.run_attach_hooks();
        self.notify_child_added(child_id);
        child_id
    }

    /// Reparent an already-attached node under this one. Rejects adoption of
    /// this node itself or any of its ancestors, which would create a cycle.
    pub fn adopt(&self, child: NodeId) -> Result<(), TreeError> {
        if !child.is_valid() || !self.is_valid() {
            return Err(TreeError::Stale);
        }
        if child == *self || self.is_descendant_of(child) {
            return Err(TreeError::WouldCycle(child.name()));
        }
        NODE_STORAGE.with_borrow_mut(|s| {
            if let Some(Some(old_parent)) = s.parent.get(child).copied()
                && let Some(children) = s.children.get_mut(old_parent)
            {
                children.retain(|c| *c != child);
            }
            s.parent.insert(child, Some(*self));
            s.children.entry(*self).unwrap().or_default().push(child);
        });
        child.run_attach_hooks();
        self.notify_child_added(child);
        Ok(())
    }

    pub(crate) fn run_attach_hooks(&self) {
        let Some(node) = self.node() else { return };
        // A node adopting itself from one of its own hooks would already be
        // borrowed; skip the hook rather than panic.
        let Ok(mut node) = node.try_borrow_mut() else {
            log::warn!("attach hooks skipped for `{}`: node is borrowed", self.name());
            return;
        };
        node.attached();
        let run_ready = {
            let state = self.state();
            let mut state = state.borrow_mut();
            if state.ready_ran {
                false
            } else {
                state.ready_ran = true;
                true
            }
        };
        if run_ready {
            node.ready();
        }
    }

    fn notify_child_added(&self, child: NodeId) {
        if let Some(node) = self.node()
            && let Ok(mut node) = node.try_borrow_mut()
        {
            node.child_added(child);
        }
    }

    /// Request deferred destruction. Idempotent; the actual teardown happens
    /// on the next process pass, never the one that requested it.
    pub fn queue_free(&self) {
        self.state().borrow_mut().pending_free = true;
    }

    pub fn is_pending_free(&self) -> bool {
        self.state().borrow().pending_free
    }

    /// Path from the tree root to this node, e.g. `/root/Panel/OkButton`.
    /// Only meaningful while the node is attached.
    pub fn absolute_path(&self) -> String {
        let mut names = Vec::new();
        let mut current = Some(*self);
        while let Some(id) = current {
            names.push(id.name());
            current = id.parent();
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// The nearest ancestor that hosts a native window, or `None` when the
    /// node lives under the implicit primary window. Every window-aware
    /// decision in the engine goes through this single mechanism.
    pub fn owning_window(&self) -> Option<NodeId> {
        let mut current = self.parent();
        while let Some(id) = current {
            if id.state().borrow().is_window_host {
                return Some(id);
            }
            current = id.parent();
        }
        None
    }

    /// Position accumulated from this node's offset plus every ancestor's,
    /// stopping at (and expressed relative to) the owning window, or the
    /// global origin for window-less nodes.
    pub fn accumulated_origin(&self) -> Point {
        let mut origin = Vec2::ZERO;
        let mut current = Some(*self);
        while let Some(id) = current {
            let state = id.state();
            let state = state.borrow();
            if id != *self && state.is_window_host {
                break;
            }
            origin += state.offset;
            drop(state);
            current = id.parent();
        }
        origin.to_point()
    }

    pub fn offset(&self) -> Vec2 {
        self.state().borrow().offset
    }

    pub fn set_offset(&self, offset: impl Into<Vec2>) {
        self.state().borrow_mut().offset = offset.into();
    }

    pub fn size(&self) -> Size {
        self.state().borrow().size
    }

    pub fn set_size(&self, size: impl Into<Size>) {
        self.state().borrow_mut().size = size.into();
    }

    pub fn is_visible(&self) -> bool {
        self.state().borrow().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.state().borrow_mut().visible = visible;
    }

    pub fn process_mode(&self) -> ProcessMode {
        self.state().borrow().process_mode
    }

    pub fn set_process_mode(&self, mode: ProcessMode) {
        self.state().borrow_mut().process_mode = mode;
    }

    pub fn is_active(&self) -> bool {
        self.state().borrow().active
    }

    /// Activate or deactivate this node and all of its descendants. The flag
    /// propagates explicitly and is independent of tree membership.
    pub fn set_active(&self, active: bool) {
        self.state().borrow_mut().active = active;
        for child in self.children() {
            child.set_active(active);
        }
    }

    /// All descendants, depth-first, parents before children.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        fn collect(id: NodeId, out: &mut Vec<NodeId>) {
            for child in id.children() {
                out.push(child);
                collect(child, out);
            }
        }
        collect(*self, &mut out);
        out
    }

    /// Run a closure against the node object downcast to its concrete type.
    pub fn with_node<T: Node, R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, TreeError> {
        let node = self.node().ok_or(TreeError::Stale)?;
        let mut node = node.borrow_mut();
        let concrete =
            node.as_any_mut()
                .downcast_mut::<T>()
                .ok_or_else(|| TreeError::WrongType {
                    path: self.absolute_path(),
                    expected: short_type_name::<T>(),
                })?;
        Ok(f(concrete))
    }

    pub(crate) fn node_is<T: Node>(&self) -> bool {
        self.node()
            .map(|n| n.borrow().as_any().is::<T>())
            .unwrap_or(false)
    }

    pub(crate) fn is_window_host(&self) -> bool {
        self.state().borrow().is_window_host
    }
}
