//! The modal exclusivity stack.
//!
//! While any modal window is open, input only reaches the topmost modal and
//! windows owned by it. Pops are expected in LIFO order; an out-of-order
//! removal is tolerated and logged, and the stack stays consistent.

use smallvec::SmallVec;

use crate::node::NodeId;

#[derive(Default)]
pub(crate) struct ModalStack {
    stack: SmallVec<[NodeId; 4]>,
}

impl ModalStack {
    pub(crate) fn push(&mut self, host: NodeId) {
        if self.stack.contains(&host) {
            log::warn!("modal `{}` pushed twice", host.name());
            return;
        }
        self.stack.push(host);
    }

    /// Returns whether `host` was actually on the stack.
    pub(crate) fn remove(&mut self, host: NodeId) -> bool {
        match self.stack.last() {
            Some(top) if *top == host => {
                self.stack.pop();
                true
            }
            _ => {
                let before = self.stack.len();
                self.stack.retain(|h| *h != host);
                let removed = self.stack.len() != before;
                if removed {
                    log::warn!("modal `{}` removed out of order", host.name());
                }
                removed
            }
        }
    }

    pub(crate) fn top(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.stack.clear();
    }

    /// Whether input addressed to `target` (a window host, or `None` for the
    /// primary window) may pass. The target qualifies when the topmost modal
    /// appears somewhere in its owning-window chain.
    pub(crate) fn allows(&self, target: Option<NodeId>) -> bool {
        let Some(top) = self.top() else {
            return true;
        };
        let mut current = target;
        while let Some(host) = current {
            if host == top {
                return true;
            }
            current = host.owning_window();
        }
        false
    }
}
