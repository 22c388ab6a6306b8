use std::any::Any;

use crate::node::{Node, NodeId, install_root};

/// A node with no behavior of its own, used for grouping and positioning.
pub struct Group {
    id: NodeId,
}

impl Group {
    pub fn new() -> Self {
        Self { id: NodeId::new() }
    }

    /// Create a detached tree root named `name` and return its id.
    pub fn new_root(name: &str) -> NodeId {
        install_root(Box::new(Group::new()), name)
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Group {
    fn id(&self) -> NodeId {
        self.id
    }

    fn default_name(&self) -> &'static str {
        "Group"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
