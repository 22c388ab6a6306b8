use std::{cell::RefCell, rc::Rc};

use slotmap::{SecondaryMap, SlotMap};

use super::{AnyNode, NodeId, state::NodeState};

thread_local! {
    pub(crate) static NODE_STORAGE: RefCell<NodeStorage> = Default::default();
}

/// Backing store for the scene tree.
///
/// Node identity lives in a slotmap; the node objects, their state and the
/// parent/children relations live in secondary maps keyed by the same ids.
/// Parent links are therefore non-owning by construction: dropping a key
/// from the primary map invalidates every reference to it.
pub(crate) struct NodeStorage {
    pub(crate) node_ids: SlotMap<NodeId, ()>,
    pub(crate) nodes: SecondaryMap<NodeId, Rc<RefCell<AnyNode>>>,
    pub(crate) children: SecondaryMap<NodeId, Vec<NodeId>>,
    pub(crate) parent: SecondaryMap<NodeId, Option<NodeId>>,
    pub(crate) states: SecondaryMap<NodeId, Rc<RefCell<NodeState>>>,
    /// Fallback state handed out for ids that have already been removed, so
    /// late queries see inert defaults instead of panicking.
    pub(crate) stale_state: Rc<RefCell<NodeState>>,
}

impl Default for NodeStorage {
    fn default() -> Self {
        Self {
            node_ids: Default::default(),
            nodes: Default::default(),
            children: Default::default(),
            parent: Default::default(),
            states: Default::default(),
            stale_state: Rc::new(RefCell::new(NodeState {
                active: false,
                process_mode: super::state::ProcessMode::Disabled,
                ..Default::default()
            })),
        }
    }
}

impl NodeStorage {
    pub(crate) fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(Some(parent)) = self.parent.get(current) {
            current = *parent;
        }
        current
    }
}
