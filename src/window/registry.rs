//! Platform-id to host-node registry.
//!
//! Insertion order doubles as render order for secondary windows, which is
//! why this is an `IndexMap` and not a hash map.

use indexmap::IndexMap;

use crate::node::NodeId;
use crate::platform::PlatformWindowId;

#[derive(Default)]
pub(crate) struct WindowRegistry {
    map: IndexMap<PlatformWindowId, NodeId>,
}

impl WindowRegistry {
    pub(crate) fn register(&mut self, id: PlatformWindowId, host: NodeId) {
        if self.map.insert(id, host).is_some() {
            log::warn!("{id} registered twice");
        }
    }

    /// Drop the association. Exactly one release per registration; a second
    /// call returns `None` and warns instead of corrupting the map.
    pub(crate) fn release(&mut self, id: PlatformWindowId) -> Option<NodeId> {
        let host = self.map.shift_remove(&id);
        if host.is_none() {
            log::warn!("{id} released but was not registered");
        }
        host
    }

    pub(crate) fn get(&self, id: PlatformWindowId) -> Option<NodeId> {
        self.map.get(&id).copied()
    }

    /// Registration-ordered copy, safe to iterate while hosts mutate the map.
    pub(crate) fn snapshot(&self) -> Vec<(PlatformWindowId, NodeId)> {
        self.map.iter().map(|(id, host)| (*id, *host)).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
