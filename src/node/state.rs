use peniko::kurbo::{Size, Vec2};

/// When a node's `process`/`update_input` hooks run relative to its ancestry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessMode {
    /// Runs when the parent runs and the node is active.
    #[default]
    Inherit,
    /// Runs every frame, even under a deactivated ancestor.
    Always,
    /// Never runs. Pending-free is still honored.
    Disabled,
}

/// Per-node bookkeeping held in [`NodeStorage`](super::storage::NodeStorage),
/// separate from the node object so tree queries never contend with a
/// borrowed node.
#[derive(Debug, Clone)]
pub struct NodeState {
    pub name: String,
    /// Position relative to the parent node.
    pub offset: Vec2,
    pub size: Size,
    pub visible: bool,
    pub active: bool,
    pub process_mode: ProcessMode,
    /// Deferred-destruction flag; resolved at the next process pass, never
    /// the one that set it.
    pub pending_free: bool,
    pub(crate) ready_ran: bool,
    pub(crate) is_window_host: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            name: String::new(),
            offset: Vec2::ZERO,
            size: Size::ZERO,
            visible: true,
            active: true,
            process_mode: ProcessMode::Inherit,
            pending_free: false,
            ready_ran: false,
            is_window_host: false,
        }
    }
}

impl NodeState {
    /// Whether hooks run this frame, given whether the parent chain runs.
    pub(crate) fn runs(&self, inherited: bool) -> bool {
        match self.process_mode {
            ProcessMode::Disabled => false,
            ProcessMode::Always => true,
            ProcessMode::Inherit => inherited && self.active,
        }
    }
}
