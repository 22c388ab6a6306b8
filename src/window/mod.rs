//! Native window ownership: host nodes, the lifecycle machine, the
//! platform-id registry and the modal stack.

pub(crate) mod host;
pub(crate) mod modal;
pub(crate) mod native;
pub(crate) mod registry;

pub use host::{WindowKind, WindowNode};
pub use native::{NativeWindow, WindowPhase};

pub(crate) use modal::ModalStack;
pub(crate) use registry::WindowRegistry;
