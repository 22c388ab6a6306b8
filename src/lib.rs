//! A retained scene-graph engine for small desktop tools.
//!
//! The tree is built from [`Node`](node::Node) implementations addressed by
//! [`NodeId`](node::NodeId) and slash-separated paths. A single-threaded
//! frame loop pumps platform messages, filters them through the modal stack,
//! runs the input and process passes and renders the primary window plus any
//! open secondary windows. Secondary and modal windows are ordinary nodes
//! ([`WindowNode`](window::WindowNode)) whose subtrees receive window-local
//! input.
//!
//! [`App`] drives a real windowing backend; [`HeadlessApp`](headless::HeadlessApp)
//! drives the identical loop in-process for tests.

pub mod app;
mod app_handle;
mod app_state;
pub mod context;
pub mod error;
pub mod event;
pub mod headless;
pub mod input;
pub mod node;
pub mod platform;
pub mod theme;
pub mod views;
pub mod window;

pub use app::App;
pub use app_state::{close_window, quit};
pub use error::{PlatformError, TreeError};

pub use peniko;
pub use peniko::kurbo;

pub mod prelude {
    pub use crate::app::App;
    pub use crate::app_state::{close_window, quit};
    pub use crate::context::{InputCx, PaintCx, ProcessCx};
    pub use crate::error::{PlatformError, TreeError};
    pub use crate::event::{MouseButton, WindowMessage};
    pub use crate::headless::HeadlessApp;
    pub use crate::input::{InputSnapshot, Key, MouseButtons};
    pub use crate::node::{Node, NodeId, NodePath, ProcessMode};
    pub use crate::theme::{Palette, VisualState};
    pub use crate::views::{Button, ClickTrigger, Control, Group, Label, NavDirection, NavMode};
    pub use crate::window::{WindowKind, WindowNode, WindowPhase};
}
