//! The platform seam: native window creation and the event pump.
//!
//! Everything above this module talks to windows through the two traits
//! here, so the same engine runs against the winit backend or the headless
//! one used by the test harness.

use std::rc::Rc;

use peniko::kurbo::Size;

use crate::error::PlatformError;
use crate::event::WindowMessage;
use arbor_renderer::Renderer;

pub(crate) mod headless;
pub(crate) mod winit;

pub use headless::{HeadlessEvents, HeadlessPlatform};
pub use self::winit::WinitPlatform;

/// Engine-side identifier for a native window. Allocated by the platform,
/// stable for the window's lifetime and never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformWindowId(pub(crate) u64);

impl std::fmt::Display for PlatformWindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Requested attributes for a new native window.
#[derive(Debug, Clone)]
pub struct WindowDesc {
    pub title: String,
    pub size: Size,
    pub resizable: bool,
    /// Owning window, set for dialog-style windows. Backends that can
    /// express ownership create the window as a child of the owner.
    pub owner: Option<PlatformWindowId>,
}

impl Default for WindowDesc {
    fn default() -> Self {
        Self {
            title: String::new(),
            size: Size::new(640.0, 480.0),
            resizable: true,
            owner: None,
        }
    }
}

/// A live native window. Created hidden; shown explicitly once its graphics
/// surface exists.
pub trait PlatformWindow {
    fn id(&self) -> PlatformWindowId;
    fn logical_size(&self) -> Size;
    fn set_title(&self, title: &str);
    fn set_visible(&self, visible: bool);
    fn focus(&self);
    fn request_redraw(&self);
    /// Ask the OS to tear the window down. Completion arrives later as a
    /// [`WindowMessage::Destroyed`] from the pump, never synchronously.
    fn request_destroy(&self);
}

/// A windowing backend.
pub trait Platform {
    fn create_window(&mut self, desc: &WindowDesc) -> Result<Rc<dyn PlatformWindow>, PlatformError>;

    fn create_renderer(
        &mut self,
        window: &Rc<dyn PlatformWindow>,
    ) -> Result<Box<dyn Renderer>, PlatformError>;

    /// Drain pending OS events into `out` without blocking.
    fn pump(&mut self, out: &mut Vec<(PlatformWindowId, WindowMessage)>);
}
