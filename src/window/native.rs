//! Lifecycle wrapper around one platform window and its renderer.
//!
//! The phase machine only ever moves forward. Creation and graphics setup
//! report failure by return value and log; teardown is split into a request
//! (`request_close`) and the asynchronous completion (`mark_destroyed`), so
//! engine-initiated and OS-initiated teardown converge on the same path.

use std::rc::Rc;

use peniko::kurbo::Size;

use crate::platform::{Platform, PlatformWindow, PlatformWindowId, WindowDesc};
use arbor_renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Unopened,
    Created,
    GraphicsInitialized,
    Shown,
    Closing,
    Destroyed,
}

pub struct NativeWindow {
    desc: WindowDesc,
    phase: WindowPhase,
    handle: Option<Rc<dyn PlatformWindow>>,
    renderer: Option<Box<dyn Renderer>>,
}

impl NativeWindow {
    pub fn new(desc: WindowDesc) -> Self {
        Self {
            desc,
            phase: WindowPhase::Unopened,
            handle: None,
            renderer: None,
        }
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub fn platform_id(&self) -> Option<PlatformWindowId> {
        self.handle.as_ref().map(|h| h.id())
    }

    pub fn logical_size(&self) -> Size {
        match &self.handle {
            Some(handle) => handle.logical_size(),
            None => self.desc.size,
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase == WindowPhase::Shown
    }

    /// `Unopened -> Created`. Returns whether the native window now exists.
    pub fn try_create(&mut self, platform: &mut dyn Platform) -> bool {
        if self.phase != WindowPhase::Unopened {
            log::warn!("try_create called in phase {:?}", self.phase);
            return false;
        }
        match platform.create_window(&self.desc) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.phase = WindowPhase::Created;
                true
            }
            Err(err) => {
                log::error!("window `{}` not created: {err}", self.desc.title);
                false
            }
        }
    }

    /// `Created -> GraphicsInitialized`. Returns whether a renderer is ready.
    pub fn init_graphics(&mut self, platform: &mut dyn Platform) -> bool {
        if self.phase != WindowPhase::Created {
            log::warn!("init_graphics called in phase {:?}", self.phase);
            return false;
        }
        let handle = self.handle.as_ref().expect("phase Created implies handle");
        match platform.create_renderer(handle) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.phase = WindowPhase::GraphicsInitialized;
                true
            }
            Err(err) => {
                log::error!("graphics for `{}` unavailable: {err}", self.desc.title);
                false
            }
        }
    }

    /// `GraphicsInitialized -> Shown`. Makes the window visible and focused.
    pub fn show(&mut self) -> bool {
        if self.phase != WindowPhase::GraphicsInitialized {
            log::warn!("show called in phase {:?}", self.phase);
            return false;
        }
        let handle = self.handle.as_ref().expect("phase implies handle");
        handle.set_visible(true);
        handle.focus();
        self.phase = WindowPhase::Shown;
        true
    }

    pub fn set_title(&mut self, title: &str) {
        self.desc.title = title.to_string();
        if let Some(handle) = &self.handle {
            handle.set_title(title);
        }
    }

    pub fn focus(&self) {
        if let Some(handle) = &self.handle {
            handle.focus();
        }
    }

    pub fn request_redraw(&self) {
        if let Some(handle) = &self.handle {
            handle.request_redraw();
        }
    }

    /// Ask the OS to tear the window down. Idempotent; completion arrives as
    /// a `Destroyed` message and lands in [`mark_destroyed`](Self::mark_destroyed).
    pub fn request_close(&mut self) {
        match self.phase {
            WindowPhase::Closing | WindowPhase::Destroyed => return,
            WindowPhase::Unopened => {
                self.phase = WindowPhase::Destroyed;
                return;
            }
            _ => {}
        }
        if let Some(handle) = &self.handle {
            handle.request_destroy();
        }
        self.phase = WindowPhase::Closing;
    }

    /// Final transition once the platform reports the window gone. Safe to
    /// call whether the engine or the OS initiated the teardown.
    pub fn mark_destroyed(&mut self) {
        self.handle = None;
        self.renderer = None;
        self.phase = WindowPhase::Destroyed;
    }

    /// Detach the renderer for the duration of a paint pass.
    pub(crate) fn take_renderer(&mut self) -> Option<Box<dyn Renderer>> {
        self.renderer.take()
    }

    pub(crate) fn put_renderer(&mut self, renderer: Box<dyn Renderer>) {
        if self.phase != WindowPhase::Destroyed {
            self.renderer = Some(renderer);
        }
    }
}
