//! In-process windowing backend with no OS dependency.
//!
//! Windows are plain bookkeeping records and the event queue is fed by the
//! test driving the app. Destruction is asynchronous like the real backend:
//! `request_destroy` only schedules a `Destroyed` message for the next pump.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use peniko::kurbo::Size;

use super::{Platform, PlatformWindow, PlatformWindowId, WindowDesc};
use crate::error::PlatformError;
use crate::event::WindowMessage;
use arbor_renderer::{NoopRenderer, Renderer};

#[derive(Default)]
struct Shared {
    next_id: u64,
    queue: VecDeque<(PlatformWindowId, WindowMessage)>,
    pending_destroy: Vec<PlatformWindowId>,
    owners: Vec<(PlatformWindowId, Option<PlatformWindowId>)>,
    fail_next_create: bool,
    fail_next_graphics: bool,
}

pub struct HeadlessPlatform {
    shared: Rc<RefCell<Shared>>,
}

/// Cloneable handle for feeding synthetic OS events into a
/// [`HeadlessPlatform`]'s queue.
#[derive(Clone)]
pub struct HeadlessEvents {
    shared: Rc<RefCell<Shared>>,
}

struct HeadlessWindow {
    id: PlatformWindowId,
    size: Cell<Size>,
    visible: Cell<bool>,
    title: RefCell<String>,
    shared: Rc<RefCell<Shared>>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared::default())),
        }
    }

    pub fn events(&self) -> HeadlessEvents {
        HeadlessEvents {
            shared: self.shared.clone(),
        }
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEvents {
    pub fn push(&self, window: PlatformWindowId, message: WindowMessage) {
        self.shared.borrow_mut().queue.push_back((window, message));
    }

    /// Make the next `create_window` call fail.
    pub fn fail_next_create(&self) {
        self.shared.borrow_mut().fail_next_create = true;
    }

    /// Make the next `create_renderer` call fail.
    pub fn fail_next_graphics(&self) {
        self.shared.borrow_mut().fail_next_graphics = true;
    }

    /// The owner recorded when `window` was created, if any.
    pub fn owner_of(&self, window: PlatformWindowId) -> Option<PlatformWindowId> {
        self.shared
            .borrow()
            .owners
            .iter()
            .find(|(id, _)| *id == window)
            .and_then(|(_, owner)| *owner)
    }
}

impl Platform for HeadlessPlatform {
    fn create_window(&mut self, desc: &WindowDesc) -> Result<Rc<dyn PlatformWindow>, PlatformError> {
        let mut shared = self.shared.borrow_mut();
        if std::mem::take(&mut shared.fail_next_create) {
            return Err(PlatformError::CreateFailed(
                "injected window creation failure".into(),
            ));
        }
        shared.next_id += 1;
        let id = PlatformWindowId(shared.next_id);
        shared.owners.push((id, desc.owner));
        drop(shared);
        Ok(Rc::new(HeadlessWindow {
            id,
            size: Cell::new(desc.size),
            visible: Cell::new(false),
            title: RefCell::new(desc.title.clone()),
            shared: self.shared.clone(),
        }))
    }

    fn create_renderer(
        &mut self,
        _window: &Rc<dyn PlatformWindow>,
    ) -> Result<Box<dyn Renderer>, PlatformError> {
        let mut shared = self.shared.borrow_mut();
        if std::mem::take(&mut shared.fail_next_graphics) {
            return Err(PlatformError::GraphicsFailed(
                "injected graphics failure".into(),
            ));
        }
        Ok(Box::new(NoopRenderer::new()))
    }

    fn pump(&mut self, out: &mut Vec<(PlatformWindowId, WindowMessage)>) {
        let mut shared = self.shared.borrow_mut();
        out.extend(shared.queue.drain(..));
        for id in shared.pending_destroy.drain(..) {
            out.push((id, WindowMessage::Destroyed));
        }
    }
}

impl PlatformWindow for HeadlessWindow {
    fn id(&self) -> PlatformWindowId {
        self.id
    }

    fn logical_size(&self) -> Size {
        self.size.get()
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    fn focus(&self) {
        self.shared
            .borrow_mut()
            .queue
            .push_back((self.id, WindowMessage::Focused(true)));
    }

    fn request_redraw(&self) {
        self.shared
            .borrow_mut()
            .queue
            .push_back((self.id, WindowMessage::RedrawRequested));
    }

    fn request_destroy(&self) {
        let mut shared = self.shared.borrow_mut();
        if !shared.pending_destroy.contains(&self.id) {
            shared.pending_destroy.push(self.id);
        }
    }
}
