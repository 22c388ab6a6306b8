//! Window host nodes.
//!
//! A [`WindowNode`] is an ordinary scene-tree node whose subtree is rendered
//! into (and receives input from) its own native window. Opening is deferred:
//! attaching the node queues an open request that the application loop
//! services at the start of the next frame, so window creation never happens
//! mid-traversal.

use std::any::Any;

use crate::app_state::{AppUpdateEvent, add_app_update_event};
use crate::event::WindowMessage;
use crate::input::InputSnapshot;
use crate::node::{Node, NodeId};
use crate::platform::{Platform, PlatformWindowId, WindowDesc};

use super::native::{NativeWindow, WindowPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Independent tool window. Input routes to it and the primary window
    /// alike.
    Secondary,
    /// Exclusive dialog. While open (and topmost), input to every other
    /// window is discarded.
    Modal,
}

pub struct WindowNode {
    id: NodeId,
    kind: WindowKind,
    desc: WindowDesc,
    native: Option<NativeWindow>,
    input: InputSnapshot,
    focused: bool,
    open_requested: bool,
    on_close: Option<Box<dyn FnMut(NodeId) -> bool>>,
    on_destroyed: Option<Box<dyn FnMut(NodeId)>>,
}

impl WindowNode {
    fn new(kind: WindowKind, title: &str) -> Self {
        Self {
            id: NodeId::new(),
            kind,
            desc: WindowDesc {
                title: title.to_string(),
                ..Default::default()
            },
            native: None,
            input: InputSnapshot::default(),
            focused: false,
            open_requested: false,
            on_close: None,
            on_destroyed: None,
        }
    }

    pub fn secondary(title: &str) -> Self {
        Self::new(WindowKind::Secondary, title)
    }

    pub fn modal(title: &str) -> Self {
        Self::new(WindowKind::Modal, title)
    }

    pub fn with_size(mut self, size: impl Into<peniko::kurbo::Size>) -> Self {
        self.desc.size = size.into();
        self
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.native.as_ref().is_some_and(|n| n.is_open())
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The input snapshot local to this window. Widgets below this host read
    /// it instead of the primary window's.
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn set_title(&mut self, title: &str) {
        self.desc.title = title.to_string();
        if let Some(native) = &mut self.native {
            native.set_title(title);
        }
    }

    /// Veto hook for user close requests. Return `false` to keep the window
    /// open. Engine-initiated [`close`](Self::close) bypasses it.
    pub fn set_on_close(&mut self, f: impl FnMut(NodeId) -> bool + 'static) {
        self.on_close = Some(Box::new(f));
    }

    /// Notification that the native window is gone. Fires once, before the
    /// registry association is released.
    pub fn set_on_destroyed(&mut self, f: impl FnMut(NodeId) + 'static) {
        self.on_destroyed = Some(Box::new(f));
    }

    /// Begin engine-initiated teardown. The node frees itself once the
    /// platform confirms destruction.
    pub fn close(&mut self) {
        if let Some(native) = &mut self.native {
            native.request_close();
        } else {
            // Never opened; nothing to wait for.
            self.id.queue_free();
        }
    }

    pub(crate) fn close_allowed(&mut self) -> bool {
        let id = self.id;
        match &mut self.on_close {
            Some(veto) => veto(id),
            None => true,
        }
    }

    pub(crate) fn platform_id(&self) -> Option<PlatformWindowId> {
        self.native.as_ref().and_then(|n| n.platform_id())
    }

    pub(crate) fn native_mut(&mut self) -> Option<&mut NativeWindow> {
        self.native.as_mut()
    }

    /// Run the full open sequence. Returns whether the window is now shown;
    /// a failure at any stage leaves the host windowless.
    pub(crate) fn open(
        &mut self,
        platform: &mut dyn Platform,
        owner: Option<PlatformWindowId>,
    ) -> bool {
        if self.native.is_some() {
            log::warn!("window `{}` opened twice", self.desc.title);
            return self.is_open();
        }
        self.desc.owner = owner;
        let mut native = NativeWindow::new(self.desc.clone());
        if !native.try_create(platform) {
            return false;
        }
        if !native.init_graphics(platform) {
            native.request_close();
            return false;
        }
        native.show();
        self.id.set_size(native.logical_size());
        self.native = Some(native);
        true
    }

    pub(crate) fn apply_message(&mut self, message: &WindowMessage) {
        match message {
            WindowMessage::Resized(size) => {
                self.id.set_size(*size);
            }
            WindowMessage::Focused(focused) => {
                self.focused = *focused;
            }
            _ => {}
        }
        self.input.apply(message);
    }

    /// Roll this window's edge state over. Called by the frame driver once
    /// per frame, independent of the subtree's process gating.
    pub(crate) fn advance_input(&mut self) {
        self.input.advance();
    }

    pub(crate) fn mark_destroyed(&mut self) {
        if let Some(mut native) = self.native.take() {
            native.mark_destroyed();
            let id = self.id;
            if let Some(f) = &mut self.on_destroyed {
                f(id);
            }
        }
    }
}

impl Node for WindowNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn default_name(&self) -> &'static str {
        "Window"
    }

    fn attached(&mut self) {
        self.id.state().borrow_mut().is_window_host = true;
        self.id.set_size(self.desc.size);
        if !self.open_requested {
            self.open_requested = true;
            add_app_update_event(AppUpdateEvent::OpenWindow { host: self.id });
        }
    }

    fn cleanup(&mut self) {
        if let Some(native) = &mut self.native
            && native.phase() != WindowPhase::Destroyed
        {
            native.request_close();
        }
        self.native = None;
    }

    fn window_mut(&mut self) -> Option<&mut WindowNode> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
