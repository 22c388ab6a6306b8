//! The frame driver.
//!
//! One `AppHandle` owns the primary native window, the platform backend, the
//! window registry and the modal stack, and runs the per-frame sequence:
//! drain deferred requests, pump and route platform messages (with modal
//! filtering), run the input pass, run the process pass (resolving deferred
//! frees), render every open window, advance the global snapshot.

use peniko::kurbo::Size;

use crate::app_state::{AppState, AppUpdateEvent, take_app_update_events};
use crate::context::{InputCx, ProcessCx, paint_tree};
use crate::error::PlatformError;
use crate::event::WindowMessage;
use crate::input::InputSnapshot;
use crate::node::{NodeId, perform_free};
use crate::platform::{Platform, PlatformWindowId, WindowDesc};
use crate::window::{ModalStack, NativeWindow, WindowKind, WindowRegistry};

pub(crate) struct AppHandle {
    platform: Box<dyn Platform>,
    root: NodeId,
    primary: NativeWindow,
    primary_id: PlatformWindowId,
    primary_focused: bool,
    registry: WindowRegistry,
    modals: ModalStack,
    state: AppState,
    messages: Vec<(PlatformWindowId, WindowMessage)>,
}

impl AppHandle {
    pub(crate) fn new(
        mut platform: Box<dyn Platform>,
        root: NodeId,
        desc: WindowDesc,
    ) -> Result<Self, PlatformError> {
        let mut primary = NativeWindow::new(desc);
        if !primary.try_create(&mut *platform) {
            return Err(PlatformError::CreateFailed("primary window".into()));
        }
        if !primary.init_graphics(&mut *platform) {
            return Err(PlatformError::GraphicsFailed("primary window".into()));
        }
        primary.show();
        let primary_id = primary
            .platform_id()
            .ok_or_else(|| PlatformError::CreateFailed("primary window".into()))?;
        Ok(Self {
            platform,
            root,
            primary,
            primary_id,
            primary_focused: true,
            registry: WindowRegistry::default(),
            modals: ModalStack::default(),
            state: AppState::default(),
            messages: Vec::new(),
        })
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn primary_id(&self) -> PlatformWindowId {
        self.primary_id
    }

    pub(crate) fn primary_size(&self) -> Size {
        self.primary.logical_size()
    }

    pub(crate) fn primary_open(&self) -> bool {
        self.primary.is_open()
    }

    pub(crate) fn primary_focused(&self) -> bool {
        self.primary_focused
    }

    pub(crate) fn modal_top(&self) -> Option<NodeId> {
        self.modals.top()
    }

    pub(crate) fn open_window_count(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn global_input(&self) -> &InputSnapshot {
        &self.state.global_input
    }

    /// Run one full frame with the given delta, in seconds.
    pub(crate) fn frame(&mut self, dt: f64) {
        self.process_app_events();
        self.pump_and_route();
        self.input_pass(dt);
        self.process_pass(dt);
        self.render_pass();
        self.advance_window_inputs();
        self.state.global_input.advance();
        self.state.frame += 1;
    }

    /// Drain requests queued since the last frame. Window opens happen here,
    /// never mid-traversal.
    fn process_app_events(&mut self) {
        for event in take_app_update_events() {
            match event {
                AppUpdateEvent::OpenWindow { host } => self.open_window(host),
                AppUpdateEvent::CloseWindow { host } => {
                    if host.is_valid() {
                        let _ = host.with_node(crate::window::WindowNode::close);
                    }
                }
                AppUpdateEvent::Quit => self.primary.request_close(),
            }
        }
    }

    fn open_window(&mut self, host: NodeId) {
        if !host.is_valid() {
            return;
        }
        // Modal windows are created owned by the primary window so the
        // platform can style and stack them accordingly.
        let owner = match host.with_node(|window: &mut crate::window::WindowNode| window.kind()) {
            Ok(WindowKind::Modal) => Some(self.primary_id),
            _ => None,
        };
        let platform = &mut *self.platform;
        let opened = host.with_node(|window: &mut crate::window::WindowNode| {
            if window.open(platform, owner) {
                Some((window.platform_id(), window.kind()))
            } else {
                None
            }
        });
        match opened {
            Ok(Some((Some(id), kind))) => {
                self.registry.register(id, host);
                if kind == WindowKind::Modal {
                    self.modals.push(host);
                }
            }
            Ok(_) => {}
            Err(err) => log::warn!("open request for `{}` dropped: {err}", host.name()),
        }
    }

    /// Pump the platform and route every message through modal filtering to
    /// its window's snapshot and lifecycle handlers.
    fn pump_and_route(&mut self) {
        let mut messages = std::mem::take(&mut self.messages);
        messages.clear();
        self.platform.pump(&mut messages);
        for (id, message) in messages.drain(..) {
            self.route(id, message);
        }
        self.messages = messages;
    }

    fn route(&mut self, id: PlatformWindowId, message: WindowMessage) {
        let target = if id == self.primary_id {
            None
        } else {
            match self.registry.get(id) {
                Some(host) => Some(host),
                None => {
                    if message == WindowMessage::Destroyed {
                        // Late completion for a window already released.
                        self.registry.release(id);
                    } else {
                        log::warn!("{id} has no registered window, dropping {message:?}");
                    }
                    return;
                }
            }
        };

        // Modal exclusivity: input for anything outside the top modal's
        // ownership chain is discarded before any widget can see it.
        if message.is_input() && !self.modals.allows(target) {
            return;
        }

        match target {
            None => self.route_primary(message),
            Some(host) => self.route_secondary(id, host, message),
        }
    }

    fn route_primary(&mut self, message: WindowMessage) {
        match message {
            WindowMessage::CloseRequested => self.primary.request_close(),
            WindowMessage::Destroyed => self.primary.mark_destroyed(),
            WindowMessage::Focused(focused) => self.primary_focused = focused,
            WindowMessage::RedrawRequested => {}
            message => self.state.global_input.apply(&message),
        }
    }

    fn route_secondary(&mut self, id: PlatformWindowId, host: NodeId, message: WindowMessage) {
        match message {
            WindowMessage::CloseRequested => {
                let allowed = host
                    .with_node(crate::window::WindowNode::close_allowed)
                    .unwrap_or(true);
                if allowed {
                    let _ = host.with_node(|window: &mut crate::window::WindowNode| {
                        if let Some(native) = window.native_mut() {
                            native.request_close();
                        }
                    });
                }
            }
            WindowMessage::Destroyed => self.window_destroyed(id),
            message => {
                let _ = host.with_node(|window: &mut crate::window::WindowNode| {
                    window.apply_message(&message);
                });
            }
        }
    }

    /// Final teardown notification for a secondary window: release the
    /// registry association exactly once, pop the modal stack, free the host
    /// node and hand focus back to whichever modal is now on top.
    fn window_destroyed(&mut self, id: PlatformWindowId) {
        let Some(host) = self.registry.get(id) else {
            return;
        };
        // The destroyed hook runs while the association still exists, so the
        // callback can look the window up.
        if host.is_valid() {
            let _ = host.with_node(|window: &mut crate::window::WindowNode| {
                window.mark_destroyed();
            });
        }
        self.registry.release(id);
        let was_modal = self.modals.remove(host);
        if host.is_valid() {
            host.queue_free();
        }
        if was_modal {
            match self.modals.top() {
                Some(top) => {
                    let _ = top.with_node(|window: &mut crate::window::WindowNode| {
                        if let Some(native) = window.native_mut() {
                            native.focus();
                        }
                    });
                }
                // Exclusivity ended; activation goes back to the primary
                // window.
                None => self.primary.focus(),
            }
        }
    }

    fn input_pass(&mut self, dt: f64) {
        let snapshot = self.state.global_input.clone();
        input_walk(self.root, &snapshot, dt, true);
    }

    /// Resolve frees queued before this pass, then run `process` root to
    /// leaves. Frees requested during the walk stay queued for the next pass.
    fn process_pass(&mut self, dt: f64) {
        let mut pending: Vec<NodeId> = self
            .root
            .descendants()
            .into_iter()
            .filter(|id| id.is_pending_free())
            .collect();
        if self.root.is_pending_free() {
            pending.push(self.root);
        }
        for id in pending {
            if id.is_valid() {
                perform_free(id);
            }
        }
        process_walk(self.root, dt, self.state.frame, true);
    }

    /// Render the primary window, then every open secondary window in
    /// registration order. A renderer that fails to begin aborts that
    /// window's frame only.
    fn render_pass(&mut self) {
        if self.primary.is_open()
            && let Some(mut renderer) = self.primary.take_renderer()
        {
            if renderer.begin() {
                paint_tree(self.root, &mut *renderer);
                renderer.finish();
            } else {
                log::warn!("primary render target invalid, skipping frame");
            }
            self.primary.put_renderer(renderer);
        }

        for (_, host) in self.registry.snapshot() {
            if !host.is_valid() {
                continue;
            }
            let taken = host.with_node(|window: &mut crate::window::WindowNode| {
                window
                    .native_mut()
                    .filter(|native| native.is_open())
                    .and_then(|native| native.take_renderer())
            });
            let Ok(Some(mut renderer)) = taken else {
                continue;
            };
            if renderer.begin() {
                paint_tree(host, &mut *renderer);
                renderer.finish();
            } else {
                log::warn!("render target for `{}` invalid, skipping frame", host.name());
            }
            let _ = host.with_node(|window: &mut crate::window::WindowNode| {
                if let Some(native) = window.native_mut() {
                    native.put_renderer(renderer);
                }
            });
        }
    }

    /// Roll every window-local snapshot over, exactly once per frame. This
    /// runs outside the gated process walk so edge state expires even while
    /// a host subtree is deactivated.
    fn advance_window_inputs(&mut self) {
        for (_, host) in self.registry.snapshot() {
            if host.is_valid() {
                let _ = host.with_node(crate::window::WindowNode::advance_input);
            }
        }
    }

    /// Close every secondary window, dispose the primary and clear the modal
    /// stack. Runs after the loop observes the primary closed.
    pub(crate) fn teardown(&mut self) {
        for (_, host) in self.registry.snapshot() {
            if host.is_valid() {
                let _ = host.with_node(crate::window::WindowNode::close);
            }
        }
        // Give the platform a few pumps to deliver the Destroyed completions.
        for _ in 0..8 {
            if self.registry.is_empty() {
                break;
            }
            self.pump_and_route();
            self.process_pass(0.0);
        }
        self.primary.request_close();
        self.pump_and_route();
        self.primary.mark_destroyed();
        self.modals.clear();
    }
}

fn input_walk(id: NodeId, snapshot: &InputSnapshot, dt: f64, parent_runs: bool) {
    let runs = id.state().borrow().runs(parent_runs);
    if runs
        && !id.is_pending_free()
        && let Some(node) = id.node()
        && let Ok(mut node) = node.try_borrow_mut()
    {
        let mut cx = InputCx { input: snapshot, dt };
        node.update_input(&mut cx);
    }
    for child in id.children() {
        // Subtrees under a window host read that window's local snapshot.
        let local = if child.is_window_host() {
            child
                .with_node(|window: &mut crate::window::WindowNode| window.input().clone())
                .ok()
        } else {
            None
        };
        input_walk(child, local.as_ref().unwrap_or(snapshot), dt, runs);
    }
}

fn process_walk(id: NodeId, dt: f64, frame: u64, parent_runs: bool) {
    if !id.is_valid() || id.is_pending_free() {
        return;
    }
    let runs = id.state().borrow().runs(parent_runs);
    if runs
        && let Some(node) = id.node()
        && let Ok(mut node) = node.try_borrow_mut()
    {
        let mut cx = ProcessCx { dt, frame };
        node.process(&mut cx);
    }
    for child in id.children() {
        process_walk(child, dt, frame, runs);
    }
}
