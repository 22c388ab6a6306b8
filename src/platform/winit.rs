//! Winit-backed windowing.
//!
//! The event loop is driven in pump mode: each engine frame runs one
//! non-blocking `pump_app_events` pass and translates whatever winit
//! delivered into [`WindowMessage`]s. Window creation needs an
//! `ActiveEventLoop`, which only exists inside a pump, so `create_window`
//! queues a request and runs a pump to fulfil it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use peniko::kurbo::{Point, Size};
use rustc_hash::FxHashMap;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::raw_window_handle::HasWindowHandle;
use winit::window::{Window, WindowId as WinitWindowId};

use super::{Platform, PlatformWindow, PlatformWindowId, WindowDesc};
use crate::error::PlatformError;
use crate::event::{MouseButton, WindowMessage};
use arbor_renderer::{NoopRenderer, Renderer};

#[derive(Default)]
struct Shared {
    pending_destroy: Vec<PlatformWindowId>,
}

pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    app: PumpApp,
    shared: Rc<RefCell<Shared>>,
}

#[derive(Default)]
struct PumpApp {
    next_id: u64,
    /// Creation requests queued by `create_window`, fulfilled inside a pump.
    pending_creates: VecDeque<(PlatformWindowId, WindowDesc)>,
    created: FxHashMap<PlatformWindowId, Arc<Window>>,
    ids: FxHashMap<WinitWindowId, PlatformWindowId>,
    windows: FxHashMap<PlatformWindowId, Arc<Window>>,
    queue: VecDeque<(PlatformWindowId, WindowMessage)>,
}

impl WinitPlatform {
    pub fn new() -> Result<Self, PlatformError> {
        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        Ok(Self {
            event_loop,
            app: PumpApp::default(),
            shared: Rc::new(RefCell::new(Shared::default())),
        })
    }

    fn pump_once(&mut self) {
        let _ = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
    }
}

impl PumpApp {
    fn service_creates(&mut self, event_loop: &ActiveEventLoop) {
        while let Some((id, desc)) = self.pending_creates.pop_front() {
            let mut attrs = Window::default_attributes()
                .with_title(desc.title.clone())
                .with_inner_size(LogicalSize::new(desc.size.width, desc.size.height))
                .with_resizable(desc.resizable)
                .with_visible(false);
            if let Some(owner) = desc.owner
                && let Some(parent) = self.windows.get(&owner)
                && let Ok(handle) = parent.window_handle()
            {
                // SAFETY: the handle is copied out of a live window we hold
                // an Arc to for the owned window's whole lifetime.
                attrs = unsafe { attrs.with_parent_window(Some(handle.as_raw())) };
            }
            match event_loop.create_window(attrs) {
                Ok(window) => {
                    let window = Arc::new(window);
                    self.ids.insert(window.id(), id);
                    self.windows.insert(id, window.clone());
                    self.created.insert(id, window);
                }
                Err(err) => {
                    log::error!("native window creation failed: {err}");
                }
            }
        }
    }
}

impl ApplicationHandler for PumpApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.service_creates(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.service_creates(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WinitWindowId,
        event: WindowEvent,
    ) {
        let Some(&id) = self.ids.get(&window_id) else {
            return;
        };
        let scale = self
            .windows
            .get(&id)
            .map(|w| w.scale_factor())
            .unwrap_or(1.0);
        let message = match event {
            WindowEvent::CloseRequested => WindowMessage::CloseRequested,
            WindowEvent::Destroyed => {
                self.ids.remove(&window_id);
                self.windows.remove(&id);
                WindowMessage::Destroyed
            }
            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<f64>(scale);
                WindowMessage::Resized(Size::new(logical.width, logical.height))
            }
            WindowEvent::Focused(focused) => WindowMessage::Focused(focused),
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(scale);
                WindowMessage::CursorMoved(Point::new(logical.x, logical.y))
            }
            WindowEvent::CursorLeft { .. } => WindowMessage::CursorLeft,
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = convert_button(button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => WindowMessage::MouseDown(button),
                    ElementState::Released => WindowMessage::MouseUp(button),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y / 24.0,
                };
                WindowMessage::Wheel(lines)
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => WindowMessage::KeyDown {
                        key,
                        repeat: event.repeat,
                    },
                    ElementState::Released => WindowMessage::KeyUp { key },
                }
            }
            WindowEvent::RedrawRequested => WindowMessage::RedrawRequested,
            _ => return,
        };
        self.queue.push_back((id, message));
    }
}

fn convert_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

struct WinitWindow {
    id: PlatformWindowId,
    window: Arc<Window>,
    shared: Rc<RefCell<Shared>>,
}

impl PlatformWindow for WinitWindow {
    fn id(&self) -> PlatformWindowId {
        self.id
    }

    fn logical_size(&self) -> Size {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        Size::new(size.width, size.height)
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    fn set_visible(&self, visible: bool) {
        self.window.set_visible(visible);
    }

    fn focus(&self) {
        self.window.focus_window();
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }

    fn request_destroy(&self) {
        let mut shared = self.shared.borrow_mut();
        if !shared.pending_destroy.contains(&self.id) {
            shared.pending_destroy.push(self.id);
        }
    }
}

impl Platform for WinitPlatform {
    fn create_window(&mut self, desc: &WindowDesc) -> Result<Rc<dyn PlatformWindow>, PlatformError> {
        self.app.next_id += 1;
        let id = PlatformWindowId(self.app.next_id);
        self.app.pending_creates.push_back((id, desc.clone()));
        self.pump_once();
        let window = self.app.created.remove(&id).ok_or_else(|| {
            PlatformError::CreateFailed(format!("event loop did not produce {id}"))
        })?;
        Ok(Rc::new(WinitWindow {
            id,
            window,
            shared: self.shared.clone(),
        }))
    }

    fn create_renderer(
        &mut self,
        _window: &Rc<dyn PlatformWindow>,
    ) -> Result<Box<dyn Renderer>, PlatformError> {
        // Surface-backed renderers plug in here; the default build ships the
        // recording renderer only.
        Ok(Box::new(NoopRenderer::new()))
    }

    fn pump(&mut self, out: &mut Vec<(PlatformWindowId, WindowMessage)>) {
        self.pump_once();
        out.extend(self.app.queue.drain(..));
        // Dropping our last handle closes the window; winit does not always
        // deliver Destroyed for it, so synthesize the completion here.
        let pending: Vec<_> = self.shared.borrow_mut().pending_destroy.drain(..).collect();
        for id in pending {
            if let Some(window) = self.app.windows.remove(&id) {
                self.app.ids.remove(&window.id());
                drop(window);
                out.push((id, WindowMessage::Destroyed));
            }
        }
    }
}
