//! The per-widget interaction state machine.
//!
//! A [`Control`] is embedded in any widget that takes input and exposed
//! through [`Node::control_mut`](crate::node::Node::control_mut), which is
//! how keyboard navigation reaches a neighbor without knowing its concrete
//! type. The snapshot a control reads comes from its owning window, so a
//! widget inside a secondary window is evaluated against that window's local
//! cursor and button stream.

use peniko::kurbo::Point;
use rustc_hash::FxHashMap;

use crate::context::InputCx;
use crate::input::{InputSnapshot, Key};
use crate::node::{NodeId, NodePath};

/// Logical focus-navigation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
    /// Tab.
    Next,
    /// Shift+Tab.
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavMode {
    /// Navigate once per discrete key-press edge.
    #[default]
    SingleShot,
    /// Navigate on first hold, then repeat at a fixed interval after an
    /// initial delay.
    Rapid,
}

const NAV_INITIAL_DELAY: f64 = 0.4;
const NAV_REPEAT_INTERVAL: f64 = 0.08;

pub struct Control {
    owner: NodeId,
    enabled: bool,
    focusable: bool,
    hovered: bool,
    focused: bool,
    nav_mode: NavMode,
    nav_initial_delay: f64,
    nav_repeat_interval: f64,
    neighbors: FxHashMap<NavDirection, NodePath>,
    /// Direction currently held and its accumulated hold time.
    held: Option<(NavDirection, f64)>,
    /// Focus arrived this frame; suppresses one navigation check so a single
    /// key edge cannot hop through a whole neighbor chain.
    nav_skip: bool,
    on_hover: Option<Box<dyn FnMut(NodeId, bool)>>,
    on_focus_gained: Option<Box<dyn FnMut(NodeId)>>,
    on_clicked_outside: Option<Box<dyn FnMut(NodeId)>>,
}

impl Control {
    pub fn new(owner: NodeId) -> Self {
        Self {
            owner,
            enabled: true,
            focusable: true,
            hovered: false,
            focused: false,
            nav_mode: NavMode::default(),
            nav_initial_delay: NAV_INITIAL_DELAY,
            nav_repeat_interval: NAV_REPEAT_INTERVAL,
            neighbors: FxHashMap::default(),
            held: None,
            nav_skip: false,
            on_hover: None,
            on_focus_gained: None,
            on_clicked_outside: None,
        }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling forces a synthetic hover exit and drops focus and any
    /// pending repeat timer on the spot.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.set_hovered(false);
            self.focused = false;
            self.held = None;
        }
    }

    pub fn focusable(&self) -> bool {
        self.focusable
    }

    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn grab_focus(&mut self) {
        if !self.enabled || !self.focusable || self.focused {
            return;
        }
        self.focused = true;
        self.nav_skip = true;
        let owner = self.owner;
        if let Some(f) = &mut self.on_focus_gained {
            f(owner);
        }
    }

    /// Dropping focus clears the navigation repeat timer.
    pub fn release_focus(&mut self) {
        self.focused = false;
        self.held = None;
    }

    /// Bind a neighbor path for one navigation direction. Paths resolve
    /// relative to the owning node (absolute paths work too).
    pub fn set_neighbor(&mut self, direction: NavDirection, path: impl Into<NodePath>) {
        self.neighbors.insert(direction, path.into());
    }

    pub fn set_nav_mode(&mut self, mode: NavMode) {
        self.nav_mode = mode;
    }

    pub fn set_nav_timing(&mut self, initial_delay: f64, repeat_interval: f64) {
        self.nav_initial_delay = initial_delay;
        self.nav_repeat_interval = repeat_interval.max(f64::EPSILON);
    }

    pub fn set_on_hover(&mut self, f: impl FnMut(NodeId, bool) + 'static) {
        self.on_hover = Some(Box::new(f));
    }

    pub fn set_on_focus_gained(&mut self, f: impl FnMut(NodeId) + 'static) {
        self.on_focus_gained = Some(Box::new(f));
    }

    pub fn set_on_clicked_outside(&mut self, f: impl FnMut(NodeId) + 'static) {
        self.on_clicked_outside = Some(Box::new(f));
    }

    /// Half-open containment against the widget's accumulated bounds, in the
    /// owning window's coordinate space.
    pub fn hit_test(&self, point: Point) -> bool {
        let origin = self.owner.accumulated_origin();
        let size = self.owner.size();
        point.x >= origin.x
            && point.x < origin.x + size.width
            && point.y >= origin.y
            && point.y < origin.y + size.height
    }

    /// One frame of hover, focus and navigation. Runs inside the widget's
    /// input hook with the snapshot of the widget's owning window.
    pub fn update(&mut self, cx: &InputCx) {
        if !self.enabled {
            self.set_hovered(false);
            self.focused = false;
            self.held = None;
            return;
        }

        let inside = cx.input.cursor_inside() && self.hit_test(cx.input.cursor());
        self.set_hovered(inside);

        if !cx.input.buttons_just_pressed().is_empty() {
            if inside && self.focusable && !self.focused {
                self.focused = true;
                let owner = self.owner;
                if let Some(f) = &mut self.on_focus_gained {
                    f(owner);
                }
            } else if !inside && self.focused {
                self.release_focus();
                let owner = self.owner;
                if let Some(f) = &mut self.on_clicked_outside {
                    f(owner);
                }
            }
        }

        if self.focused {
            self.update_navigation(cx);
        } else {
            self.held = None;
        }
    }

    fn set_hovered(&mut self, hovered: bool) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        let owner = self.owner;
        if let Some(f) = &mut self.on_hover {
            f(owner, hovered);
        }
    }

    fn update_navigation(&mut self, cx: &InputCx) {
        let skip = std::mem::take(&mut self.nav_skip);
        let Some(direction) = active_direction(cx.input) else {
            self.held = None;
            return;
        };
        let just_pressed = cx.input.key_just_pressed(direction_key(direction));
        self.held = match self.held {
            Some((held, time)) if held == direction && !just_pressed => {
                Some((direction, time + cx.dt))
            }
            _ => Some((direction, 0.0)),
        };
        if skip {
            return;
        }
        let hold_time = self.held.map(|(_, t)| t).unwrap_or(0.0);
        let trigger = match self.nav_mode {
            NavMode::SingleShot => just_pressed,
            NavMode::Rapid => {
                just_pressed
                    || (hold_time >= self.nav_initial_delay
                        && (hold_time - self.nav_initial_delay) % self.nav_repeat_interval < cx.dt)
            }
        };
        if trigger {
            self.navigate(direction);
        }
    }

    /// Transfer focus to the configured neighbor. In rapid mode the
    /// accumulated hold time moves with the focus so a held key keeps
    /// repeating from the neighbor without re-incurring the initial delay.
    fn navigate(&mut self, direction: NavDirection) {
        let Some(path) = self.neighbors.get(&direction).cloned() else {
            return;
        };
        let Some(target) = self.owner.get_node_or_null(path.clone()) else {
            log::warn!("focus neighbor `{path}` of `{}` not found", self.owner.name());
            return;
        };
        if target == self.owner {
            return;
        }
        let Some(node) = target.node() else { return };
        let Ok(mut node) = node.try_borrow_mut() else {
            return;
        };
        let Some(neighbor) = node.control_mut() else {
            log::warn!("focus neighbor `{path}` takes no input");
            return;
        };
        if !neighbor.enabled || !neighbor.focusable {
            return;
        }
        neighbor.focused = true;
        neighbor.nav_skip = true;
        if self.nav_mode == NavMode::Rapid {
            neighbor.held = self.held;
        }
        if let Some(f) = &mut neighbor.on_focus_gained {
            f(target);
        }
        self.release_focus();
    }
}

fn direction_key(direction: NavDirection) -> Key {
    match direction {
        NavDirection::Up => Key::ArrowUp,
        NavDirection::Down => Key::ArrowDown,
        NavDirection::Left => Key::ArrowLeft,
        NavDirection::Right => Key::ArrowRight,
        NavDirection::Next | NavDirection::Prev => Key::Tab,
    }
}

fn active_direction(input: &InputSnapshot) -> Option<NavDirection> {
    if input.is_key_down(Key::Tab) {
        return Some(if input.shift_down() {
            NavDirection::Prev
        } else {
            NavDirection::Next
        });
    }
    [
        (Key::ArrowUp, NavDirection::Up),
        (Key::ArrowDown, NavDirection::Down),
        (Key::ArrowLeft, NavDirection::Left),
        (Key::ArrowRight, NavDirection::Right),
    ]
    .into_iter()
    .find_map(|(key, direction)| input.is_key_down(key).then_some(direction))
}
