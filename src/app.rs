//! Application entry point.
//!
//! ```no_run
//! use arbor::{App, views::Button};
//!
//! fn main() -> Result<(), arbor::PlatformError> {
//!     App::new()?.title("demo").run(|root| {
//!         let ok = root.add_child_named(Button::new("Ok"), "OkButton");
//!         ok.set_offset((20.0, 20.0));
//!         ok.set_size((120.0, 32.0));
//!     })
//! }
//! ```

use std::time::{Duration, Instant};

use peniko::kurbo::Size;

use crate::app_handle::AppHandle;
use crate::error::PlatformError;
use crate::node::NodeId;
use crate::platform::{Platform, WindowDesc, WinitPlatform};
use crate::views::Group;

const TARGET_FRAME: Duration = Duration::from_micros(16_666);

pub struct App {
    platform: Box<dyn Platform>,
    desc: WindowDesc,
}

impl App {
    /// An application backed by the native windowing system.
    pub fn new() -> Result<Self, PlatformError> {
        Ok(Self::with_platform(WinitPlatform::new()?))
    }

    /// An application backed by an explicit platform, e.g. the headless one.
    pub fn with_platform(platform: impl Platform + 'static) -> Self {
        Self {
            platform: Box::new(platform),
            desc: WindowDesc::default(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.desc.title = title.to_string();
        self
    }

    pub fn size(mut self, size: impl Into<Size>) -> Self {
        self.desc.size = size.into();
        self
    }

    /// Open the primary window, build the tree under the implicit `root`
    /// node and drive frames until the primary window closes.
    pub fn run(self, build: impl FnOnce(NodeId)) -> Result<(), PlatformError> {
        let root = Group::new_root("root");
        build(root);
        let mut handle = AppHandle::new(self.platform, root, self.desc)?;
        let mut last = Instant::now();
        while handle.primary_open() {
            let now = Instant::now();
            let dt = (now - last).as_secs_f64();
            last = now;
            handle.frame(dt);
            if let Some(remaining) = TARGET_FRAME.checked_sub(last.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        handle.teardown();
        Ok(())
    }
}
