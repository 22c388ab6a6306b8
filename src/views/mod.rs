//! Built-in widgets and the interaction state machine they share.

mod button;
mod control;
mod group;
mod label;

pub use button::{Button, ClickTrigger};
pub use control::{Control, NavDirection, NavMode};
pub use group::Group;
pub use label::Label;
