//! Interaction state: keyboard focus and input mapping.

pub mod focus;
pub mod input;

pub use focus::{Button, FocusRing, Focusable};
pub use input::{convert_event, poll_action, Action};
