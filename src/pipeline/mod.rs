//! Terminal Pipeline
//!
//! Connects the playground controllers to the terminal.
//!
//! ```text
//! terminal size signals → viewport derived → page view → FrameBuffer → DiffRenderer
//!                                                  ↑
//!                   crossterm events → Action → App
//! ```
//!
//! - **terminal** - size signals and the fullscreen guard
//! - **viewport** - screen regions, re-derived on resize
//! - **view** - draws a page into a frame and records click targets
//! - **app** - routes actions to the controllers; runs the event loop

pub mod app;
pub mod terminal;
pub mod view;
pub mod viewport;

pub use app::{run, App};
pub use terminal::{detect_terminal_size, set_terminal_size, terminal_height, terminal_width, TerminalGuard};
pub use view::{draw_flex, draw_position, Frame, HitRegion, HitTarget, ViewContext};
pub use viewport::{create_viewport_derived, Viewport};
