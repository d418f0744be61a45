//! # css-playground
//!
//! Interactive CSS flexbox and positioning playgrounds.
//!
//! Two controllers hold the whole state of a playground page: the form
//! controls, the styles they produce, the selected flex item and the
//! highlighted code snippets. They never touch a screen directly. A page is
//! described as a list of [`dom::Patch`]es, and the terminal front-end in
//! [`pipeline`] draws the same state with [taffy](https://docs.rs/taffy)
//! computing the layout.
//!
//! ```text
//! controls ─ event ─→ FlexController / PositionController ─→ Patch list ─→ Surface
//!                                  │
//!                                  └─→ taffy layout ─→ FrameBuffer ─→ DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`playground`] - the flexbox and positioning controllers
//! - [`controls`] - form controls and event routing
//! - [`dom`] - patches, the [`dom::Surface`] trait and an in-memory document
//! - [`snippet`] - CSS code snippets with syntax highlighting
//! - [`theme`] - light/dark themes and the system color scheme
//! - [`config`] - TOML configuration of defaults and challenges
//! - [`layout`] - taffy bridge and text measurement
//! - [`renderer`] - frame buffer and diff renderer
//! - [`state`] - keyboard focus and input mapping
//! - [`pipeline`] - terminal setup, page views and the event loop
//!
//! ## Example
//!
//! ```
//! use css_playground::controls::EventKind;
//! use css_playground::playground::FlexController;
//!
//! let mut flex = FlexController::default();
//! flex.handle_control_event("gap", EventKind::Input, "25".into()).unwrap();
//! assert_eq!(flex.container_style().get("gap"), "25px");
//! assert_eq!(flex.container_snippet().value_of("gap"), Some("25px"));
//! ```

pub mod config;
pub mod controls;
pub mod dom;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod playground;
pub mod renderer;
pub mod snippet;
pub mod state;
pub mod theme;
pub mod types;

pub use config::PlaygroundConfig;
pub use controls::{Control, ControlInput, ControlKind, ControlPanel, EventKind};
pub use dom::{Document, Patch, Surface, Target};
pub use error::{PlaygroundError, Result};
pub use playground::{ClickTarget, FlexController, Page, PositionController};
pub use snippet::Snippet;
pub use theme::{Appearance, ColorScheme, Theme, ThemeSet};
