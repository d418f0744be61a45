//! Layout Module
//!
//! Turns the playgrounds' inline styles into cell rectangles using
//! [Taffy](https://github.com/DioxusLabs/taffy):
//!
//! 1. Parses each inline style value into a CSS keyword or length
//! 2. Converts it to a Taffy style, scaling pixels to cells
//! 3. Builds a fresh Taffy tree for the page and computes it
//! 4. Extracts absolute cell rectangles
//!
//! # Example
//!
//! ```
//! use css_playground::layout::{compute_flex_layout, CellRect, Scale};
//! use css_playground::playground::FlexController;
//!
//! let flex = FlexController::default();
//! let layout = compute_flex_layout(&flex, CellRect::new(0, 0, 60, 12), Scale::default()).unwrap();
//! assert_eq!(layout.items.len(), 3);
//! ```

mod taffy_bridge;
mod text_measure;
mod types;

pub use taffy_bridge::{compute_flex_layout, compute_position_layout};
pub use text_measure::*;
pub use types::*;
