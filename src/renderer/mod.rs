//! Terminal rendering: a cell frame buffer and a differential crossterm writer.

mod buffer;
mod diff;

pub use buffer::FrameBuffer;
pub use diff::{to_color, DiffRenderer};
