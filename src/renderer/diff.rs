//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: move there (unless already there) and print it, emitting
//!      color and attribute changes only when they differ from the last cell
//! 3. Flush the writer once
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

/// Terminal color for an [`Rgba`].
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

/// Last emitted style and cursor position, to skip redundant escapes.
#[derive(Debug, Default)]
struct CellState {
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Option<Attr>,
    cursor: Option<(u16, u16)>,
}

/// Differential renderer.
///
/// Keeps track of the previous frame to enable diff-based rendering.
/// Only cells that have changed since the last frame are output.
pub struct DiffRenderer<W: Write> {
    out: W,
    state: CellState,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer<io::Stdout> {
    /// Renderer writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: CellState::default(),
            previous: None,
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut has_changes = false;
        queue!(self.out, BeginSynchronizedUpdate)?;
        self.state = CellState::default();

        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());
        if !same_size {
            queue!(self.out, Clear(ClearType::All))?;
        }

        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                let changed = match &self.previous {
                    Some(prev) if same_size => prev.get(x, y) != Some(cell),
                    _ => true,
                };
                if changed {
                    has_changes = true;
                    self.render_cell(x, y, cell)?;
                }
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    fn render_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // continuation of a wide character, already drawn by its first half
        if cell.char == '\0' {
            self.state.cursor = None;
            return Ok(());
        }

        if self.state.cursor != Some((x, y)) {
            queue!(self.out, MoveTo(x, y))?;
        }

        if self.state.attrs != Some(cell.attrs) {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            for (flag, attribute) in [
                (Attr::BOLD, Attribute::Bold),
                (Attr::DIM, Attribute::Dim),
                (Attr::ITALIC, Attribute::Italic),
                (Attr::UNDERLINE, Attribute::Underlined),
                (Attr::INVERSE, Attribute::Reverse),
            ] {
                if cell.attrs.contains(flag) {
                    queue!(self.out, SetAttribute(attribute))?;
                }
            }
            self.state.attrs = Some(cell.attrs);
            // a reset clears colors too
            self.state.fg = None;
            self.state.bg = None;
        }
        if self.state.fg != Some(cell.fg) {
            queue!(self.out, SetForegroundColor(to_color(cell.fg)))?;
            self.state.fg = Some(cell.fg);
        }
        if self.state.bg != Some(cell.bg) {
            queue!(self.out, SetBackgroundColor(to_color(cell.bg)))?;
            self.state.bg = Some(cell.bg);
        }

        queue!(self.out, Print(cell.char))?;
        let advance = crate::layout::char_width(cell.char).max(1);
        self.state.cursor = Some((x.saturating_add(advance), y));
        Ok(())
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)?;
        self.out.flush()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)?;
        self.out.flush()
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_render_draws_everything() {
        let mut renderer = DiffRenderer::new(Vec::new());
        let mut buffer = FrameBuffer::new(4, 2);
        buffer.draw_text(0, 0, "gap", Rgba::WHITE, Attr::NONE, None);

        assert!(renderer.render(&buffer).unwrap());
        assert!(renderer.has_previous());
        let out = String::from_utf8_lossy(renderer.writer());
        assert!(out.contains("gap"));
    }

    #[test]
    fn test_unchanged_frame_draws_nothing() {
        let mut renderer = DiffRenderer::new(Vec::new());
        let buffer = FrameBuffer::new(4, 2);
        renderer.render(&buffer).unwrap();
        assert!(!renderer.render(&buffer).unwrap());
    }

    #[test]
    fn test_only_changed_cells_are_printed() {
        let mut renderer = DiffRenderer::new(Vec::new());
        let mut buffer = FrameBuffer::new(8, 1);
        buffer.draw_text(0, 0, "row", Rgba::WHITE, Attr::NONE, None);
        renderer.render(&buffer).unwrap();
        let before = renderer.writer().len();

        buffer.draw_text(5, 0, "Z", Rgba::WHITE, Attr::NONE, None);
        assert!(renderer.render(&buffer).unwrap());
        let out = String::from_utf8_lossy(&renderer.writer()[before..]).into_owned();
        assert!(out.contains('Z'));
        assert!(!out.contains("row"));
    }

    #[test]
    fn test_invalidate() {
        let mut renderer = DiffRenderer::new(Vec::new());
        renderer.render(&FrameBuffer::new(2, 2)).unwrap();
        renderer.invalidate();
        assert!(!renderer.has_previous());
    }

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgba::TERMINAL_DEFAULT), Color::Reset);
        assert_eq!(to_color(Rgba::rgb(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
