//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. The page views draw into it; the [`DiffRenderer`](super::DiffRenderer)
//! writes it out.

use crate::layout::{char_width, CellRect};
use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Create a new buffer with a specific background color.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let mut buffer = Self::new(width, height);
        buffer.clear_with_bg(bg);
        buffer
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer as a rectangle.
    pub fn bounds(&self) -> CellRect {
        CellRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference (returns None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Text of one row, for tests and debugging. Continuation cells are skipped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| cell.char != '\0')
            .map(|cell| cell.char)
            .collect()
    }

    /// Clear with a specific background color.
    pub fn clear_with_bg(&mut self, bg: Rgba) {
        for cell in &mut self.cells {
            *cell = Cell {
                bg,
                ..Cell::default()
            };
        }
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell, clipped to `clip` when given.
    ///
    /// A terminal-default `bg` keeps the cell's current background.
    pub fn set_cell(&mut self, x: u16, y: u16, char: char, fg: Rgba, bg: Rgba, attrs: Attr, clip: Option<&CellRect>) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.char = char;
        cell.fg = fg;
        if !bg.is_terminal_default() {
            cell.bg = bg;
        }
        cell.attrs = attrs;
        true
    }

    /// Fill a rectangle with a background color.
    pub fn fill_rect(&mut self, rect: CellRect, bg: Rgba) {
        let x2 = rect.right().min(self.width);
        let y2 = rect.bottom().min(self.height);
        for y in rect.y..y2 {
            for x in rect.x..x2 {
                let idx = self.index(x, y);
                self.cells[idx] = Cell {
                    bg,
                    ..Cell::default()
                };
            }
        }
    }

    /// Draw text at a position.
    ///
    /// Returns the number of columns used (handles wide characters).
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, attrs: Attr, clip: Option<&CellRect>) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            let w = char_width(ch);
            if w == 0 {
                continue;
            }
            if self.set_cell(col, y, ch, fg, Rgba::TERMINAL_DEFAULT, attrs, clip) && w == 2 {
                // continuation marker for the second half of a wide character
                self.set_cell(col + 1, y, '\0', fg, Rgba::TERMINAL_DEFAULT, attrs, clip);
            }
            col = col.saturating_add(w);
        }
        col.saturating_sub(x)
    }

    /// Draw text centered within a width.
    pub fn draw_text_centered(&mut self, x: u16, y: u16, width: u16, text: &str, fg: Rgba, attrs: Attr, clip: Option<&CellRect>) -> u16 {
        let text_width = crate::layout::string_width(text);
        let offset = width.saturating_sub(text_width) / 2;
        self.draw_text(x + offset, y, text, fg, attrs, clip)
    }

    /// Draw a single-line box around a rectangle.
    pub fn draw_border(&mut self, rect: CellRect, color: Rgba, attrs: Attr) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let x2 = rect.x + rect.width - 1;
        let y2 = rect.y + rect.height - 1;
        let bg = Rgba::TERMINAL_DEFAULT;

        self.set_cell(rect.x, rect.y, '┌', color, bg, attrs, None);
        self.set_cell(x2, rect.y, '┐', color, bg, attrs, None);
        self.set_cell(x2, y2, '┘', color, bg, attrs, None);
        self.set_cell(rect.x, y2, '└', color, bg, attrs, None);
        for col in (rect.x + 1)..x2 {
            self.set_cell(col, rect.y, '─', color, bg, attrs, None);
            self.set_cell(col, y2, '─', color, bg, attrs, None);
        }
        for row in (rect.y + 1)..y2 {
            self.set_cell(rect.x, row, '│', color, bg, attrs, None);
            self.set_cell(x2, row, '│', color, bg, attrs, None);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
