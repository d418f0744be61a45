//! Layout results.

use crate::config::DisplayConfig;

/// CSS pixels per terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub px_per_column: f32,
    pub px_per_row: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for Scale {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            px_per_column: display.px_per_column.max(f32::EPSILON),
            px_per_row: display.px_per_row.max(f32::EPSILON),
        }
    }
}

impl Scale {
    /// Pixels to columns.
    pub fn columns(self, px: f32) -> f32 {
        px / self.px_per_column
    }

    /// Pixels to rows.
    pub fn rows(self, px: f32) -> f32 {
        px / self.px_per_row
    }
}

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x as u32) < self.x as u32 + self.width as u32
            && (y as u32) < self.y as u32 + self.height as u32
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Overlap of two rectangles; empty (zero-sized) when they are disjoint.
    pub fn intersect(&self, other: &CellRect) -> CellRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        CellRect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Flex container and items, items in visual order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlexLayout {
    pub container: CellRect,
    pub items: Vec<(u32, CellRect)>,
}

impl FlexLayout {
    pub fn rect_of(&self, id: u32) -> Option<CellRect> {
        self.items.iter().find(|(item, _)| *item == id).map(|(_, rect)| *rect)
    }

    /// Topmost item under a cell. Later items paint over earlier ones.
    pub fn item_at(&self, x: u16, y: u16) -> Option<u32> {
        self.items
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(id, _)| *id)
    }
}

/// Parent and child of the positioning playground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionLayout {
    pub parent: CellRect,
    pub child: CellRect,
    /// The child was positioned against the stage instead of the parent.
    pub child_on_stage: bool,
}
