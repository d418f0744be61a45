//! Viewport Derived - screen regions from the terminal size.
//!
//! Re-computes whenever the terminal size signals change.

use spark_signals::{derived, Derived};

use crate::layout::CellRect;

use super::terminal::{terminal_height_signal, terminal_width_signal};

/// Widest the control sidebar gets.
const SIDEBAR_MAX_WIDTH: u16 = 36;
/// Shortest the stage gets before the code panel starts shrinking.
const STAGE_MIN_HEIGHT: u16 = 8;

/// Screen regions of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Title row.
    pub header: CellRect,
    /// Controls and buttons.
    pub sidebar: CellRect,
    /// Live rendering of the container or parent.
    pub stage: CellRect,
    /// Snippets and challenges.
    pub code: CellRect,
    /// Key hints.
    pub footer: CellRect,
}

impl Viewport {
    pub fn for_size(width: u16, height: u16) -> Self {
        let header = CellRect::new(0, 0, width, height.min(1));
        let footer = CellRect::new(0, height.saturating_sub(1), width, height.min(1));
        let body_y = header.bottom();
        let body_height = height.saturating_sub(2);

        let sidebar_width = (width / 3).min(SIDEBAR_MAX_WIDTH);
        let sidebar = CellRect::new(0, body_y, sidebar_width, body_height);

        let main_x = sidebar_width.saturating_add(1).min(width);
        let main_width = width.saturating_sub(main_x);
        let stage_height = (body_height / 2).max(STAGE_MIN_HEIGHT).min(body_height);
        let stage = CellRect::new(main_x, body_y, main_width, stage_height);
        let code = CellRect::new(
            main_x,
            stage.bottom(),
            main_width,
            body_height.saturating_sub(stage_height),
        );

        Self {
            header,
            sidebar,
            stage,
            code,
            footer,
        }
    }
}

/// Create the viewport derived, tracking the terminal size signals.
pub fn create_viewport_derived() -> Derived<Viewport> {
    let width = terminal_width_signal();
    let height = terminal_height_signal();
    derived(move || Viewport::for_size(width.get(), height.get()))
}
