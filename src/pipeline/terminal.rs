//! Terminal state signals and setup.
//!
//! The terminal size lives in signals so the viewport derived recomputes on
//! resize. [`TerminalGuard`] owns raw mode, the alternate screen and mouse
//! capture, and restores the terminal when dropped.

use std::cell::RefCell;
use std::io::{self, stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{debug, warn};
use spark_signals::{signal, Signal};

// =============================================================================
// Terminal Size Signals
// =============================================================================

thread_local! {
    static TERMINAL_WIDTH: RefCell<Signal<u16>> = RefCell::new(signal(80));
    static TERMINAL_HEIGHT: RefCell<Signal<u16>> = RefCell::new(signal(24));
}

/// Get the current terminal width.
pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|w| w.borrow().get())
}

/// Get the current terminal height.
pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|h| h.borrow().get())
}

/// Set the terminal size (called on resize events).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|w| w.borrow().set(width));
    TERMINAL_HEIGHT.with(|h| h.borrow().set(height));
}

/// Get the terminal width signal for reactive tracking.
pub fn terminal_width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|w| w.borrow().clone())
}

/// Get the terminal height signal for reactive tracking.
pub fn terminal_height_signal() -> Signal<u16> {
    TERMINAL_HEIGHT.with(|h| h.borrow().clone())
}

/// Query crossterm for the real size and store it.
pub fn detect_terminal_size() {
    match crossterm::terminal::size() {
        Ok((width, height)) => set_terminal_size(width, height),
        Err(err) => warn!("could not query terminal size, keeping {}x{}: {err}", terminal_width(), terminal_height()),
    }
}

// =============================================================================
// Terminal Guard
// =============================================================================

/// Fullscreen terminal session.
///
/// Entering enables raw mode, switches to the alternate screen, hides the
/// cursor and captures the mouse. Dropping undoes all of it.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self { active: true };
        execute!(stdout(), EnterAlternateScreen, Hide, EnableMouseCapture)?;
        debug!("terminal entered fullscreen mode");
        Ok(guard)
    }

    /// Restore the terminal now instead of on drop.
    pub fn exit(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        debug!("terminal restored");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("failed to restore terminal: {err}");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_size() {
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);
        assert_eq!(terminal_width_signal().get(), 120);
    }
}
