//! Focus System - keyboard navigation over a page's controls and buttons.
//!
//! The focused position is a signal, so anything drawing the page can track it.
//!
//! # Example
//!
//! ```
//! use css_playground::state::focus::{Focusable, FocusRing};
//!
//! let ring = FocusRing::new(vec![
//!     Focusable::Control("flex-direction".into()),
//!     Focusable::Control("gap".into()),
//! ]);
//! ring.focus_next();
//! assert_eq!(ring.current(), Some(Focusable::Control("gap".into())));
//! ```

use spark_signals::{signal, Signal};

// =============================================================================
// Focusable
// =============================================================================

/// A page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    AddItem,
    RemoveItem,
    Reset,
    /// Show/hide the solution of challenge `n`.
    Solution(usize),
    SwitchPage,
}

impl Button {
    pub fn label(self) -> &'static str {
        match self {
            Self::AddItem => "Add Item",
            Self::RemoveItem => "Remove Item",
            Self::Reset => "Reset",
            Self::Solution(_) => "Solution",
            Self::SwitchPage => "Switch Page",
        }
    }
}

/// Anything that can hold keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Focusable {
    /// A form control by id.
    Control(String),
    Button(Button),
}

// =============================================================================
// FocusRing
// =============================================================================

/// Ordered focus targets with wrap-around navigation.
#[derive(Clone)]
pub struct FocusRing {
    entries: Vec<Focusable>,
    focused: Signal<usize>,
}

impl FocusRing {
    /// Focus starts on the first entry.
    pub fn new(entries: Vec<Focusable>) -> Self {
        Self {
            entries,
            focused: signal(0),
        }
    }

    pub fn entries(&self) -> &[Focusable] {
        &self.entries
    }

    /// Replace the entries, keeping focus on the same target when it survives.
    pub fn set_entries(&mut self, entries: Vec<Focusable>) {
        let current = self.current();
        self.entries = entries;
        let index = current
            .and_then(|c| self.entries.iter().position(|e| *e == c))
            .unwrap_or(0);
        self.focused.set(index);
    }

    pub fn current(&self) -> Option<Focusable> {
        self.entries.get(self.focused.get()).cloned()
    }

    pub fn is_focused(&self, target: &Focusable) -> bool {
        self.entries.get(self.focused.get()) == Some(target)
    }

    /// The focus signal, for reactive tracking.
    pub fn signal(&self) -> Signal<usize> {
        self.focused.clone()
    }

    pub fn focus_next(&self) -> bool {
        self.step(1)
    }

    pub fn focus_previous(&self) -> bool {
        self.step(self.entries.len().saturating_sub(1))
    }

    fn step(&self, by: usize) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let next = (self.focused.get() + by) % self.entries.len();
        self.focused.set(next);
        true
    }

    /// Focus a specific target. Returns false when it is not in the ring.
    pub fn focus(&self, target: &Focusable) -> bool {
        match self.entries.iter().position(|e| e == target) {
            Some(index) => {
                self.focused.set(index);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for FocusRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusRing")
            .field("entries", &self.entries)
            .field("focused", &self.focused.get())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
