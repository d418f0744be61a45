//! "Show solution" toggles for the practice challenges.
//!
//! Each toggle flips its own panel and button label and nothing else.

use log::debug;

use crate::config::Challenge;
use crate::dom::{Patch, Target};

pub const SHOW_SOLUTION: &str = "Show Solution";
pub const HIDE_SOLUTION: &str = "Hide Solution";

/// One challenge with its collapsible solution panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionToggle {
    challenge: Challenge,
    visible: bool,
}

impl SolutionToggle {
    pub fn new(challenge: Challenge) -> Self {
        Self {
            challenge,
            visible: false,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.challenge.prompt
    }

    pub fn solution(&self) -> &str {
        &self.challenge.solution
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn button_label(&self) -> &'static str {
        if self.visible { HIDE_SOLUTION } else { SHOW_SOLUTION }
    }

    /// Flip the panel. Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}

/// All toggles of a page, addressed by index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions {
    toggles: Vec<SolutionToggle>,
}

impl Solutions {
    pub fn new(challenges: &[Challenge]) -> Self {
        Self {
            toggles: challenges.iter().cloned().map(SolutionToggle::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SolutionToggle> {
        self.toggles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SolutionToggle> {
        self.toggles.iter()
    }

    /// Toggle panel `index`; `None` when there is no such panel.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let visible = self.toggles.get_mut(index)?.toggle();
        debug!("solution {index} {}", if visible { "shown" } else { "hidden" });
        Some(visible)
    }

    pub fn render(&self, patches: &mut Vec<Patch>) {
        for (index, toggle) in self.toggles.iter().enumerate() {
            patches.push(Patch::SetText {
                target: Target::SolutionPanel(index),
                text: toggle.solution().to_string(),
            });
            patches.push(Patch::SetVisible {
                target: Target::SolutionPanel(index),
                visible: toggle.is_visible(),
            });
            patches.push(Patch::SetText {
                target: Target::SolutionButton(index),
                text: toggle.button_label().to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solutions() -> Solutions {
        Solutions::new(&[Challenge::new("a", "x"), Challenge::new("b", "y")])
    }

    #[test]
    fn test_toggle_flips_label_and_visibility() {
        let mut s = solutions();
        assert_eq!(s.get(0).unwrap().button_label(), SHOW_SOLUTION);

        assert_eq!(s.toggle(0), Some(true));
        assert_eq!(s.get(0).unwrap().button_label(), HIDE_SOLUTION);
        assert!(!s.get(1).unwrap().is_visible());

        assert_eq!(s.toggle(0), Some(false));
        assert_eq!(s.get(0).unwrap().button_label(), SHOW_SOLUTION);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut s = solutions();
        assert_eq!(s.toggle(7), None);
        assert_eq!(s, solutions());
    }
}
