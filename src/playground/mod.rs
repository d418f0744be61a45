//! The two playground controllers.
//!
//! Each controller is plain state plus operations. Nothing here draws:
//! `render()` describes the page as [`Patch`](crate::dom::Patch)es and the
//! front-end (or a test [`Document`](crate::dom::Document)) applies them.

pub mod flex;
pub mod position;
pub mod solution;

pub use flex::{ClickTarget, FlexController, FlexItem};
pub use position::{PositionController, PositionStyles};
pub use solution::{SolutionToggle, Solutions};

/// Which playground is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Flex,
    Position,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Self::Flex => "Flexbox Playground",
            Self::Position => "Positioning Playground",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Flex => Self::Position,
            Self::Position => Self::Flex,
        }
    }
}
