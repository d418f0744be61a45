//! Playground configuration.
//!
//! Every table has hardcoded defaults, so an empty file (or no file at all)
//! yields the stock playgrounds. A TOML file can override any part:
//!
//! ```toml
//! [flex]
//! initial-item-count = 5
//!
//! [flex.container]
//! justify-content = "center"
//!
//! [display]
//! color-scheme = "light"
//!
//! [theme.dark]
//! "--code-value" = "#ffcc66"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::{PlaygroundError, Result};
use crate::theme::ColorScheme;

/// Largest accepted `initial-item-count`.
pub const MAX_INITIAL_ITEMS: u32 = 100;

// =============================================================================
// Root
// =============================================================================

/// Complete configuration for both playgrounds and the terminal front-end.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlaygroundConfig {
    pub flex: FlexConfig,
    pub position: PositionDefaults,
    pub display: DisplayConfig,
    /// Custom property overrides per color scheme.
    pub theme: ThemeOverrides,
}

impl PlaygroundConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = toml::from_str(&source).map_err(|source| PlaygroundError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded configuration from {}", path.display());
        Self::validate(config)
    }

    fn validate(self) -> Result<Self> {
        if self.flex.initial_item_count > MAX_INITIAL_ITEMS {
            return Err(PlaygroundError::InvalidValue {
                key: "flex.initial-item-count",
                reason: format!("{} exceeds the maximum of {MAX_INITIAL_ITEMS}", self.flex.initial_item_count),
            });
        }
        Ok(self)
    }
}

// =============================================================================
// Flex playground
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FlexConfig {
    /// Number of items present on start; also the starting value of the id counter.
    pub initial_item_count: u32,
    pub container: ContainerDefaults,
    pub item: ItemDefaults,
    /// Upper bound of the gap slider.
    pub max_gap: u32,
    pub challenges: Vec<Challenge>,
}

impl Default for FlexConfig {
    fn default() -> Self {
        Self {
            initial_item_count: 3,
            container: ContainerDefaults::default(),
            item: ItemDefaults::default(),
            max_gap: 50,
            challenges: default_challenges(),
        }
    }
}

/// Default values of the container controls, keyed like the control ids.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContainerDefaults {
    pub flex_direction: String,
    pub justify_content: String,
    pub align_items: String,
    pub flex_wrap: String,
    pub align_content: String,
    /// Unitless; the applied style gets a `px` suffix.
    pub gap: String,
}

impl Default for ContainerDefaults {
    fn default() -> Self {
        Self {
            flex_direction: "row".into(),
            justify_content: "flex-start".into(),
            align_items: "stretch".into(),
            flex_wrap: "nowrap".into(),
            align_content: "stretch".into(),
            gap: "10".into(),
        }
    }
}

impl ContainerDefaults {
    /// Default value for a container control id.
    pub fn get(&self, id: &str) -> Option<&str> {
        let value = match id {
            "flex-direction" => &self.flex_direction,
            "justify-content" => &self.justify_content,
            "align-items" => &self.align_items,
            "flex-wrap" => &self.flex_wrap,
            "align-content" => &self.align_content,
            "gap" => &self.gap,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Default values of the item controls, keyed like the control ids.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ItemDefaults {
    pub order: String,
    pub flex_grow: String,
    pub flex_shrink: String,
    pub flex_basis: String,
    pub align_self: String,
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            order: "0".into(),
            flex_grow: "0".into(),
            flex_shrink: "1".into(),
            flex_basis: "auto".into(),
            align_self: "auto".into(),
        }
    }
}

impl ItemDefaults {
    /// Default value for an item control id (also the inline style property name).
    pub fn get(&self, id: &str) -> Option<&str> {
        let value = match id {
            "order" => &self.order,
            "flex-grow" => &self.flex_grow,
            "flex-shrink" => &self.flex_shrink,
            "flex-basis" => &self.flex_basis,
            "align-self" => &self.align_self,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// A practice task with a hidden solution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Challenge {
    pub prompt: String,
    pub solution: String,
}

impl Challenge {
    pub fn new(prompt: impl Into<String>, solution: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            solution: solution.into(),
        }
    }
}

fn default_challenges() -> Vec<Challenge> {
    vec![
        Challenge::new(
            "Center every item both horizontally and vertically.",
            "justify-content: center;\nalign-items: center;",
        ),
        Challenge::new(
            "Push the first and last items against the container edges.",
            "justify-content: space-between;",
        ),
        Challenge::new(
            "Stack the items vertically, last item on top.",
            "flex-direction: column-reverse;",
        ),
        Challenge::new(
            "Make item 2 absorb all the free space.",
            ".item-2 {\n  flex-grow: 1;\n}",
        ),
    ]
}

// =============================================================================
// Position playground
// =============================================================================

/// Default values of the position controls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PositionDefaults {
    pub parent_position: bool,
    pub position: String,
    pub top: String,
    pub left: String,
    pub bottom: String,
    pub right: String,
}

impl Default for PositionDefaults {
    fn default() -> Self {
        Self {
            parent_position: false,
            position: "static".into(),
            top: "auto".into(),
            left: "auto".into(),
            bottom: "auto".into(),
            right: "auto".into(),
        }
    }
}

// =============================================================================
// Display
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DisplayConfig {
    /// CSS pixels per terminal column.
    pub px_per_column: f32,
    /// CSS pixels per terminal row.
    pub px_per_row: f32,
    /// Forces a color scheme instead of detecting it from the terminal.
    pub color_scheme: Option<ColorScheme>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            px_per_column: 5.0,
            px_per_row: 10.0,
            color_scheme: None,
        }
    }
}

/// Custom property overrides applied on top of the theme presets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub light: BTreeMap<String, String>,
    pub dark: BTreeMap<String, String>,
}

// =============================================================================
// Tests
// =============================================================================
