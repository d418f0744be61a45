//! Theme System for css-playground.
//!
//! A theme is a set of CSS custom properties (`--code-comment`,
//! `--background`, ...) for one color scheme, mirroring what the computed
//! style of the document root would expose. Snippet colors are read from the
//! active theme at generation time, so a scheme change must regenerate them.
//!
//! # Example
//!
//! ```rust
//! use css_playground::theme::{ColorScheme, Theme};
//!
//! let dark = Theme::for_scheme(ColorScheme::Dark);
//! let colors = dark.code_colors();
//! assert_eq!(colors.comment, dark.property_value("--code-comment"));
//! ```

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;
use spark_signals::{signal, Signal};

use crate::config::ThemeOverrides;
use crate::snippet::CodeColors;
use crate::types::Rgba;

pub mod presets;

pub use presets::{dark, light};

/// Custom property holding the snippet comment color.
pub const CODE_COMMENT: &str = "--code-comment";
/// Custom property holding the snippet property color.
pub const CODE_PROPERTY: &str = "--code-property";
/// Custom property holding the snippet value color.
pub const CODE_VALUE: &str = "--code-value";

// =============================================================================
// ColorScheme
// =============================================================================

/// The system `prefers-color-scheme` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::str::FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown color scheme `{other}` (expected light or dark)")),
        }
    }
}

/// Guess the terminal's color scheme from `COLORFGBG` (`"fg;bg"`).
///
/// Background palette indices 0-6 and 8 are dark; anything else is light.
/// Without the variable the scheme defaults to dark.
pub fn detect_color_scheme() -> ColorScheme {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| scheme_from_colorfgbg(&value))
        .unwrap_or_default()
}

fn scheme_from_colorfgbg(value: &str) -> Option<ColorScheme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if bg <= 6 || bg == 8 {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    })
}

// =============================================================================
// Theme
// =============================================================================

/// Custom properties of one color scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub scheme: ColorScheme,
    properties: BTreeMap<String, String>,
}

impl Theme {
    /// Create an empty theme.
    pub fn new(name: impl Into<String>, scheme: ColorScheme) -> Self {
        Self {
            name: name.into(),
            scheme,
            properties: BTreeMap::new(),
        }
    }

    /// Builtin preset for a scheme.
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => light(),
            ColorScheme::Dark => dark(),
        }
    }

    /// Set a custom property. Values are stored verbatim.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Like `getPropertyValue`: the stored string, or empty when undefined.
    pub fn property_value(&self, name: &str) -> String {
        self.properties.get(name).cloned().unwrap_or_default()
    }

    /// A custom property resolved to a color, terminal default when missing or unparsable.
    pub fn color(&self, name: &str) -> Rgba {
        self.properties
            .get(name)
            .and_then(|value| Rgba::parse(value))
            .unwrap_or(Rgba::TERMINAL_DEFAULT)
    }

    /// The three snippet highlight colors.
    pub fn code_colors(&self) -> CodeColors {
        CodeColors {
            comment: self.property_value(CODE_COMMENT),
            property: self.property_value(CODE_PROPERTY),
            value: self.property_value(CODE_VALUE),
        }
    }
}

// =============================================================================
// ThemeSet
// =============================================================================

/// One theme per scheme, with configured overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    light: Theme,
    dark: Theme,
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self {
            light: light(),
            dark: dark(),
        }
    }
}

impl ThemeSet {
    pub fn with_overrides(overrides: &ThemeOverrides) -> Self {
        let mut set = Self::default();
        for (name, value) in &overrides.light {
            set.light.set_property(name.clone(), value.clone());
        }
        for (name, value) in &overrides.dark {
            set.dark.set_property(name.clone(), value.clone());
        }
        set
    }

    pub fn get(&self, scheme: ColorScheme) -> &Theme {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }
}

// =============================================================================
// Appearance
// =============================================================================

/// The system appearance, shared by whoever needs to react to scheme changes.
///
/// Clones share the same underlying signal.
#[derive(Clone)]
pub struct Appearance {
    scheme: Signal<ColorScheme>,
}

impl Appearance {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme: signal(scheme),
        }
    }

    /// Detect from the environment.
    pub fn detect() -> Self {
        Self::new(detect_color_scheme())
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme.get()
    }

    /// Record a new scheme. Returns whether it differs from the current one.
    pub fn set_scheme(&self, scheme: ColorScheme) -> bool {
        let changed = self.scheme.get() != scheme;
        if changed {
            debug!("color scheme changed to {}", scheme.as_str());
            self.scheme.set(scheme);
        }
        changed
    }

    /// The signal itself, for reactive pipelines.
    pub fn signal(&self) -> Signal<ColorScheme> {
        self.scheme.clone()
    }
}

impl std::fmt::Debug for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Appearance").field("scheme", &self.scheme()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("Light".parse::<ColorScheme>(), Ok(ColorScheme::Light));
        assert_eq!(" dark ".parse::<ColorScheme>(), Ok(ColorScheme::Dark));
        assert!("sepia".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn test_scheme_toggle() {
        assert_eq!(ColorScheme::Dark.toggled(), ColorScheme::Light);
        assert_eq!(ColorScheme::Light.toggled().toggled(), ColorScheme::Light);
    }

    #[test]
    fn test_colorfgbg() {
        assert_eq!(scheme_from_colorfgbg("15;0"), Some(ColorScheme::Dark));
        assert_eq!(scheme_from_colorfgbg("0;15"), Some(ColorScheme::Light));
        assert_eq!(scheme_from_colorfgbg("0;default;8"), Some(ColorScheme::Dark));
        assert_eq!(scheme_from_colorfgbg("garbage"), None);
    }

    #[test]
    fn test_property_value_missing_is_empty() {
        let theme = Theme::new("bare", ColorScheme::Light);
        assert_eq!(theme.property_value(CODE_COMMENT), "");
        assert!(theme.color(CODE_COMMENT).is_terminal_default());
    }

    #[test]
    fn test_presets_differ_in_code_colors() {
        let light = Theme::for_scheme(ColorScheme::Light);
        let dark = Theme::for_scheme(ColorScheme::Dark);
        assert_ne!(light.code_colors(), dark.code_colors());
        assert!(!light.code_colors().value.is_empty());
    }

    #[test]
    fn test_theme_set_overrides() {
        let mut overrides = ThemeOverrides::default();
        overrides.dark.insert(CODE_VALUE.into(), "#ffcc66".into());
        let set = ThemeSet::with_overrides(&overrides);

        assert_eq!(set.get(ColorScheme::Dark).property_value(CODE_VALUE), "#ffcc66");
        assert_eq!(set.get(ColorScheme::Light), &light());
    }

    #[test]
    fn test_appearance_shared_signal() {
        let appearance = Appearance::new(ColorScheme::Dark);
        let other = appearance.clone();

        assert!(other.set_scheme(ColorScheme::Light));
        assert_eq!(appearance.scheme(), ColorScheme::Light);
        assert!(!appearance.set_scheme(ColorScheme::Light));
    }
}
