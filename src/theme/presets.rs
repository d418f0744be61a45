//! Theme presets.
//!
//! One preset per color scheme. Values are written the way a stylesheet
//! declares them, and are returned verbatim by `property_value`.

use super::{ColorScheme, Theme, CODE_COMMENT, CODE_PROPERTY, CODE_VALUE};

// =============================================================================
// Light
// =============================================================================

/// Light scheme: dark text on a pale background.
pub fn light() -> Theme {
    Theme::new("light", ColorScheme::Light)
        .with_property("--background", "#f6f8fa")
        .with_property("--surface", "#ffffff")
        .with_property("--text", "#1f2328")
        .with_property("--text-muted", "#656d76")
        .with_property("--accent", "#0969da")
        .with_property("--border", "#d0d7de")
        .with_property("--item-bg", "#ddf4ff")
        .with_property("--item-selected", "#bf8700")
        .with_property("--code-bg", "#eaeef2")
        .with_property(CODE_COMMENT, "#6e7781")
        .with_property(CODE_PROPERTY, "#0550ae")
        .with_property(CODE_VALUE, "#116329")
}

// =============================================================================
// Dark
// =============================================================================

/// Dark scheme: light text on a near-black background.
pub fn dark() -> Theme {
    Theme::new("dark", ColorScheme::Dark)
        .with_property("--background", "#0d1117")
        .with_property("--surface", "#161b22")
        .with_property("--text", "#e6edf3")
        .with_property("--text-muted", "#8d96a0")
        .with_property("--accent", "#4493f8")
        .with_property("--border", "#30363d")
        .with_property("--item-bg", "#1f6feb")
        .with_property("--item-selected", "#d29922")
        .with_property("--code-bg", "#1c2128")
        .with_property(CODE_COMMENT, "#8b949e")
        .with_property(CODE_PROPERTY, "#79c0ff")
        .with_property(CODE_VALUE, "#a5d6ff")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_define_code_colors() {
        for theme in [light(), dark()] {
            for name in [CODE_COMMENT, CODE_PROPERTY, CODE_VALUE] {
                assert!(theme.color(name) != crate::types::Rgba::TERMINAL_DEFAULT, "{name} in {}", theme.name);
            }
        }
    }
}
