//! Core types for css-playground.
//!
//! Colors and cells for the terminal renderer, plus the CSS keyword and length
//! values that flow from the playground controls into the layout bridge.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Dim the color by a factor (0.0 = black, 1.0 = unchanged).
    #[inline]
    pub fn dim(self, factor: f32) -> Self {
        if self.is_terminal_default() {
            return Self::GRAY;
        }
        Self {
            r: (self.r as f32 * factor).clamp(0.0, 255.0) as i16,
            g: (self.g as f32 * factor).clamp(0.0, 255.0) as i16,
            b: (self.b as f32 * factor).clamp(0.0, 255.0) as i16,
            a: self.a,
        }
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// # Examples
    ///
    /// ```
    /// use css_playground::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::rgb(255, 255, 255)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
            )),
            _ => None,
        }
    }

    /// Parse a CSS color value: hex, `rgb(r, g, b)` or `default`.
    ///
    /// Custom property values keep their leading whitespace, so input is trimmed first.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let lower = input.to_ascii_lowercase();
        if matches!(lower.as_str(), "default" | "inherit" | "initial" | "currentcolor") {
            return Some(Self::TERMINAL_DEFAULT);
        }

        if let Some(body) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let channels: Vec<u8> = body
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| part.parse::<u8>().ok())
                .collect::<Option<_>>()?;
            return match channels.as_slice() {
                [r, g, b] => Some(Self::rgb(*r, *g, *b)),
                _ => None,
            };
        }

        if input.starts_with('#') || input.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::from_hex(input);
        }

        None
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// CSS Keywords
// =============================================================================

/// Declares a CSS keyword enum with its keyword table.
///
/// The first variant is the property's initial value.
macro_rules! css_keywords {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $first:ident => $first_kw:literal $(, $variant:ident => $kw:literal)* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl $name {
            /// Every keyword, in dropdown order.
            pub const ALL: &'static [Self] = &[Self::$first $(, Self::$variant)*];

            /// The CSS keyword for this value.
            pub const fn as_css(&self) -> &'static str {
                match self {
                    Self::$first => $first_kw,
                    $(Self::$variant => $kw,)*
                }
            }

            /// Parse a CSS keyword (ASCII case-insensitive, surrounding whitespace ignored).
            pub fn from_css(value: &str) -> Option<Self> {
                let value = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|kw| kw.as_css().eq_ignore_ascii_case(value))
            }

            /// Keyword list as owned strings, for building select controls.
            pub fn options() -> Vec<String> {
                Self::ALL.iter().map(|kw| kw.as_css().to_string()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_css())
            }
        }
    };
}

css_keywords! {
    /// `flex-direction`.
    pub enum FlexDirection {
        Row => "row",
        RowReverse => "row-reverse",
        Column => "column",
        ColumnReverse => "column-reverse",
    }
}

impl FlexDirection {
    /// Check if this is a row direction (Row or RowReverse).
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }
}

css_keywords! {
    /// `flex-wrap`.
    pub enum FlexWrap {
        NoWrap => "nowrap",
        Wrap => "wrap",
        WrapReverse => "wrap-reverse",
    }
}

css_keywords! {
    /// `justify-content` (main axis alignment).
    pub enum JustifyContent {
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
        SpaceEvenly => "space-evenly",
    }
}

css_keywords! {
    /// `align-items` (cross axis alignment).
    pub enum AlignItems {
        Stretch => "stretch",
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        Baseline => "baseline",
    }
}

css_keywords! {
    /// `align-content` (multi-line cross axis).
    pub enum AlignContent {
        Stretch => "stretch",
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
    }
}

css_keywords! {
    /// `align-self`: `auto` defers to the container's `align-items`.
    pub enum AlignSelf {
        Auto => "auto",
        Stretch => "stretch",
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        Baseline => "baseline",
    }
}

css_keywords! {
    /// `position`.
    pub enum PositionMode {
        Static => "static",
        Relative => "relative",
        Absolute => "absolute",
        Fixed => "fixed",
        Sticky => "sticky",
    }
}

impl PositionMode {
    /// Whether `top`/`left`/`bottom`/`right` have any effect.
    pub const fn uses_offsets(&self) -> bool {
        !matches!(self, Self::Static)
    }

    /// Whether the box leaves normal flow.
    pub const fn is_out_of_flow(&self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

// =============================================================================
// CssLength - `auto`, pixels or percentage
// =============================================================================

/// A length as typed into an offset or basis control.
///
/// - `Auto`: content/flow determined
/// - `Px(n)`: absolute CSS pixels (unitless `0` is accepted as `Px(0.0)`)
/// - `Percent(n)`: percentage of the containing block (0-100)
///
/// # Examples
///
/// ```
/// use css_playground::types::CssLength;
///
/// assert_eq!(CssLength::parse("10px"), Some(CssLength::Px(10.0)));
/// assert_eq!(CssLength::parse("50%"), Some(CssLength::Percent(50.0)));
/// assert_eq!(CssLength::parse("auto"), Some(CssLength::Auto));
/// assert_eq!(CssLength::parse("10"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CssLength {
    #[default]
    Auto,
    Px(f32),
    Percent(f32),
}

impl CssLength {
    /// Parse a CSS length; `None` when the browser would reject the value.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if value == "auto" {
            return Some(Self::Auto);
        }
        if let Some(number) = value.strip_suffix("px") {
            return number.trim().parse::<f32>().ok().map(Self::Px);
        }
        if let Some(number) = value.strip_suffix('%') {
            return number.trim().parse::<f32>().ok().map(Self::Percent);
        }
        match value.parse::<f32>() {
            Ok(n) if n == 0.0 => Some(Self::Px(0.0)),
            _ => None,
        }
    }

    /// Parse, falling back to `auto` like an ignored declaration.
    pub fn parse_or_auto(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::Auto)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_parse_hex_with_custom_property_whitespace() {
        assert_eq!(Rgba::parse(" #6a9955"), Some(Rgba::rgb(0x6a, 0x99, 0x55)));
    }

    #[test]
    fn test_rgba_parse_rgb_function() {
        assert_eq!(Rgba::parse("rgb(10, 20, 30)"), Some(Rgba::rgb(10, 20, 30)));
        assert_eq!(Rgba::parse("rgb(10 20 30)"), Some(Rgba::rgb(10, 20, 30)));
        assert!(Rgba::parse("rgb(10, 20)").is_none());
    }

    #[test]
    fn test_rgba_parse_keywords() {
        assert!(Rgba::parse("default").unwrap().is_terminal_default());
        assert!(Rgba::parse("").is_none());
        assert!(Rgba::parse("papayawhip").is_none());
    }

    #[test]
    fn test_rgba_dim() {
        assert_eq!(Rgba::rgb(200, 100, 50).dim(0.5), Rgba::rgb(100, 50, 25));
        assert_eq!(Rgba::TERMINAL_DEFAULT.dim(0.5), Rgba::GRAY);
    }

    #[test]
    fn test_keyword_round_trip_table() {
        assert_eq!(FlexDirection::from_css("column-reverse"), Some(FlexDirection::ColumnReverse));
        assert_eq!(JustifyContent::from_css(" Space-Evenly "), Some(JustifyContent::SpaceEvenly));
        assert_eq!(AlignSelf::from_css("middle"), None);
        assert_eq!(FlexWrap::default().as_css(), "nowrap");
        assert_eq!(PositionMode::default(), PositionMode::Static);
    }

    #[test]
    fn test_keyword_options_order() {
        assert_eq!(
            PositionMode::options(),
            vec!["static", "relative", "absolute", "fixed", "sticky"]
        );
    }

    #[test]
    fn test_position_mode_predicates() {
        assert!(!PositionMode::Static.uses_offsets());
        assert!(PositionMode::Sticky.uses_offsets());
        assert!(PositionMode::Fixed.is_out_of_flow());
        assert!(!PositionMode::Relative.is_out_of_flow());
    }

    #[test]
    fn test_css_length_parse() {
        assert_eq!(CssLength::parse("-5px"), Some(CssLength::Px(-5.0)));
        assert_eq!(CssLength::parse("0"), Some(CssLength::Px(0.0)));
        assert_eq!(CssLength::parse("AUTO"), Some(CssLength::Auto));
        assert_eq!(CssLength::parse("12em"), None);
        assert_eq!(CssLength::parse_or_auto("garbage"), CssLength::Auto);
    }
}
