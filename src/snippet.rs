//! Generated CSS snippets.
//!
//! A [`Snippet`] is one CSS rule block: a comment, a selector and an ordered
//! list of declarations. It renders to syntax-highlighted markup (HTML spans
//! with `comment`/`property`/`value` classes, optionally with inline colors)
//! or to its plain text content. Both forms begin with a newline, exactly like
//! the template literal the markup format comes from.

use std::fmt::Write as _;

// =============================================================================
// Tokens
// =============================================================================

/// Highlight class of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    Property,
    Value,
    /// Punctuation and indentation, never wrapped.
    Plain,
}

impl TokenKind {
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Comment => Some("comment"),
            Self::Property => Some("property"),
            Self::Value => Some("value"),
            Self::Plain => None,
        }
    }
}

/// Inline colors for the three highlight classes, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeColors {
    pub comment: String,
    pub property: String,
    pub value: String,
}

impl CodeColors {
    pub fn for_kind(&self, kind: TokenKind) -> Option<&str> {
        match kind {
            TokenKind::Comment => Some(self.comment.as_str()),
            TokenKind::Property => Some(self.property.as_str()),
            TokenKind::Value => Some(self.value.as_str()),
            TokenKind::Plain => None,
        }
    }
}

// =============================================================================
// Snippet
// =============================================================================

/// One CSS declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// A CSS rule block ready to be shown as code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snippet {
    comment: String,
    selector: String,
    declarations: Vec<Declaration>,
    colors: Option<CodeColors>,
}

impl Snippet {
    /// Start a rule block. `comment` is the text inside `/* */`.
    pub fn new(comment: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            selector: selector.into(),
            declarations: Vec::new(),
            colors: None,
        }
    }

    /// Append a declaration.
    pub fn declare(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration {
            property: property.into(),
            value: value.into(),
        });
        self
    }

    /// Give every span an inline `style="color: ..."`.
    pub fn with_colors(mut self, colors: CodeColors) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn colors(&self) -> Option<&CodeColors> {
        self.colors.as_ref()
    }

    /// Value of the first declaration for `property`.
    pub fn value_of(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// The block as highlighted tokens, one `Vec` per line.
    ///
    /// The leading empty line of the markup form is not included.
    pub fn lines(&self) -> Vec<Vec<(TokenKind, String)>> {
        let mut lines = Vec::with_capacity(self.declarations.len() + 3);
        lines.push(vec![(TokenKind::Comment, format!("/* {} */", self.comment))]);
        lines.push(vec![
            (TokenKind::Property, self.selector.clone()),
            (TokenKind::Plain, " {".to_string()),
        ]);
        for decl in &self.declarations {
            lines.push(vec![
                (TokenKind::Plain, "  ".to_string()),
                (TokenKind::Property, decl.property.clone()),
                (TokenKind::Plain, ": ".to_string()),
                (TokenKind::Value, decl.value.clone()),
                (TokenKind::Plain, ";".to_string()),
            ]);
        }
        lines.push(vec![(TokenKind::Plain, "}".to_string())]);
        lines
    }

    /// Highlighted markup, as assigned to the snippet block's `innerHTML`.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push('\n');
            for (kind, text) in line {
                self.write_span(&mut out, kind, &text);
            }
        }
        out
    }

    /// Text content of the markup.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push('\n');
            for (_, text) in line {
                out.push_str(&text);
            }
        }
        out
    }

    fn write_span(&self, out: &mut String, kind: TokenKind, text: &str) {
        let Some(class) = kind.class_name() else {
            out.push_str(&escape_html(text));
            return;
        };
        match self.colors.as_ref().and_then(|c| c.for_kind(kind)) {
            Some(color) => {
                let _ = write!(
                    out,
                    r#"<span class="{class}" style="color: {}">{}</span>"#,
                    escape_html(color),
                    escape_html(text)
                );
            }
            None => {
                let _ = write!(out, r#"<span class="{class}">{}</span>"#, escape_html(text));
            }
        }
    }
}

/// Escape text for insertion into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parent() -> Snippet {
        Snippet::new("Parent Styles", ".parent").declare("position", "relative")
    }

    #[test]
    fn test_markup_without_colors() {
        assert_eq!(
            parent().to_markup(),
            "\n<span class=\"comment\">/* Parent Styles */</span>\n\
             <span class=\"property\">.parent</span> {\n  \
             <span class=\"property\">position</span>: <span class=\"value\">relative</span>;\n}"
        );
    }

    #[test]
    fn test_markup_with_colors() {
        let snippet = parent().with_colors(CodeColors {
            comment: "#888".into(),
            property: "#00f".into(),
            value: "#0a0".into(),
        });
        assert_eq!(
            snippet.to_markup(),
            "\n<span class=\"comment\" style=\"color: #888\">/* Parent Styles */</span>\n\
             <span class=\"property\" style=\"color: #00f\">.parent</span> {\n  \
             <span class=\"property\" style=\"color: #00f\">position</span>: \
             <span class=\"value\" style=\"color: #0a0\">relative</span>;\n}"
        );
    }

    #[test]
    fn test_text_content() {
        assert_eq!(parent().to_text(), "\n/* Parent Styles */\n.parent {\n  position: relative;\n}");
    }

    #[test]
    fn test_values_are_escaped_in_markup_only() {
        let snippet = Snippet::new("x", ".x").declare("flex-basis", "<b>");
        assert!(snippet.to_markup().contains("&lt;b&gt;"));
        assert!(snippet.to_text().contains("flex-basis: <b>;"));
    }

    #[test]
    fn test_value_of() {
        let snippet = parent().declare("top", "10px");
        assert_eq!(snippet.value_of("top"), Some("10px"));
        assert_eq!(snippet.value_of("left"), None);
    }
}
