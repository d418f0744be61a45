//! Text measurement in terminal cells.
//!
//! ASCII printables are one cell, control characters zero, CJK and emoji two.
//! Everything else counts as one.

/// Display width of one character.
pub fn char_width(c: char) -> u16 {
    if c.is_ascii() {
        return if c.is_ascii_control() { 0 } else { 1 };
    }
    let code = c as u32;
    if (0x1100..=0x115F).contains(&code)     // Hangul Jamo
        || (0x2E80..=0x9FFF).contains(&code)   // CJK
        || (0xAC00..=0xD7A3).contains(&code)   // Hangul Syllables
        || (0xF900..=0xFAFF).contains(&code)   // CJK Compatibility
        || (0xFE30..=0xFE6F).contains(&code)   // CJK Compatibility Forms
        || (0xFF00..=0xFF60).contains(&code)   // Fullwidth Forms
        || (0x1F300..=0x1F9FF).contains(&code) // Emoji
        || (0x20000..=0x2FFFF).contains(&code)
    {
        2
    } else {
        1
    }
}

/// Display width of a string.
pub fn string_width(s: &str) -> u16 {
    s.chars().fold(0u16, |width, c| width.saturating_add(char_width(c)))
}

/// Hard-wrap text to `width` cells, honoring embedded newlines.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0u16;

    for c in text.chars() {
        if c == '\n' {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
            continue;
        }

        let w = char_width(c);
        if current_width + w > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut text to `width` cells, ending in an ellipsis when something was cut.
pub fn truncate_text(text: &str, width: u16) -> String {
    if width == 0 {
        return String::new();
    }
    if string_width(text) <= width {
        return text.to_string();
    }

    let target = width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0u16;
    for c in text.chars() {
        let w = char_width(c);
        if current_width + w > target {
            break;
        }
        result.push(c);
        current_width += w;
    }
    result.push('…');
    result
}
