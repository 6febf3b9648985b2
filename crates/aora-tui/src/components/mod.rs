//! Presentational building blocks shared by the screens.
//!
//! Components own only their local state (current text, visibility toggle);
//! anything that touches the session or the backend is returned to the
//! caller as a value.

mod button;
mod form_field;
mod post_list;
mod search_input;

pub use button::Button;
pub use form_field::{FormField, Keyboard};
pub use post_list::PostList;
pub use search_input::{SearchAction, SearchInput};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Accent used for focused components.
pub const ACCENT: ratatui::style::Color = ratatui::style::Color::Rgb(0xFF, 0x9C, 0x01);

/// Truncates `text` to `max_width` terminal columns, ending with `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("aora", 10), "aora");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_with_ellipsis("日本語テキスト", 7), "日本語…");
    }
}
