use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use super::{ACCENT, truncate_with_ellipsis};

/// Title that turns a field into a masked password field.
const PASSWORD_TITLE: &str = "Password";
const MASK: char = '•';

/// Input hint; email fields reject whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Keyboard {
    #[default]
    Default,
    EmailAddress,
}

/// Labelled single-line text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub title: String,
    pub value: String,
    pub placeholder: String,
    pub keyboard: Keyboard,
    show_password: bool,
}

impl FormField {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: String::new(),
            placeholder: placeholder.into(),
            keyboard: Keyboard::Default,
            show_password: false,
        }
    }

    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn is_password(&self) -> bool {
        self.title == PASSWORD_TITLE
    }

    pub fn is_masked(&self) -> bool {
        self.is_password() && !self.show_password
    }

    /// Flips password visibility. No-op on other fields.
    pub fn toggle_visibility(&mut self) {
        if self.is_password() {
            self.show_password = !self.show_password;
        }
    }

    /// Text as it should appear on screen.
    pub fn display_value(&self) -> String {
        if self.is_masked() {
            std::iter::repeat_n(MASK, self.value.chars().count()).collect()
        } else {
            self.value.clone()
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    fn accepts(&self, c: char) -> bool {
        match self.keyboard {
            Keyboard::Default => !c.is_control(),
            Keyboard::EmailAddress => !c.is_control() && !c.is_whitespace(),
        }
    }

    /// Appends pasted text, dropping characters the keyboard rejects.
    pub fn paste(&mut self, text: &str) {
        let accepted: String = text.chars().filter(|c| self.accepts(*c)).collect();
        self.value.push_str(&accepted);
    }

    /// Applies an editing key. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('t') if ctrl && self.is_password() => {
                self.toggle_visibility();
                true
            }
            KeyCode::Char('u') if ctrl => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !ctrl && self.accepts(c) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border = if focused { ACCENT } else { Color::DarkGray };
        let mut title = vec![Span::styled(
            format!(" {} ", self.title),
            Style::default().fg(Color::Gray),
        )];
        if self.is_password() {
            let hint = if self.show_password { "hide" } else { "show" };
            title.push(Span::styled(
                format!("[ctrl+t {hint}] "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Line::from(title));

        let inner_width = usize::from(area.width.saturating_sub(3));
        let line = if self.value.is_empty() {
            Line::from(Span::styled(
                truncate_with_ellipsis(&self.placeholder, inner_width),
                Style::default().fg(Color::Rgb(0x7b, 0x7b, 0x8b)),
            ))
        } else {
            let shown = self.display_value();
            let mut spans = vec![Span::raw(tail_fit(&shown, inner_width))];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
            }
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

/// Keeps the end of `text` visible while typing past the field width.
fn tail_fit(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        text.to_string()
    } else {
        text.chars().skip(count - max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(field: &mut FormField, text: &str) {
        for c in text.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_password_field_is_masked_until_toggled() {
        let mut field = FormField::new("Password", "");
        type_text(&mut field, "hunter22");

        assert!(field.is_masked());
        assert_eq!(field.display_value(), "••••••••");

        assert!(field.handle_key(ctrl('t')));
        assert_eq!(field.display_value(), "hunter22");

        field.toggle_visibility();
        assert!(field.is_masked());
    }

    #[test]
    fn test_other_fields_never_mask() {
        let mut field = FormField::new("Username", "Your unique username");
        type_text(&mut field, "jane");
        field.toggle_visibility();
        assert!(!field.is_masked());
        assert_eq!(field.display_value(), "jane");
        assert!(!field.handle_key(ctrl('t')));
    }

    #[test]
    fn test_email_keyboard_rejects_spaces() {
        let mut field = FormField::new("Email", "").with_keyboard(Keyboard::EmailAddress);
        type_text(&mut field, "ja ne@x.io");
        assert_eq!(field.value, "jane@x.io");

        field.paste(" a b ");
        assert_eq!(field.value, "jane@x.ioab");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut field = FormField::new("Title", "");
        type_text(&mut field, "abc");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value, "ab");
        field.handle_key(ctrl('u'));
        assert!(field.value.is_empty());
    }

    #[test]
    fn test_tail_fit_keeps_end() {
        assert_eq!(tail_fit("abcdef", 3), "def");
        assert_eq!(tail_fit("ab", 3), "ab");
    }
}
