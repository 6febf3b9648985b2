use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use super::ACCENT;

/// Call-to-action button. Presses are ignored while `is_loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub title: String,
    pub is_loading: bool,
}

impl Button {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_loading: false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.is_loading
    }

    /// Whether a press should fire the action.
    pub fn press(&self) -> bool {
        !self.is_disabled()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let mut style = Style::default().fg(Color::Black).bg(ACCENT);
        if focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.is_disabled() {
            style = style.add_modifier(Modifier::DIM);
        }
        let label = if self.is_loading {
            format!("{}…", self.title)
        } else {
            self.title.clone()
        };
        let block = Block::bordered()
            .border_type(if focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(Style::default().fg(ACCENT));
        let paragraph = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_fires_when_idle() {
        assert!(Button::new("Sign In").press());
    }

    #[test]
    fn test_press_ignored_while_loading() {
        let mut button = Button::new("Publish");
        button.is_loading = true;
        assert!(button.is_disabled());
        assert!(!button.press());
    }
}
