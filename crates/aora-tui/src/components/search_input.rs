use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use super::ACCENT;

const PLACEHOLDER: &str = "Search for a video topic";

/// Outcome of submitting a search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Nothing to search for; tell the user instead.
    Alert { title: String, message: String },
    /// Already on a search screen: update its query param in place.
    SetParams { query: String },
    /// Navigate to the search screen at `path`.
    Push { path: String },
}

/// Search box holding its own query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub query: String,
}

impl SearchInput {
    pub fn new(initial_query: Option<&str>) -> Self {
        Self {
            query: initial_query.unwrap_or_default().to_string(),
        }
    }

    /// Decides what a submit does given the current pathname. Never talks
    /// to the backend.
    pub fn submit(&self, pathname: &str) -> SearchAction {
        if self.query.is_empty() {
            return SearchAction::Alert {
                title: "Missing query".to_string(),
                message: "Please enter a search query".to_string(),
            };
        }
        if pathname.starts_with("/search") {
            SearchAction::SetParams {
                query: self.query.clone(),
            }
        } else {
            SearchAction::Push {
                path: format!("/search/{}", self.query),
            }
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.query
            .extend(text.chars().filter(|c| !c.is_control()));
    }

    /// Applies an editing key. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.query.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                true
            }
            KeyCode::Backspace => {
                self.query.pop();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border = if focused { ACCENT } else { Color::DarkGray };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Span::styled(" ⌕ ", Style::default().fg(Color::Gray)));
        let line = if self.query.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::Rgb(0xCD, 0xCD, 0xE0)),
            ))
        } else {
            Line::from(self.query.as_str())
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
