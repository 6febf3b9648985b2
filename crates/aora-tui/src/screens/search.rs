use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{Navigation, ScreenUpdate, search_update};
use crate::components::{PostList, SearchInput, truncate_with_ellipsis};
use crate::effects::UiEffect;

/// Results for the query carried in the route.
#[derive(Debug, Clone)]
pub struct SearchScreen {
    pub search: SearchInput,
    pub results: PostList,
    /// Query the visible results belong to.
    pub query: String,
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self {
            search: SearchInput::default(),
            results: PostList::new("No Videos Found", "No videos found for this search query"),
            query: String::new(),
        }
    }
}

impl SearchScreen {
    /// Seeds the box from the route query and starts a search.
    pub fn enter(&mut self, query: &str) -> UiEffect {
        self.search = SearchInput::new(Some(query));
        self.query = query.to_string();
        self.results.is_loading = true;
        UiEffect::Search {
            query: query.to_string(),
        }
    }

    /// Whether results for `query` are still wanted.
    pub fn expects(&self, query: &str) -> bool {
        self.query == query
    }

    pub fn handle_key(&mut self, key: KeyEvent, pathname: &str) -> ScreenUpdate {
        match key.code {
            KeyCode::Enter => search_update(self.search.submit(pathname)),
            KeyCode::Esc => ScreenUpdate::navigate(Navigation::Back),
            KeyCode::Up => {
                self.results.select_prev();
                ScreenUpdate::stay()
            }
            KeyCode::Down => {
                self.results.select_next();
                ScreenUpdate::stay()
            }
            _ => {
                self.search.handle_key(key);
                ScreenUpdate::stay()
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [heading, search, results] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("Search Results", Style::default().fg(Color::Gray))),
                Line::from(Span::styled(
                    truncate_with_ellipsis(&self.query, usize::from(heading.width)),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ]),
            heading,
        );
        self.search.render(frame, search, true);
        self.results.render(frame, results, "Results");
    }
}
