use aora_core::UserProfile;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use super::{ScreenUpdate, search_update};
use crate::components::{ACCENT, PostList, SearchInput, truncate_with_ellipsis};
use crate::effects::UiEffect;

/// Feed: search box, the latest shelf and every post.
#[derive(Debug, Clone)]
pub struct HomeScreen {
    pub search: SearchInput,
    pub latest: PostList,
    pub posts: PostList,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self {
            search: SearchInput::default(),
            latest: PostList::new("No Videos Found", "Be the first one to upload a video"),
            posts: PostList::new("No Videos Found", "Be the first one to upload a video"),
        }
    }
}

impl HomeScreen {
    /// Marks both lists as loading and asks for fresh data.
    pub fn enter(&mut self) -> UiEffect {
        self.latest.is_loading = true;
        self.posts.is_loading = true;
        UiEffect::LoadHome
    }

    pub fn handle_key(&mut self, key: KeyEvent, pathname: &str) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => search_update(self.search.submit(pathname)),
            KeyCode::Char('r') if ctrl => ScreenUpdate::effect(self.enter()),
            KeyCode::Up => {
                self.posts.select_prev();
                ScreenUpdate::stay()
            }
            KeyCode::Down => {
                self.posts.select_next();
                ScreenUpdate::stay()
            }
            KeyCode::Left => {
                self.latest.select_prev();
                ScreenUpdate::stay()
            }
            KeyCode::Right => {
                self.latest.select_next();
                ScreenUpdate::stay()
            }
            _ => {
                self.search.handle_key(key);
                ScreenUpdate::stay()
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, user: Option<&UserProfile>) {
        let [greeting, search, latest, posts] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(5),
        ])
        .areas(area);

        let username = user.map_or("", |u| u.username.as_str());
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("Welcome Back", Style::default().fg(Color::Gray))),
                Line::from(Span::styled(
                    truncate_with_ellipsis(username, usize::from(greeting.width)),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ]),
            greeting,
        );
        self.search.render(frame, search, true);
        render_shelf(frame, latest, &self.latest);
        self.posts.render(frame, posts, "All Videos");
    }
}

/// Latest posts as a single row of titles.
fn render_shelf(frame: &mut Frame, area: Rect, latest: &PostList) {
    if latest.is_loading || latest.posts.is_empty() {
        latest.render(frame, area, "Latest Videos");
        return;
    }
    let selected_id = latest.selected().map(|p| p.id.as_str());
    let mut spans = Vec::new();
    for post in &latest.posts {
        let style = if Some(post.id.as_str()) == selected_id {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(truncate_with_ellipsis(&post.title, 18), style));
        spans.push(Span::raw("  "));
    }
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Latest Videos ");
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
