use aora_core::UserProfile;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::ScreenUpdate;
use crate::components::{PostList, truncate_with_ellipsis};
use crate::effects::UiEffect;

/// The signed-in user's posts and the sign-out action.
#[derive(Debug, Clone)]
pub struct ProfileScreen {
    pub posts: PostList,
    /// Whose posts are shown.
    pub user_id: Option<String>,
    pub signing_out: bool,
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self {
            posts: PostList::new("No Videos Found", "No videos found for this profile"),
            user_id: None,
            signing_out: false,
        }
    }
}

impl ProfileScreen {
    pub fn enter(&mut self, user_id: &str) -> UiEffect {
        self.user_id = Some(user_id.to_string());
        self.posts.is_loading = true;
        UiEffect::LoadUserPosts {
            user_id: user_id.to_string(),
        }
    }

    pub fn expects(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('o') if ctrl => {
                if self.signing_out {
                    return ScreenUpdate::stay();
                }
                self.signing_out = true;
                ScreenUpdate::effect(UiEffect::SignOut)
            }
            KeyCode::Char('r') if ctrl => match self.user_id.clone() {
                Some(user_id) => ScreenUpdate::effect(self.enter(&user_id)),
                None => ScreenUpdate::stay(),
            },
            KeyCode::Up => {
                self.posts.select_prev();
                ScreenUpdate::stay()
            }
            KeyCode::Down => {
                self.posts.select_next();
                ScreenUpdate::stay()
            }
            _ => ScreenUpdate::stay(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, user: Option<&UserProfile>) {
        let [header, posts] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(5)]).areas(area);

        let width = usize::from(header.width);
        let (username, avatar) = user.map_or(("", ""), |u| (u.username.as_str(), u.avatar.as_str()));
        let count = if self.posts.is_loading {
            "…".to_string()
        } else {
            self.posts.posts.len().to_string()
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    truncate_with_ellipsis(username, width),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate_with_ellipsis(avatar, width),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(vec![
                    Span::styled(count, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(" Posts", Style::default().fg(Color::Gray)),
                ]),
            ]),
            header,
        );
        self.posts.render(frame, posts, "Your Videos");
    }
}
