use aora_core::VideoPost;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Wrap};

use super::{ACCENT, truncate_with_ellipsis};

/// Scrollable list of video cards with an empty state.
#[derive(Debug, Clone, Default)]
pub struct PostList {
    pub posts: Vec<VideoPost>,
    pub is_loading: bool,
    selected: usize,
    empty_title: &'static str,
    empty_subtitle: &'static str,
}

impl PostList {
    pub fn new(empty_title: &'static str, empty_subtitle: &'static str) -> Self {
        Self {
            empty_title,
            empty_subtitle,
            ..Self::default()
        }
    }

    pub fn set_posts(&mut self, posts: Vec<VideoPost>) {
        self.posts = posts;
        self.selected = 0;
        self.is_loading = false;
    }

    pub fn selected(&self) -> Option<&VideoPost> {
        self.posts.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.posts.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {title} "));

        if self.is_loading {
            let text = Paragraph::new("Loading…")
                .style(Style::default().fg(Color::Gray))
                .block(block);
            frame.render_widget(text, area);
            return;
        }

        if self.posts.is_empty() {
            let lines = vec![
                Line::from(Span::styled(
                    self.empty_title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    self.empty_subtitle,
                    Style::default().fg(Color::Gray),
                )),
            ];
            frame.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
                area,
            );
            return;
        }

        let width = usize::from(area.width.saturating_sub(4));
        let items: Vec<ListItem> = self.posts.iter().map(|post| card(post, width)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(ACCENT))
            .highlight_symbol("▌");
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn card(post: &VideoPost, width: usize) -> ListItem<'static> {
    let creator = post
        .creator
        .as_ref()
        .and_then(|creator| creator.username())
        .unwrap_or("unknown");
    ListItem::new(vec![
        Line::from(Span::styled(
            truncate_with_ellipsis(&post.title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_with_ellipsis(creator, width),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            truncate_with_ellipsis(&post.video, width),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}
