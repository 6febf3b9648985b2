//! Top-level view: header, the current screen, key hints and any alert.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::components::ACCENT;
use crate::navigation::Route;
use crate::state::{Alert, AppState};

pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();

    if state.session.is_loading() {
        render_splash(frame, area);
        return;
    }

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);
    let body = body.inner(Margin::new(2, 1));

    render_header(state, frame, header);

    let user = state.session.user();
    match state.router.current() {
        Route::SignIn => state.sign_in.render(frame, body),
        Route::SignUp => state.sign_up.render(frame, body),
        Route::Home => state.home.render(frame, body, user),
        Route::Search { .. } => state.search.render(frame, body),
        Route::Create => state.create.render(frame, body),
        Route::Profile => state.profile.render(frame, body, user),
    }

    render_hints(state, frame, footer);

    if let Some(alert) = &state.alert {
        render_alert(frame, area, alert);
    }
}

fn render_splash(frame: &mut Frame, area: Rect) {
    let [center] = Layout::vertical([Constraint::Length(2)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "Aora",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Loading…", Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center),
        center,
    );
}

fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let current = state.router.current();
    let mut spans = vec![
        Span::styled(" Aora ", Style::default().fg(Color::Black).bg(ACCENT)),
        Span::raw(" "),
    ];
    if state.session.is_logged_in() {
        for (key, route) in [("F1", Route::Home), ("F2", Route::Create), ("F3", Route::Profile)] {
            let active = std::mem::discriminant(current) == std::mem::discriminant(&route)
                || (route == Route::Home && matches!(current, Route::Search { .. }));
            let style = if active {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!("{key} {}", route.title()), style));
            spans.push(Span::raw("  "));
        }
    } else {
        spans.push(Span::styled(current.title(), Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hints(state: &AppState, frame: &mut Frame, area: Rect) {
    let hints = match state.router.current() {
        Route::SignIn | Route::SignUp => "tab next • enter submit • ctrl+t show password • ctrl+c quit",
        Route::Home => "type to search • enter search • ↑↓←→ browse • ctrl+r refresh • ctrl+c quit",
        Route::Search { .. } => "enter search • ↑↓ browse • esc back • ctrl+c quit",
        Route::Create => "tab next • enter publish • ctrl+c quit",
        Route::Profile => "↑↓ browse • ctrl+r refresh • ctrl+o sign out • ctrl+c quit",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn render_alert(frame: &mut Frame, area: Rect, alert: &Alert) {
    let width = area.width.min(50);
    let height = if alert.message.is_empty() { 4 } else { 6 };
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" {} ", alert.title),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let mut lines = Vec::new();
    if !alert.message.is_empty() {
        lines.push(Line::from(alert.message.as_str()));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "enter to dismiss",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        popup,
    );
}
