use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{Focus, Navigation, ScreenUpdate, missing_fields_alert};
use crate::components::{ACCENT, Button, FormField, Keyboard};
use crate::effects::UiEffect;
use crate::navigation::Route;

const USERNAME: usize = 0;
const EMAIL: usize = 1;
const PASSWORD: usize = 2;
const SUBMIT: usize = 3;

#[derive(Debug, Clone)]
pub struct SignUpScreen {
    pub username: FormField,
    pub email: FormField,
    pub password: FormField,
    pub button: Button,
    focus: Focus,
}

impl Default for SignUpScreen {
    fn default() -> Self {
        Self {
            username: FormField::new("Username", "Your unique username"),
            email: FormField::new("Email", "Your email address")
                .with_keyboard(Keyboard::EmailAddress),
            password: FormField::new("Password", "At least 8 characters"),
            button: Button::new("Sign Up"),
            focus: Focus::new(4),
        }
    }
}

impl SignUpScreen {
    fn focused_field(&mut self) -> Option<&mut FormField> {
        match self.focus.index() {
            USERNAME => Some(&mut self.username),
            EMAIL => Some(&mut self.email),
            PASSWORD => Some(&mut self.password),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus.next();
                ScreenUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus.prev();
                ScreenUpdate::stay()
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char('l') if ctrl => ScreenUpdate::navigate(Navigation::Replace(Route::SignIn)),
            _ => {
                if let Some(field) = self.focused_field() {
                    field.handle_key(key);
                }
                ScreenUpdate::stay()
            }
        }
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.focused_field() {
            field.paste(text);
        }
    }

    pub fn submit(&mut self) -> ScreenUpdate {
        if self.username.value.is_empty()
            || self.email.value.is_empty()
            || self.password.value.is_empty()
        {
            return ScreenUpdate::alert(missing_fields_alert());
        }
        if !self.button.press() {
            return ScreenUpdate::stay();
        }
        self.button.is_loading = true;
        ScreenUpdate::effect(UiEffect::SignUp {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
            username: self.username.value.clone(),
        })
    }

    pub fn finished(&mut self) {
        self.button.is_loading = false;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [heading, username, email, password, button, link, _] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Sign up to Aora",
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            heading,
        );
        self.username.render(frame, username, self.focus.is(USERNAME));
        self.email.render(frame, email, self.focus.is(EMAIL));
        self.password.render(frame, password, self.focus.is(PASSWORD));
        self.button.render(frame, button, self.focus.is(SUBMIT));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Have an account already? ", Style::default().fg(Color::Gray)),
                Span::styled("Sign In", Style::default().fg(ACCENT)),
                Span::styled(" (ctrl+l)", Style::default().fg(Color::DarkGray)),
            ])),
            link,
        );
    }
}
