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

const EMAIL: usize = 0;
const PASSWORD: usize = 1;
const SUBMIT: usize = 2;

#[derive(Debug, Clone)]
pub struct SignInScreen {
    pub email: FormField,
    pub password: FormField,
    pub button: Button,
    focus: Focus,
}

impl Default for SignInScreen {
    fn default() -> Self {
        Self {
            email: FormField::new("Email", "Your email address")
                .with_keyboard(Keyboard::EmailAddress),
            password: FormField::new("Password", "Your password"),
            button: Button::new("Sign In"),
            focus: Focus::new(3),
        }
    }
}

impl SignInScreen {
    fn focused_field(&mut self) -> Option<&mut FormField> {
        match self.focus.index() {
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
            KeyCode::Char('l') if ctrl => ScreenUpdate::navigate(Navigation::Replace(Route::SignUp)),
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
        if self.email.value.is_empty() || self.password.value.is_empty() {
            return ScreenUpdate::alert(missing_fields_alert());
        }
        if !self.button.press() {
            return ScreenUpdate::stay();
        }
        self.button.is_loading = true;
        ScreenUpdate::effect(UiEffect::SignIn {
            email: self.email.value.clone(),
            password: self.password.value.clone(),
        })
    }

    /// Called once the sign-in effect reports back.
    pub fn finished(&mut self) {
        self.button.is_loading = false;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [heading, email, password, button, link, _] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Log in to Aora",
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            heading,
        );
        self.email.render(frame, email, self.focus.is(EMAIL));
        self.password.render(frame, password, self.focus.is(PASSWORD));
        self.button.render(frame, button, self.focus.is(SUBMIT));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Don't have an account? ", Style::default().fg(Color::Gray)),
                Span::styled("Sign Up", Style::default().fg(ACCENT)),
                Span::styled(" (ctrl+l)", Style::default().fg(Color::DarkGray)),
            ])),
            link,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(screen: &mut SignInScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn test_submit_with_missing_fields_alerts() {
        let mut screen = SignInScreen::default();
        type_into(&mut screen, "jane@example.com");

        let update = screen.handle_key(enter());
        assert_eq!(update.alert, Some(missing_fields_alert()));
        assert!(update.effects.is_empty());
        assert!(!screen.button.is_loading);
    }

    #[test]
    fn test_submit_emits_sign_in_once() {
        let mut screen = SignInScreen::default();
        type_into(&mut screen, "jane@example.com");
        screen.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        type_into(&mut screen, "hunter22");

        let update = screen.handle_key(enter());
        assert_eq!(
            update.effects,
            vec![UiEffect::SignIn {
                email: "jane@example.com".to_string(),
                password: "hunter22".to_string(),
            }]
        );
        assert!(screen.button.is_loading);

        // A second press while loading is ignored.
        assert!(screen.handle_key(enter()).effects.is_empty());

        screen.finished();
        assert!(!screen.button.is_loading);
    }

    #[test]
    fn test_link_switches_to_sign_up() {
        let mut screen = SignInScreen::default();
        let update = screen.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(update.navigation, Some(Navigation::Replace(Route::SignUp)));
    }
}
