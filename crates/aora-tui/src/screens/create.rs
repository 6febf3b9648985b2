use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{Focus, ScreenUpdate, missing_fields_alert};
use crate::components::{Button, FormField};
use crate::effects::UiEffect;
use crate::state::Alert;

const TITLE: usize = 0;
const THUMBNAIL: usize = 1;
const VIDEO: usize = 2;
const PROMPT: usize = 3;
const SUBMIT: usize = 4;

/// Upload form: title, thumbnail and video paths, prompt.
#[derive(Debug, Clone)]
pub struct CreateScreen {
    pub title: FormField,
    pub thumbnail: FormField,
    pub video: FormField,
    pub prompt: FormField,
    pub button: Button,
    focus: Focus,
}

impl Default for CreateScreen {
    fn default() -> Self {
        Self {
            title: FormField::new("Video Title", "Give your video a catchy title..."),
            thumbnail: FormField::new("Thumbnail Image", "Path to an image file"),
            video: FormField::new("Upload Video", "Path to a video file"),
            prompt: FormField::new("AI Prompt", "The prompt of your video..."),
            button: Button::new("Submit & Publish"),
            focus: Focus::new(5),
        }
    }
}

impl CreateScreen {
    fn focused_field(&mut self) -> Option<&mut FormField> {
        match self.focus.index() {
            TITLE => Some(&mut self.title),
            THUMBNAIL => Some(&mut self.thumbnail),
            VIDEO => Some(&mut self.video),
            PROMPT => Some(&mut self.prompt),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, user_id: Option<&str>) -> ScreenUpdate {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus.next();
                ScreenUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus.prev();
                ScreenUpdate::stay()
            }
            KeyCode::Enter => self.submit(user_id),
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

    pub fn submit(&mut self, user_id: Option<&str>) -> ScreenUpdate {
        if [&self.title, &self.thumbnail, &self.video, &self.prompt]
            .iter()
            .any(|field| field.value.trim().is_empty())
        {
            return ScreenUpdate::alert(missing_fields_alert());
        }
        let Some(user_id) = user_id else {
            return ScreenUpdate::alert(Alert::new("Error", "You must be signed in to upload"));
        };
        if !self.button.press() {
            return ScreenUpdate::stay();
        }
        self.button.is_loading = true;
        ScreenUpdate::effect(UiEffect::CreateVideo {
            title: self.title.value.clone(),
            prompt: self.prompt.value.clone(),
            thumbnail: PathBuf::from(self.thumbnail.value.trim()),
            video: PathBuf::from(self.video.value.trim()),
            user_id: user_id.to_string(),
        })
    }

    /// Clears the form once an upload finishes, whatever the outcome.
    pub fn finished(&mut self) {
        *self = Self::default();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [heading, title, thumbnail, video, prompt, button, _] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Upload Video",
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            heading,
        );
        self.title.render(frame, title, self.focus.is(TITLE));
        self.thumbnail.render(frame, thumbnail, self.focus.is(THUMBNAIL));
        self.video.render(frame, video, self.focus.is(VIDEO));
        self.prompt.render(frame, prompt, self.focus.is(PROMPT));
        self.button.render(frame, button, self.focus.is(SUBMIT));
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn fill(screen: &mut CreateScreen, values: [&str; 4]) {
        for value in values {
            screen.paste(value);
            screen.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), None);
        }
    }

    #[test]
    fn test_missing_field_alerts() {
        let mut screen = CreateScreen::default();
        fill(&mut screen, ["Sunset", "/tmp/t.png", "", "prompt"]);

        let update = screen.submit(Some("u1"));
        assert_eq!(update.alert, Some(missing_fields_alert()));
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_submit_emits_create_video() {
        let mut screen = CreateScreen::default();
        fill(&mut screen, ["Sunset", "/tmp/t.png", " /tmp/v.mp4 ", "a prompt"]);

        let update = screen.submit(Some("u1"));
        assert_eq!(
            update.effects,
            vec![UiEffect::CreateVideo {
                title: "Sunset".to_string(),
                prompt: "a prompt".to_string(),
                thumbnail: PathBuf::from("/tmp/t.png"),
                video: PathBuf::from("/tmp/v.mp4"),
                user_id: "u1".to_string(),
            }]
        );
        assert!(screen.button.is_loading);
        assert!(screen.submit(Some("u1")).effects.is_empty());
    }

    #[test]
    fn test_finished_resets_form() {
        let mut screen = CreateScreen::default();
        fill(&mut screen, ["Sunset", "/tmp/t.png", "/tmp/v.mp4", "a prompt"]);
        screen.submit(Some("u1"));

        screen.finished();
        assert!(screen.title.value.is_empty());
        assert!(!screen.button.is_loading);
    }
}
