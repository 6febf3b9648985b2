//! Screens. Each one owns its components and turns keys into a
//! [`ScreenUpdate`]; the reducer applies navigation and alerts.

pub mod create;
pub mod home;
pub mod profile;
pub mod search;
pub mod sign_in;
pub mod sign_up;

use crate::components::SearchAction;
use crate::effects::UiEffect;
use crate::navigation::Route;
use crate::state::Alert;

/// Navigation request from a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Push(Route),
    /// Replace the whole history (auth transitions, tab switches).
    Replace(Route),
    /// Update the current search route's query in place.
    SetQuery(String),
    Back,
}

/// Update returned by screen key handlers.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScreenUpdate {
    pub effects: Vec<UiEffect>,
    pub navigation: Option<Navigation>,
    pub alert: Option<Alert>,
}

impl ScreenUpdate {
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn effect(effect: UiEffect) -> Self {
        Self {
            effects: vec![effect],
            ..Self::default()
        }
    }

    pub fn navigate(navigation: Navigation) -> Self {
        Self {
            navigation: Some(navigation),
            ..Self::default()
        }
    }

    pub fn alert(alert: Alert) -> Self {
        Self {
            alert: Some(alert),
            ..Self::default()
        }
    }
}

/// Keyboard focus over a fixed number of slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    index: usize,
    slots: usize,
}

impl Focus {
    pub fn new(slots: usize) -> Self {
        Self { index: 0, slots }
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn is(self, index: usize) -> bool {
        self.index == index
    }

    pub fn next(&mut self) {
        if self.slots > 0 {
            self.index = (self.index + 1) % self.slots;
        }
    }

    pub fn prev(&mut self) {
        if self.slots > 0 {
            self.index = (self.index + self.slots - 1) % self.slots;
        }
    }
}

/// Maps a search box submit onto navigation or an alert.
pub(crate) fn search_update(action: SearchAction) -> ScreenUpdate {
    match action {
        SearchAction::Alert { title, message } => ScreenUpdate::alert(Alert::new(title, message)),
        SearchAction::SetParams { query } => ScreenUpdate::navigate(Navigation::SetQuery(query)),
        SearchAction::Push { path } => match Route::parse(&path) {
            Some(route) => ScreenUpdate::navigate(Navigation::Push(route)),
            None => {
                tracing::warn!(path, "search produced an unknown route");
                ScreenUpdate::stay()
            }
        },
    }
}

/// "Please fill in all fields" guard shared by the forms.
pub(crate) fn missing_fields_alert() -> Alert {
    Alert::new("Error", "Please fill in all fields")
}
