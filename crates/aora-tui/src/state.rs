//! Application state owned by the runtime and mutated only by the reducer.

use aora_core::{BackendError, SessionStore};

use crate::navigation::{Route, Router};
use crate::screens::create::CreateScreen;
use crate::screens::home::HomeScreen;
use crate::screens::profile::ProfileScreen;
use crate::screens::search::SearchScreen;
use crate::screens::sign_in::SignInScreen;
use crate::screens::sign_up::SignUpScreen;

/// Modal message; any key dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }
}

impl From<&BackendError> for Alert {
    fn from(err: &BackendError) -> Self {
        Self::error(err.message.clone())
    }
}

pub struct AppState {
    pub session: SessionStore,
    pub router: Router,
    pub sign_in: SignInScreen,
    pub sign_up: SignUpScreen,
    pub home: HomeScreen,
    pub search: SearchScreen,
    pub create: CreateScreen,
    pub profile: ProfileScreen,
    pub alert: Option<Alert>,
    pub should_quit: bool,
}

impl AppState {
    /// Fresh state; the session starts out loading until hydration lands.
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            router: Router::new(Route::SignIn),
            sign_in: SignInScreen::default(),
            sign_up: SignUpScreen::default(),
            home: HomeScreen::default(),
            search: SearchScreen::default(),
            create: CreateScreen::default(),
            profile: ProfileScreen::default(),
            alert: None,
            should_quit: false,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.user().map(|user| user.id.as_str())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SessionStore::new())
    }
}
