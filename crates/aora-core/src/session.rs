//! Signed-in identity cache.
//!
//! A [`SessionStore`] is owned by the UI composition root and passed down
//! explicitly. It is hydrated once at startup, updated optimistically after
//! sign-in/sign-up, and cleared on sign-out. It never persists the user and
//! never revalidates on its own.

use std::future::Future;

use crate::api::Aora;
use crate::backend::BackendResult;
use crate::models::UserProfile;

/// Anything that can answer "who is signed in".
pub trait CurrentUserSource {
    fn current_user(&self) -> impl Future<Output = BackendResult<UserProfile>> + Send;
}

impl CurrentUserSource for Aora {
    fn current_user(&self) -> impl Future<Output = BackendResult<UserProfile>> + Send {
        self.get_current_user()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub is_logged_in: bool,
    pub user: Option<UserProfile>,
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_logged_in: false,
            user: None,
            is_loading: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    /// Looks up the current user once and records the outcome.
    pub async fn hydrate<S: CurrentUserSource>(&mut self, source: &S) {
        let result = source.current_user().await;
        self.apply_hydration(result);
    }

    /// Records the outcome of the startup lookup. Any failure, including a
    /// missing profile, counts as signed out. Loading ends either way.
    pub fn apply_hydration(&mut self, result: BackendResult<UserProfile>) {
        match result {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "session restored");
                self.state.is_logged_in = true;
                self.state.user = Some(user);
            }
            Err(err) => {
                if err.is_unauthorized() {
                    tracing::debug!("no active session");
                } else {
                    tracing::warn!(error = %err, "session lookup failed");
                }
                self.state.is_logged_in = false;
                self.state.user = None;
            }
        }
        self.state.is_loading = false;
    }

    pub fn set_logged_in(&mut self, logged_in: bool) {
        self.state.is_logged_in = logged_in;
    }

    pub fn set_user(&mut self, user: Option<UserProfile>) {
        self.state.user = user;
    }

    /// Optimistic update after a successful credential operation.
    pub fn signed_in(&mut self, user: UserProfile) {
        self.state.is_logged_in = true;
        self.state.user = Some(user);
        self.state.is_loading = false;
    }

    /// Teardown on sign-out.
    pub fn clear(&mut self) {
        self.state = SessionState {
            is_logged_in: false,
            user: None,
            is_loading: false,
        };
    }
}
