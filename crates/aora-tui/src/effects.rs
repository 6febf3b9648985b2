//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only: every backend call and every file write goes
//! through here, so the reducer never blocks or awaits.

use std::path::PathBuf;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Resolve the signed-in user once at startup.
    HydrateSession,

    /// Create an email/password session, then fetch the profile.
    SignIn { email: String, password: String },

    /// Register an account and its profile document.
    SignUp {
        email: String,
        password: String,
        username: String,
    },

    /// Delete the current session.
    SignOut,

    /// Fetch the latest shelf and the full feed for the home screen.
    LoadHome,

    /// Run a title search.
    Search { query: String },

    /// Fetch posts created by `user_id`.
    LoadUserPosts { user_id: String },

    /// Read both files from disk, upload them and write the post.
    CreateVideo {
        title: String,
        prompt: String,
        thumbnail: PathBuf,
        video: PathBuf,
        user_id: String,
    },

    /// Save (or remove) the session credential on disk.
    PersistCredential,
}
