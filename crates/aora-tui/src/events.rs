//! Events fed to the reducer: terminal input and results of effects.

use aora_core::{BackendResult, UserProfile, VideoPost};

#[derive(Debug)]
pub enum UiEvent {
    /// Frame tick; drives rendering.
    Tick,

    Terminal(crossterm::event::Event),

    SessionHydrated(BackendResult<UserProfile>),

    /// Sign-in finished (session created and profile fetched).
    SignedIn(BackendResult<UserProfile>),

    SignedUp(BackendResult<UserProfile>),

    SignedOut(BackendResult<()>),

    HomeLoaded {
        latest: BackendResult<Vec<VideoPost>>,
        all: BackendResult<Vec<VideoPost>>,
    },

    SearchLoaded {
        query: String,
        result: BackendResult<Vec<VideoPost>>,
    },

    UserPostsLoaded {
        user_id: String,
        result: BackendResult<Vec<VideoPost>>,
    },

    /// Upload finished. Local file errors are folded into the message.
    VideoCreated(Result<VideoPost, String>),
}
