//! Core of the Aora video-sharing client: configuration, logging, the
//! Appwrite REST client, domain operations and the session store.

pub mod api;
pub mod backend;
pub mod config;
pub mod credentials;
pub mod logging;
pub mod models;
pub mod session;

pub use api::Aora;
pub use backend::{AppwriteClient, BackendError, BackendErrorKind, BackendResult};
pub use models::{CreateVideoForm, Creator, FileKind, FileUpload, UserProfile, VideoPost};
pub use session::{SessionState, SessionStore};
