//! Effect handlers: plain async functions that call `aora-core` and turn
//! the outcome into a [`UiEvent`].

use std::path::{Path, PathBuf};

use aora_core::{Aora, CreateVideoForm, FileUpload, credentials};

use crate::events::UiEvent;

pub async fn hydrate_session(aora: Aora) -> UiEvent {
    UiEvent::SessionHydrated(aora.get_current_user().await)
}

/// Sign-in resolves the profile too, so the session store gets a user.
pub async fn sign_in(aora: Aora, email: String, password: String) -> UiEvent {
    let result = match aora.sign_in(&email, &password).await {
        Ok(_) => aora.get_current_user().await,
        Err(err) => Err(err),
    };
    UiEvent::SignedIn(result)
}

pub async fn sign_up(aora: Aora, email: String, password: String, username: String) -> UiEvent {
    UiEvent::SignedUp(aora.create_user(&email, &password, &username).await)
}

pub async fn sign_out(aora: Aora) -> UiEvent {
    UiEvent::SignedOut(aora.sign_out().await)
}

pub async fn load_home(aora: Aora) -> UiEvent {
    let (latest, all) = tokio::join!(aora.get_latest_posts(), aora.get_all_posts());
    UiEvent::HomeLoaded { latest, all }
}

pub async fn search(aora: Aora, query: String) -> UiEvent {
    let result = aora.search_posts(&query).await;
    UiEvent::SearchLoaded { query, result }
}

pub async fn load_user_posts(aora: Aora, user_id: String) -> UiEvent {
    let result = aora.get_user_posts(&user_id).await;
    UiEvent::UserPostsLoaded { user_id, result }
}

pub async fn create_video(
    aora: Aora,
    title: String,
    prompt: String,
    thumbnail: PathBuf,
    video: PathBuf,
    user_id: String,
) -> UiEvent {
    let files = tokio::task::spawn_blocking(move || {
        Ok::<_, anyhow::Error>((FileUpload::from_path(&thumbnail)?, FileUpload::from_path(&video)?))
    })
    .await;
    let (thumbnail, video) = match files {
        Ok(Ok(files)) => files,
        Ok(Err(err)) => return UiEvent::VideoCreated(Err(format!("{err:#}"))),
        Err(err) => return UiEvent::VideoCreated(Err(format!("File read task failed: {err}"))),
    };

    let form = CreateVideoForm {
        title,
        prompt,
        thumbnail,
        video,
        user_id,
    };
    UiEvent::VideoCreated(
        aora.create_video(&form)
            .await
            .map_err(|err| err.message),
    )
}

/// Writes the client's credential to disk. Failures are logged only: the
/// in-memory session keeps working for this run.
pub fn persist_credential(aora: &Aora, path: &Path) {
    if let Err(err) = credentials::save(path, aora.client()) {
        tracing::warn!(path = %path.display(), "failed to persist session: {err:#}");
    }
}
