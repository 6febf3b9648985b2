//! Domain operations over the backend.
//!
//! Every public operation returns a [`BackendResult`]; failures are logged
//! once here and handed back unchanged. Multi-step writes are not rolled
//! back: a failed `create_user` can leave an account without a profile, and
//! a failed `create_video` can leave one uploaded file behind.

use anyhow::Result;

use crate::backend::query::CREATED_AT;
use crate::backend::types::Session;
use crate::backend::{AppwriteClient, BackendError, BackendResult, PreviewOptions, Query, id};
use crate::config::{AppwriteConfig, Config};
use crate::models::{
    CreateVideoForm, FileKind, FileUpload, NewUserDocument, NewVideoDocument, UserProfile,
    VideoPost,
};

/// Size of the "latest" shelf on the home feed.
pub const LATEST_POSTS_LIMIT: u32 = 7;

fn logged<T>(operation: &'static str, result: BackendResult<T>) -> BackendResult<T> {
    result.inspect_err(|err| {
        tracing::error!(
            operation,
            kind = %err.kind,
            status = ?err.status,
            details = err.details.as_deref().unwrap_or(""),
            "{err}"
        );
    })
}

/// Handle to the app's backend project.
#[derive(Clone)]
pub struct Aora {
    client: AppwriteClient,
    settings: AppwriteConfig,
}

impl Aora {
    pub fn new(client: AppwriteClient, settings: AppwriteConfig) -> Self {
        Self { client, settings }
    }

    /// Builds the client from config, honouring endpoint/project env overrides.
    ///
    /// # Errors
    /// Returns an error if the endpoint is not a valid URL.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = AppwriteClient::new(
            config.endpoint()?,
            config.project_id(),
            config.appwrite.platform.clone(),
        );
        Ok(Self::new(client, config.appwrite.clone()))
    }

    pub fn client(&self) -> &AppwriteClient {
        &self.client
    }

    /// Registers an account, signs it in and writes its profile document.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> BackendResult<UserProfile> {
        logged(
            "create_user",
            self.create_user_steps(email, password, username).await,
        )
    }

    async fn create_user_steps(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> BackendResult<UserProfile> {
        let account = self
            .client
            .create_account(&id::unique_id(), email, password, username)
            .await?;
        let avatar = self.client.initials_url(username)?;
        self.client
            .create_email_password_session(email, password)
            .await?;

        let document = NewUserDocument {
            account_id: &account.id,
            email,
            username,
            avatar: &avatar,
        };
        let user: UserProfile = self
            .client
            .create_document(
                &self.settings.database_id,
                &self.settings.user_collection_id,
                &id::unique_id(),
                &document,
            )
            .await?;
        tracing::info!(user_id = %user.id, account_id = %account.id, "user created");
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        let result = self
            .client
            .create_email_password_session(email, password)
            .await;
        if let Ok(session) = &result {
            tracing::info!(session_id = %session.id, "signed in");
        }
        logged("sign_in", result)
    }

    pub async fn sign_out(&self) -> BackendResult<()> {
        logged("sign_out", self.client.delete_session("current").await)
    }

    /// Profile of the signed-in account.
    pub async fn get_current_user(&self) -> BackendResult<UserProfile> {
        logged("get_current_user", self.current_user_steps().await)
    }

    async fn current_user_steps(&self) -> BackendResult<UserProfile> {
        let account = self.client.get_account().await?;
        let users = self
            .client
            .list_documents::<UserProfile>(
                &self.settings.database_id,
                &self.settings.user_collection_id,
                &[Query::equal("accountId", account.id.as_str())],
            )
            .await?;
        users
            .documents
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::not_found("User not found"))
    }

    async fn list_posts(&self, queries: &[Query]) -> BackendResult<Vec<VideoPost>> {
        self.client
            .list_documents::<VideoPost>(
                &self.settings.database_id,
                &self.settings.video_collection_id,
                queries,
            )
            .await
            .map(|list| list.documents)
    }

    pub async fn get_all_posts(&self) -> BackendResult<Vec<VideoPost>> {
        logged("get_all_posts", self.list_posts(&[]).await)
    }

    /// Newest posts first, at most [`LATEST_POSTS_LIMIT`].
    pub async fn get_latest_posts(&self) -> BackendResult<Vec<VideoPost>> {
        logged(
            "get_latest_posts",
            self.list_posts(&[
                Query::order_desc(CREATED_AT),
                Query::limit(LATEST_POSTS_LIMIT),
            ])
            .await,
        )
    }

    /// Full-text match on post titles.
    pub async fn search_posts(&self, query: &str) -> BackendResult<Vec<VideoPost>> {
        logged(
            "search_posts",
            self.list_posts(&[Query::search("title", query)]).await,
        )
    }

    /// Posts created by `user_id`, newest first.
    pub async fn get_user_posts(&self, user_id: &str) -> BackendResult<Vec<VideoPost>> {
        let result = self
            .list_posts(&[Query::equal("creator", user_id), Query::order_desc(CREATED_AT)])
            .await
            .map(|mut posts| {
                let before = posts.len();
                posts.retain(|post| post.creator_id() == Some(user_id));
                if posts.len() != before {
                    tracing::warn!(
                        user_id,
                        dropped = before - posts.len(),
                        "backend returned posts from other creators"
                    );
                }
                posts
            });
        logged("get_user_posts", result)
    }

    /// URL a stored file is served from: the raw view for videos, a
    /// thumbnail rendition for images. No request is made.
    pub fn get_file_preview(&self, file_id: &str, kind: FileKind) -> BackendResult<String> {
        logged("get_file_preview", self.preview_url(file_id, kind))
    }

    fn preview_url(&self, file_id: &str, kind: FileKind) -> BackendResult<String> {
        if file_id.trim().is_empty() {
            return Err(BackendError::invalid_input("Failed to get file preview"));
        }
        match kind {
            FileKind::Video => self
                .client
                .file_view_url(&self.settings.storage_id, file_id),
            FileKind::Image => self.client.file_preview_url(
                &self.settings.storage_id,
                file_id,
                &PreviewOptions::THUMBNAIL,
            ),
        }
    }

    /// Uploads `file` and returns its serving URL; `None` in, `None` out,
    /// without touching storage.
    pub async fn upload_file(
        &self,
        file: Option<&FileUpload>,
        kind: FileKind,
    ) -> BackendResult<Option<String>> {
        let Some(file) = file else {
            return Ok(None);
        };
        logged("upload_file", self.upload_and_resolve(file, kind).await).map(Some)
    }

    async fn upload_and_resolve(&self, file: &FileUpload, kind: FileKind) -> BackendResult<String> {
        let stored = self
            .client
            .create_file(
                &self.settings.storage_id,
                &id::unique_id(),
                file,
                self.settings.upload_chunk_size,
            )
            .await?;
        tracing::debug!(file_id = %stored.id, %kind, size = file.size(), "file uploaded");
        self.preview_url(&stored.id, kind)
    }

    /// Uploads thumbnail and video concurrently, then writes the post.
    ///
    /// The first failed upload fails the whole call and drops the other
    /// upload; the post document is only written once both URLs exist.
    pub async fn create_video(&self, form: &CreateVideoForm) -> BackendResult<VideoPost> {
        logged("create_video", self.create_video_steps(form).await)
    }

    async fn create_video_steps(&self, form: &CreateVideoForm) -> BackendResult<VideoPost> {
        let (thumbnail, video) = tokio::try_join!(
            self.upload_and_resolve(&form.thumbnail, FileKind::Image),
            self.upload_and_resolve(&form.video, FileKind::Video),
        )?;

        let document = NewVideoDocument {
            title: &form.title,
            prompt: &form.prompt,
            thumbnail: &thumbnail,
            video: &video,
            creator: &form.user_id,
        };
        let post: VideoPost = self
            .client
            .create_document(
                &self.settings.database_id,
                &self.settings.video_collection_id,
                &id::unique_id(),
                &document,
            )
            .await?;
        tracing::info!(post_id = %post.id, creator = %form.user_id, "post created");
        Ok(post)
    }
}
