//! Appwrite REST client.
//!
//! One long-lived [`AppwriteClient`] carries the endpoint, project and
//! platform, plus the session credential the service hands out to
//! non-browser clients. Resource-specific calls live in the submodules as
//! extra `impl` blocks.

mod account;
mod avatars;
mod databases;
pub mod error;
pub mod id;
pub mod query;
mod storage;
pub mod types;

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

pub use error::{BackendError, BackendErrorKind, BackendResult};
pub use query::Query;
pub use storage::PreviewOptions;

/// Standard User-Agent header for Aora requests.
pub const USER_AGENT: &str = concat!("aora/", env!("CARGO_PKG_VERSION"));

/// Response format the DTOs in [`types`] are written against.
const RESPONSE_FORMAT: &str = "1.6.0";

/// Header the service uses to hand session cookies to non-browser clients.
const FALLBACK_COOKIES_HEADER: &str = "x-fallback-cookies";

#[derive(Clone)]
pub struct AppwriteClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    platform: String,
    fallback_cookies: Arc<Mutex<Option<String>>>,
}

impl AppwriteClient {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            platform: platform.into(),
            fallback_cookies: Arc::new(Mutex::new(None)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Session credential captured from the last session-creating response.
    pub fn fallback_cookies(&self) -> Option<String> {
        self.fallback_cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Restores (or forgets, with `None`) a session credential.
    pub fn set_fallback_cookies(&self, cookies: Option<String>) {
        *self
            .fallback_cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = cookies;
    }

    /// Origin the project's platform allow-list is checked against.
    fn origin(&self) -> String {
        format!("appwrite-{}://{}", std::env::consts::OS, self.platform)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.endpoint, path);
        let mut builder = self
            .http
            .request(method, url)
            .header("user-agent", USER_AGENT)
            .header("x-appwrite-project", &self.project_id)
            .header("x-appwrite-response-format", RESPONSE_FORMAT)
            .header("origin", self.origin());
        if let Some(cookies) = self.fallback_cookies() {
            builder = builder.header(FALLBACK_COOKIES_HEADER, cookies);
        }
        builder
    }

    async fn execute(&self, builder: RequestBuilder) -> BackendResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|err| BackendError::transport(&err))?;

        if let Some(cookies) = response
            .headers()
            .get(FALLBACK_COOKIES_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
        {
            self.set_fallback_cookies(Some(cookies.to_string()));
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::http_status(status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, what: &str, builder: RequestBuilder) -> BackendResult<T> {
        let response = self.execute(builder).await?;
        response
            .json()
            .await
            .map_err(|err| BackendError::parse(what, err))
    }

    async fn send_empty(&self, builder: RequestBuilder) -> BackendResult<()> {
        self.execute(builder).await.map(|_| ())
    }

    /// Builds a direct resource URL (no request is made). The project id
    /// rides along as a query parameter since the URL is fetched without
    /// our headers.
    fn resource_url(&self, path: &str, params: &[(&str, String)]) -> BackendResult<String> {
        let mut url = url::Url::parse(&format!("{}{}", self.endpoint, path)).map_err(|err| {
            BackendError::invalid_input(format!("Invalid resource URL for {path}: {err}"))
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("project", &self.project_id);
        }
        Ok(url.to_string())
    }
}
