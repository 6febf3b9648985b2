//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod posts;
pub mod preview;
pub mod upload;

use anyhow::{Context, Result};
use aora_core::config::{Config, paths};
use aora_core::{Aora, credentials};

/// Builds the backend handle and restores any saved session.
pub fn connect(config: &Config) -> Result<Aora> {
    let aora = Aora::from_config(config).context("configure backend")?;
    let session_path = paths::session_path();
    let restored = credentials::load(&session_path, aora.client())
        .with_context(|| format!("load session from {}", session_path.display()))?;
    tracing::debug!(restored, endpoint = aora.client().endpoint(), "backend ready");
    Ok(aora)
}

/// Saves the session credential the last call left on the client.
pub fn persist(aora: &Aora) -> Result<()> {
    let session_path = paths::session_path();
    credentials::save(&session_path, aora.client())
        .with_context(|| format!("save session to {}", session_path.display()))
}
