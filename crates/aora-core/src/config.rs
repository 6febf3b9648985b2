//! Configuration management for Aora.
//!
//! Loads configuration from ${AORA_HOME}/config.toml with defaults matching
//! the hosted project the app ships against.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the backend endpoint.
pub const ENDPOINT_ENV: &str = "AORA_ENDPOINT";
/// Environment variable overriding the project id.
pub const PROJECT_ID_ENV: &str = "AORA_PROJECT_ID";
/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "AORA_LOG";

/// Appwrite chunk size used by the official SDKs.
pub const DEFAULT_UPLOAD_CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Backend connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub platform: String,
    pub project_id: String,
    pub database_id: String,
    pub user_collection_id: String,
    pub video_collection_id: String,
    pub storage_id: String,
    pub upload_chunk_size: usize,
}

impl Default for AppwriteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            platform: "com.jsm.aora".to_string(),
            project_id: "6711ce0f0034281762d0".to_string(),
            database_id: "6711cf1a00243a740721".to_string(),
            user_collection_id: "6711cf2d000e80a05101".to_string(),
            video_collection_id: "6711cf4800064a65d8a2".to_string(),
            storage_id: "6711d0850031ecf03439".to_string(),
            upload_chunk_size: DEFAULT_UPLOAD_CHUNK_SIZE,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing `EnvFilter` directive.
    pub filter: String,
    /// Log file for the interactive UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appwrite: AppwriteConfig,
    pub log: LogConfig,
}

fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Aora configuration and state files.
    //!
    //! AORA_HOME resolution order:
    //! 1. AORA_HOME environment variable (if set)
    //! 2. ~/.config/aora (default)

    use std::path::PathBuf;

    pub fn aora_home() -> PathBuf {
        if let Ok(home) = std::env::var("AORA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".aora"),
            |h| h.join(".config").join("aora"),
        )
    }

    pub fn config_path() -> PathBuf {
        aora_home().join("config.toml")
    }

    /// Where the backend session credential is kept between runs.
    pub fn session_path() -> PathBuf {
        aora_home().join("session.json")
    }

    pub fn log_path() -> PathBuf {
        aora_home().join("aora.log")
    }
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Backend endpoint with precedence: env > config.
    ///
    /// # Errors
    /// Returns an error if the resolved endpoint is not a valid URL.
    pub fn endpoint(&self) -> Result<String> {
        resolve_endpoint(
            std::env::var(ENDPOINT_ENV).ok().as_deref(),
            &self.appwrite.endpoint,
        )
    }

    /// Project id with precedence: env > config.
    pub fn project_id(&self) -> String {
        non_empty(std::env::var(PROJECT_ID_ENV).ok().as_deref())
            .unwrap_or_else(|| self.appwrite.project_id.clone())
    }

    /// Filter directive with precedence: env > config.
    pub fn log_filter(&self) -> String {
        non_empty(std::env::var(LOG_ENV).ok().as_deref())
            .unwrap_or_else(|| self.log.filter.clone())
    }

    pub fn log_file(&self) -> PathBuf {
        self.log
            .file
            .as_deref()
            .map_or_else(paths::log_path, PathBuf::from)
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Picks the env endpoint over the configured one and validates it.
///
/// # Errors
/// Returns an error if the chosen endpoint does not parse as a URL.
pub fn resolve_endpoint(env_value: Option<&str>, config_value: &str) -> Result<String> {
    let endpoint = non_empty(env_value).unwrap_or_else(|| config_value.trim().to_string());
    url::Url::parse(&endpoint).with_context(|| format!("Invalid backend endpoint: {endpoint}"))?;
    Ok(endpoint.trim_end_matches('/').to_string())
}
