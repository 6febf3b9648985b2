//! Persisted session credential.
//!
//! The backend hands non-browser clients their session cookie in a header;
//! the client replays it on each call. Saving it lets a session outlive the
//! process, the way the mobile SDK keeps it in device storage. The file is
//! tied to the endpoint and project it was issued for.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backend::AppwriteClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredCredential {
    endpoint: String,
    project_id: String,
    fallback_cookies: String,
}

/// Restores a saved credential into `client`.
///
/// Returns `false` when there is no file or it belongs to another
/// endpoint/project. A file that does not parse is removed and treated as
/// absent.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or removed.
pub fn load(path: &Path, client: &AppwriteClient) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session from {}", path.display()))?;
    let stored: StoredCredential = match serde_json::from_str(&contents) {
        Ok(stored) => stored,
        Err(err) => {
            tracing::warn!(path = %path.display(), "discarding unreadable session: {err}");
            clear(path)?;
            return Ok(false);
        }
    };

    if stored.endpoint != client.endpoint() || stored.project_id != client.project_id() {
        tracing::debug!(path = %path.display(), "ignoring session saved for another project");
        return Ok(false);
    }
    client.set_fallback_cookies(Some(stored.fallback_cookies));
    Ok(true)
}

/// Writes the client's current credential, or removes the file when the
/// client holds none.
///
/// # Errors
/// Returns an error if the file cannot be written or removed.
pub fn save(path: &Path, client: &AppwriteClient) -> Result<()> {
    let Some(fallback_cookies) = client.fallback_cookies() else {
        return clear(path);
    };
    let stored = StoredCredential {
        endpoint: client.endpoint().to_string(),
        project_id: client.project_id().to_string(),
        fallback_cookies,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&stored).context("Failed to serialize session")?;
    let mut file = open_private(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write session to {}", path.display()))?;
    // An existing file keeps its mode on open.
    restrict_permissions(path)
}

/// Removes a saved credential. Missing files are fine.
///
/// # Errors
/// Returns an error if an existing file cannot be removed.
pub fn clear(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove session at {}", path.display()))?;
    }
    Ok(())
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn client() -> AppwriteClient {
        AppwriteClient::new("http://localhost/v1", "proj", "com.jsm.aora")
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let source = client();
        source.set_fallback_cookies(Some("cookie".to_string()));
        save(&path, &source).unwrap();

        let target = client();
        assert!(load(&path, &target).unwrap());
        assert_eq!(target.fallback_cookies().as_deref(), Some("cookie"));
    }

    #[test]
    fn test_load_missing_is_false() {
        let dir = tempdir().unwrap();
        assert!(!load(&dir.path().join("session.json"), &client()).unwrap());
    }

    #[test]
    fn test_load_ignores_other_project() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let source = AppwriteClient::new("http://localhost/v1", "other", "com.jsm.aora");
        source.set_fallback_cookies(Some("cookie".to_string()));
        save(&path, &source).unwrap();

        let target = client();
        assert!(!load(&path, &target).unwrap());
        assert_eq!(target.fallback_cookies(), None);
    }

    #[test]
    fn test_load_discards_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ truncated").unwrap();

        let target = client();
        assert!(!load(&path, &target).unwrap());
        assert_eq!(target.fallback_cookies(), None);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let source = client();
        source.set_fallback_cookies(Some("cookie".to_string()));
        save(&path, &source).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(fs::read_to_string(&path).unwrap().contains("cookie"));
    }

    #[test]
    fn test_save_without_credential_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{}").unwrap();

        save(&path, &client()).unwrap();
        assert!(!path.exists());
    }
}
