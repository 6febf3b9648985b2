//! Domain records mirrored from the backend collections.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::backend::BackendError;

/// A user profile document (users collection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "$id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
}

/// A post's creator: the relationship comes back expanded or as a bare id
/// depending on how the collection is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Creator {
    Expanded(UserProfile),
    Id(String),
}

impl Creator {
    pub fn id(&self) -> &str {
        match self {
            Creator::Expanded(user) => &user.id,
            Creator::Id(id) => id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Creator::Expanded(user) => Some(&user.username),
            Creator::Id(_) => None,
        }
    }
}

/// A video post document (videos collection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPost {
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub prompt: String,
    pub video: String,
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default, rename = "$createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, rename = "$updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl VideoPost {
    pub fn creator_id(&self) -> Option<&str> {
        self.creator.as_ref().map(Creator::id)
    }
}

/// Document body written when a user signs up.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewUserDocument<'a> {
    #[serde(rename = "accountId")]
    pub account_id: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub avatar: &'a str,
}

/// Document body written when a post is created.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewVideoDocument<'a> {
    pub title: &'a str,
    pub prompt: &'a str,
    pub thumbnail: &'a str,
    pub video: &'a str,
    pub creator: &'a str,
}

/// How an uploaded file is served back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Image => write!(f, "image"),
            FileKind::Video => write!(f, "video"),
        }
    }
}

impl FromStr for FileKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(FileKind::Image),
            "video" => Ok(FileKind::Video),
            _ => Err(BackendError::invalid_input(format!(
                "Invalid file type: {s}"
            ))),
        }
    }
}

/// A local file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk. The MIME type is sniffed from content, then
    /// guessed from the extension; unknown types upload without one.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .or_else(|| mime_type_for_extension(path))
            .unwrap_or_default()
            .to_string();
        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// MIME type inferred from file extension for the media types the app posts.
pub fn mime_type_for_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str())?;

    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "mp4" => Some("video/mp4"),
        "mov" => Some("video/quicktime"),
        "webm" => Some("video/webm"),
        _ => None,
    }
}

/// Input of the upload flow.
#[derive(Debug, Clone)]
pub struct CreateVideoForm {
    pub title: String,
    pub prompt: String,
    pub thumbnail: FileUpload,
    pub video: FileUpload,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_post_with_expanded_creator() {
        let post: VideoPost = serde_json::from_str(
            r#"{"$id":"v1","title":"T","thumbnail":"th","prompt":"p","video":"vi",
                "$createdAt":"2024-10-18T10:00:00.000+00:00",
                "creator":{"$id":"u1","username":"jane","email":"j@x.io","avatar":"a","accountId":"acc1"}}"#,
        )
        .unwrap();
        assert_eq!(post.creator_id(), Some("u1"));
        assert_eq!(post.creator.as_ref().and_then(Creator::username), Some("jane"));
        assert!(post.created_at.is_some());
        assert_eq!(post.updated_at, None);
    }

    #[test]
    fn test_post_with_creator_id() {
        let post: VideoPost = serde_json::from_str(
            r#"{"$id":"v1","title":"T","thumbnail":"th","prompt":"p","video":"vi","creator":"u9"}"#,
        )
        .unwrap();
        assert_eq!(post.creator_id(), Some("u9"));
        assert_eq!(post.creator.as_ref().and_then(Creator::username), None);
    }

    #[test]
    fn test_file_kind_parse() {
        assert_eq!("image".parse::<FileKind>().unwrap(), FileKind::Image);
        assert_eq!("Video".parse::<FileKind>().unwrap(), FileKind::Video);

        let err = "bogus".parse::<FileKind>().unwrap_err();
        assert_eq!(err.kind, crate::backend::BackendErrorKind::InvalidInput);
        assert!(err.message.contains("Invalid file type"));
    }

    #[test]
    fn test_from_path_sniffs_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("thumb.bin");
        let png_header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        std::fs::write(&path, png_header).unwrap();

        let upload = FileUpload::from_path(&path).unwrap();
        assert_eq!(upload.name, "thumb.bin");
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!(upload.size(), png_header.len());
    }

    #[test]
    fn test_from_path_falls_back_to_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.mov");
        std::fs::write(&path, b"not really a movie").unwrap();

        let upload = FileUpload::from_path(&path).unwrap();
        assert_eq!(upload.mime_type, "video/quicktime");
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(FileUpload::from_path(Path::new("/definitely/not/here.mp4")).is_err());
    }
}
