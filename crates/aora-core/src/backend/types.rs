//! Wire types for Appwrite responses.

use serde::{Deserialize, Serialize};

/// Account record behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub expire: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

/// Metadata of a file in a storage bucket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "mimeType")]
    pub mime_type: String,
    #[serde(default, rename = "sizeOriginal")]
    pub size: u64,
    #[serde(default, rename = "chunksUploaded")]
    pub chunks_uploaded: u64,
    #[serde(default, rename = "chunksTotal")]
    pub chunks_total: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateAccountRequest<'a> {
    #[serde(rename = "userId")]
    pub user_id: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDocumentRequest<'a, T> {
    #[serde(rename = "documentId")]
    pub document_id: &'a str,
    pub data: &'a T,
}
