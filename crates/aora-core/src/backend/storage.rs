use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::types::StoredFile;
use super::{AppwriteClient, BackendError, BackendResult};
use crate::models::FileUpload;

/// Image transform applied by the preview endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    pub width: u32,
    pub height: u32,
    /// Crop anchor: `center`, `top`, `bottom`, `left` or `right`.
    pub gravity: &'static str,
    pub quality: u8,
}

impl PreviewOptions {
    /// Transform used for post thumbnails.
    pub const THUMBNAIL: PreviewOptions = PreviewOptions {
        width: 2000,
        height: 2000,
        gravity: "top",
        quality: 100,
    };
}

fn files_path(bucket_id: &str) -> String {
    format!("/storage/buckets/{bucket_id}/files")
}

impl AppwriteClient {
    /// Uploads `upload` as `file_id`. Payloads above `chunk_size` bytes go up
    /// in `Content-Range` chunks; every chunk after the first names the file
    /// created by the first.
    pub async fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        upload: &FileUpload,
        chunk_size: usize,
    ) -> BackendResult<StoredFile> {
        let path = files_path(bucket_id);
        let total = upload.bytes.len();

        if total <= chunk_size || chunk_size == 0 {
            let form = file_form(file_id, upload, upload.bytes.clone())?;
            let stored: StoredFile = self
                .send("file", self.request(Method::POST, &path).multipart(form))
                .await?;
            log_stored(&stored);
            return Ok(stored);
        }

        let mut start = 0;
        let mut stored: Option<StoredFile> = None;
        while start < total {
            let end = (start + chunk_size).min(total);
            let form = file_form(file_id, upload, upload.bytes.slice(start..end))?;
            let mut builder = self
                .request(Method::POST, &path)
                .header("content-range", format!("bytes {}-{}/{}", start, end - 1, total));
            if let Some(previous) = &stored {
                builder = builder.header("x-appwrite-id", &previous.id);
            }
            tracing::debug!(file_id, start, end, total, "uploading chunk");
            let chunk: StoredFile = self.send("file", builder.multipart(form)).await?;
            tracing::debug!(
                file_id = %chunk.id,
                uploaded = chunk.chunks_uploaded,
                of = chunk.chunks_total,
                "chunk accepted"
            );
            stored = Some(chunk);
            start = end;
        }

        let stored =
            stored.ok_or_else(|| BackendError::invalid_input("Cannot upload an empty file"))?;
        log_stored(&stored);
        Ok(stored)
    }

    /// Direct URL of a stored file, untransformed.
    pub fn file_view_url(&self, bucket_id: &str, file_id: &str) -> BackendResult<String> {
        let path = format!("{}/{file_id}/view", files_path(bucket_id));
        self.resource_url(&path, &[])
    }

    /// URL of a resized/cropped rendition of a stored image.
    pub fn file_preview_url(
        &self,
        bucket_id: &str,
        file_id: &str,
        options: &PreviewOptions,
    ) -> BackendResult<String> {
        let path = format!("{}/{file_id}/preview", files_path(bucket_id));
        self.resource_url(
            &path,
            &[
                ("width", options.width.to_string()),
                ("height", options.height.to_string()),
                ("gravity", options.gravity.to_string()),
                ("quality", options.quality.to_string()),
            ],
        )
    }
}

fn log_stored(stored: &StoredFile) {
    tracing::debug!(
        file_id = %stored.id,
        name = %stored.name,
        mime_type = %stored.mime_type,
        size = stored.size,
        "file stored"
    );
}

fn file_form(file_id: &str, upload: &FileUpload, chunk: bytes::Bytes) -> BackendResult<Form> {
    let length = chunk.len() as u64;
    let mut part = Part::stream_with_length(chunk, length).file_name(upload.name.clone());
    if !upload.mime_type.trim().is_empty() {
        part = part.mime_str(&upload.mime_type).map_err(|err| {
            BackendError::invalid_input(format!("Invalid MIME type {}: {err}", upload.mime_type))
        })?;
    }
    Ok(Form::new().text("fileId", file_id.to_string()).part("file", part))
}
