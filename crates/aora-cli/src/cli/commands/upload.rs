//! Upload command handler.

use std::path::Path;

use anyhow::{Context, Result};
use aora_core::{Aora, CreateVideoForm, FileUpload};

pub struct UploadOptions<'a> {
    pub aora: &'a Aora,
    pub title: &'a str,
    pub prompt: &'a str,
    pub thumbnail: &'a Path,
    pub video: &'a Path,
    pub json: bool,
}

pub async fn run(options: UploadOptions<'_>) -> Result<()> {
    let UploadOptions {
        aora,
        title,
        prompt,
        thumbnail,
        video,
        json,
    } = options;

    if title.trim().is_empty() || prompt.trim().is_empty() {
        anyhow::bail!("Please fill in all fields");
    }
    let thumbnail = FileUpload::from_path(thumbnail)?;
    let video = FileUpload::from_path(video)?;

    let user = aora
        .get_current_user()
        .await
        .context("resolve the signed-in user (run `aora sign-in` first)")?;

    let form = CreateVideoForm {
        title: title.to_string(),
        prompt: prompt.to_string(),
        thumbnail,
        video,
        user_id: user.id,
    };
    let post = aora.create_video(&form).await.context("upload video")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        println!("Post uploaded successfully");
        println!("id:        {}", post.id);
        println!("thumbnail: {}", post.thumbnail);
        println!("video:     {}", post.video);
    }
    Ok(())
}
