//! Post listing command handlers.

use anyhow::{Context, Result};
use aora_core::{Aora, VideoPost};
use chrono::{DateTime, Local};
use comfy_table::{ContentArrangement, Table};

use crate::cli::PostsCommands;

pub async fn list(aora: &Aora, command: &PostsCommands, json: bool) -> Result<()> {
    let posts = match command {
        PostsCommands::All => aora.get_all_posts().await.context("list posts")?,
        PostsCommands::Latest => aora.get_latest_posts().await.context("list latest posts")?,
        PostsCommands::Search { query } => aora
            .search_posts(query)
            .await
            .with_context(|| format!("search posts for '{query}'"))?,
        PostsCommands::User { user_id } => aora
            .get_user_posts(user_id)
            .await
            .with_context(|| format!("list posts of '{user_id}'"))?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else if posts.is_empty() {
        println!("No videos found.");
    } else {
        println!("{}", table(&posts));
    }
    Ok(())
}

fn table(posts: &[VideoPost]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", "Creator", "Created", "Id"]);
    for post in posts {
        let creator = post
            .creator
            .as_ref()
            .map(|c| c.username().unwrap_or(c.id()).to_string())
            .unwrap_or_default();
        table.add_row(vec![
            post.title.clone(),
            creator,
            post.created_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
            post.id.clone(),
        ]);
    }
    table
}

/// Local-time rendering of a backend timestamp; unparseable input is shown
/// as-is.
fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}
