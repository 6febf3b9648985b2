//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use aora_core::config::{self, Config};
use aora_core::logging;
use clap::Parser;

use crate::modes;

mod commands;

#[derive(Parser)]
#[command(name = "aora")]
#[command(version)]
#[command(about = "Terminal client for the Aora video-sharing app")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Create an account and sign in
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AORA_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        username: String,
    },

    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AORA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the current session
    SignOut,

    /// Show the signed-in user
    Whoami {
        /// Print the raw profile document
        #[arg(long)]
        json: bool,
    },

    /// Browse video posts
    Posts {
        /// Print raw documents instead of a table
        #[arg(long, global = true)]
        json: bool,

        #[command(subcommand)]
        command: PostsCommands,
    },

    /// Upload a thumbnail and a video and publish a post
    Upload {
        #[arg(long)]
        title: String,
        /// The AI prompt behind the video
        #[arg(long)]
        prompt: String,
        /// Image file for the thumbnail
        #[arg(long, value_name = "PATH")]
        thumbnail: PathBuf,
        /// Video file
        #[arg(long, value_name = "PATH")]
        video: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Print the URL a stored file is served from
    Preview {
        #[arg(value_name = "FILE_ID")]
        file_id: String,
        /// image or video
        #[arg(long, default_value = "image")]
        kind: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

#[derive(clap::Subcommand)]
pub(crate) enum PostsCommands {
    /// Every post
    All,
    /// The newest posts
    Latest,
    /// Posts whose title matches a query
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Posts created by a user
    User {
        #[arg(value_name = "USER_ID")]
        user_id: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // config commands must work even when the file is broken
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let config = Config::load().context("load config")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    // default to the interactive client
    let Some(command) = cli.command else {
        let _guard = logging::init_file(&config.log_file(), &config.log_filter())
            .context("init log file")?;
        let aora = commands::connect(&config)?;
        let _enter = rt.enter();
        return modes::run_tui(aora, config::paths::session_path());
    };

    logging::init_stderr(&config.log_filter());
    rt.block_on(async move { dispatch(command, &config).await })
}

async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    let aora = commands::connect(config)?;

    match command {
        // handled in `run` before the config is loaded
        Commands::Config { .. } => Ok(()),

        Commands::SignUp {
            email,
            password,
            username,
        } => commands::auth::sign_up(&aora, &email, &password, &username).await,
        Commands::SignIn { email, password } => {
            commands::auth::sign_in(&aora, &email, &password).await
        }
        Commands::SignOut => commands::auth::sign_out(&aora).await,
        Commands::Whoami { json } => commands::auth::whoami(&aora, json).await,

        Commands::Posts { json, command } => commands::posts::list(&aora, &command, json).await,

        Commands::Upload {
            title,
            prompt,
            thumbnail,
            video,
            json,
        } => {
            commands::upload::run(commands::upload::UploadOptions {
                aora: &aora,
                title: &title,
                prompt: &prompt,
                thumbnail: &thumbnail,
                video: &video,
                json,
            })
            .await
        }

        Commands::Preview { file_id, kind } => commands::preview::run(&aora, &file_id, &kind),
    }
}
