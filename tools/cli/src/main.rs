//! drive-index CLI - serve and inspect a scoped view of a cloud drive.
//!
//! This tool runs the HTTP server and offers one-shot versions of its two
//! operations for debugging a deployment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::StatusCode;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use driveindex_common::{AccessToken, SiteConfig};
use driveindex_scope::{PreviewRequest, Resolution};
use driveindex_server::{ApiError, AppState};
use driveindex_storage::{GraphClient, StaticTokenProvider};

#[derive(Parser)]
#[command(name = "driveindex")]
#[command(about = "drive-index - expose one folder of a cloud drive")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve {
        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Listen address, overriding the configuration.
        #[arg(short, long)]
        bind: Option<String>,

        /// Upstream access token (default: $DRIVEINDEX_ACCESS_TOKEN).
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Resolve one item ID and print the status and response body.
    Resolve {
        /// Item ID.
        id: String,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Upstream access token (default: $DRIVEINDEX_ACCESS_TOKEN).
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Print the renderer arguments for a preview.
    PreviewUrl {
        /// Browsed path, e.g. /Reports/file.docx.
        path: String,

        /// Protected-route token to embed.
        #[arg(short, long)]
        token: Option<String>,

        /// Measured container width in pixels.
        #[arg(short, long)]
        width: Option<u32>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            config,
            bind,
            token,
        } => cmd_serve(config, bind, token).await,

        Commands::Resolve { id, config, token } => cmd_resolve(&id, config, token).await,

        Commands::PreviewUrl {
            path,
            token,
            width,
            config,
        } => cmd_preview_url(&path, token, width, config),
    }
}

/// Load configuration from `path`, or use defaults.
fn load_config(path: Option<PathBuf>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => SiteConfig::default()
            .validated()
            .context("Invalid default config"),
    }
}

/// Token from the flag, falling back to the environment.
fn token_provider(token: Option<String>) -> Result<StaticTokenProvider> {
    match token {
        Some(token) => Ok(StaticTokenProvider::new(AccessToken::new(token))),
        None => StaticTokenProvider::from_env().context("No upstream access token"),
    }
}

/// Build application state against the Graph API.
fn build_state(config: SiteConfig, token: Option<String>) -> Result<AppState> {
    let client = GraphClient::new(&config.drive_api).context("Failed to create Graph client")?;
    let tokens = token_provider(token)?;

    AppState::new(Arc::new(config), Arc::new(client), Arc::new(tokens))
        .context("Failed to build server state")
}

/// Run the server.
async fn cmd_serve(
    config: Option<PathBuf>,
    bind: Option<String>,
    token: Option<String>,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(bind) = bind {
        config.bind = bind;
    }
    let addr = config.bind.clone();

    info!(
        "Exposing {:?} from {}",
        if config.base_directory.is_empty() {
            "/"
        } else {
            config.base_directory.as_str()
        },
        config.drive_api
    );

    let state = build_state(config, token)?;
    driveindex_server::serve(state, &addr)
        .await
        .with_context(|| format!("Server on {} failed", addr))
}

/// Status and pretty-printed body, as `GET /api/item` would answer.
fn render_resolution(
    result: driveindex_common::Result<Resolution>,
) -> Result<(StatusCode, String)> {
    let (status, body) = match result {
        Ok(resolution) => (StatusCode::OK, serde_json::to_value(&resolution)?),
        Err(err) => {
            let err = ApiError::from(err);
            (err.status_code(), err.body())
        }
    };
    Ok((status, serde_json::to_string_pretty(&body)?))
}

/// Resolve one ID. Exits non-zero unless the answer is a success.
async fn cmd_resolve(id: &str, config: Option<PathBuf>, token: Option<String>) -> Result<()> {
    let state = build_state(load_config(config)?, token)?;
    let (status, body) = render_resolution(state.resolver.resolve(id).await)?;

    println!("{}", status);
    println!("{}", body);

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Preview request from CLI arguments. An empty token counts as none.
fn preview_request(path: &str, token: Option<String>, width: Option<u32>) -> PreviewRequest {
    let token = token.filter(|t| !t.is_empty()).map(AccessToken::new);
    PreviewRequest::new(path, token, width)
}

/// Print the renderer embed.
fn cmd_preview_url(
    path: &str,
    token: Option<String>,
    width: Option<u32>,
    config: Option<PathBuf>,
) -> Result<()> {
    let embed = preview_request(path, token, width).embed(&load_config(config)?);

    println!("url:      {}", embed.url);
    println!("width:    {}", embed.width);
    println!("height:   {}", embed.height);
    println!("download: {}", embed.download_url);

    Ok(())
}
