//! streamify-ui - Streamify+ web music player
//!
//! Serves a single-page player over HTTP: current song, transport controls,
//! playlist selector and song listing. The catalog and playlists are loaded
//! once at startup; a load failure aborts startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use streamify_common::config::{resolve_root_folder, LibraryPaths, TomlConfig};
use streamify_common::Library;
use streamify_ui::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for streamify-ui
#[derive(Parser, Debug)]
#[command(name = "streamify-ui")]
#[command(about = "Streamify+ web music player")]
#[command(version)]
struct Args {
    /// Root folder holding metadata.json, playlists/, music/ and album_art/
    #[arg(short, long, env = "STREAMIFY_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "STREAMIFY_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Explicit config file instead of the platform default
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TomlConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TomlConfig::load_or_default(),
    };

    // Initialize tracing
    let default_filter = format!(
        "streamify_ui={0},streamify_common={0},tower_http={0}",
        config.logging.level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Streamify+ (streamify-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    info!("Root folder: {}", root_folder.display());

    // Without a catalog there is nothing to serve
    let library = match Library::load(LibraryPaths::new(root_folder)) {
        Ok(library) => library,
        Err(e) => {
            error!("Failed to load library: {}", e);
            return Err(e).context("Failed to load catalog and playlists");
        }
    };

    let app = build_router(AppState::new(library));

    let bind = args.bind.unwrap_or(config.bind);
    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("streamify-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
