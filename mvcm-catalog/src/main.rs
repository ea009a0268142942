//! mvcm-catalog - Movie catalog web service
//!
//! Zero-config startup: resolves a root folder, creates the SQLite database
//! inside it if missing, seeds sample movies into an empty table and serves
//! the catalog pages.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mvcm_common::config::{self, TomlConfig, ROOT_FOLDER_ENV};
use mvcm_common::db::{init_database, seed_movies};
use mvcm_catalog::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_PORT: u16 = 5780;

/// Command-line arguments for mvcm-catalog
#[derive(Parser, Debug)]
#[command(name = "mvcm-catalog")]
#[command(about = "Movie catalog web service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "MVCM_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, default_value = "127.0.0.1", env = "MVCM_BIND")]
    bind: IpAddr,

    /// Folder holding the database (overrides MVCM_ROOT_FOLDER and config file)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Do not insert sample movies into an empty database
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config file is read before tracing starts because it supplies the
    // default log level; its outcome is logged right after.
    let config_path = config::config_file_path();
    let toml_result = match &config_path {
        Some(path) => TomlConfig::from_path(path).map(Some),
        None => Ok(None),
    };
    let toml_config = toml_result
        .as_ref()
        .ok()
        .cloned()
        .flatten()
        .unwrap_or_default();

    let default_filter = toml_config.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting MvcMovie Catalog (mvcm-catalog) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match (&config_path, &toml_result) {
        (Some(path), Ok(_)) => info!("Loaded config file: {}", path.display()),
        (Some(_), Err(e)) => warn!("Ignoring config file: {}", e),
        (None, _) => info!("No config file found, using defaults"),
    }

    let root_folder =
        config::resolve_root_folder(args.root_folder.as_deref(), ROOT_FOLDER_ENV, &toml_config);
    info!("Root folder: {}", root_folder.display());

    let db_path = config::prepare_root_folder(&root_folder)
        .context("Failed to initialize root folder")?;
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to open database")?;
    info!("✓ Database ready");

    let seed = !args.no_seed && toml_config.seed.unwrap_or(true);
    if seed {
        seed_movies(&pool).await.context("Failed to seed movie table")?;
    }

    let state = AppState::new(pool);
    let app = build_router(state);

    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::new(args.bind, port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("mvcm-catalog listening on http://{}", addr);
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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
