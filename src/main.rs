//! Live TV Gateway
//!
//! Serves a statically configured catalog of live channels, relays
//! allow-listed upstream HLS streams with permissive CORS, and probes
//! stream health with bounded retries.

mod allowlist;
mod catalog;
mod config;
mod config_file;
mod error;
mod http;
mod metrics;
mod probe;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::config_file::ConfigFile;
use crate::error::{GatewayError, Result};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "livetv-gateway";

#[derive(Parser, Debug)]
#[command(name = "livetv-gateway")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the listen address from the config file.
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Write a default configuration file to the given path and exit.
    #[arg(long, value_name = "PATH")]
    generate_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = args.generate_config.as_deref() {
        config_file::generate_default_config(path)
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    // Load configuration; logging is initialized with the configured level,
    // so load errors are reported right after.
    let loaded = if args.config.exists() {
        Some(ConfigFile::from_file(&args.config))
    } else {
        None
    };
    let (config, catalog, load_error) = match loaded {
        Some(Ok(file)) => {
            let (config, catalog) = file.into_parts();
            (config, catalog, None)
        }
        Some(Err(e)) => (
            ServerConfig::default(),
            Catalog::default_catalog(),
            Some(e.to_string()),
        ),
        None => (ServerConfig::default(), Catalog::default_catalog(), None),
    };

    init_logging(&config.log_level);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if let Some(e) = load_error {
        tracing::warn!(
            "Failed to load config file {}: {}. Using defaults.",
            args.config.display(),
            e
        );
    }
    tracing::info!(
        "Catalog: {} categories, allow-list: {} domains",
        catalog.len(),
        config.proxy.allowed_domains.len()
    );

    let addr: SocketAddr = match args.bind {
        Some(bind) => bind,
        None => config
            .socket_addr()
            .parse()
            .map_err(|e| GatewayError::Config(format!("invalid listen address: {}", e)))?,
    };

    // Create application state
    let state = Arc::new(AppState::new(config, catalog));

    // Build router
    let app = create_router(state);

    // Start server
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging with tracing
fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("livetv_gateway={},tower_http={}", level, level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
