//! darkroom server binary.

use anyhow::{Context, Result};
use clap::Parser;
use darkroom_codec::{ImageCodec, ImageRsCodec};
use darkroom_core::config::AppConfig;
use darkroom_server::{AppState, create_router};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// darkroom - an image delivery gateway
#[derive(Parser, Debug)]
#[command(name = "darkroomd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "DARKROOM_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("darkroom v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    // Check for DARKROOM_ environment variables (excluding DARKROOM_CONFIG which is just the path)
    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("DARKROOM_") && key != "DARKROOM_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: darkroomd --config /path/to/config.toml\n  \
             2. Environment variables: DARKROOM_SERVER__BIND=0.0.0.0:8080 \
             DARKROOM_STORAGE__TYPE=filesystem DARKROOM_STORAGE__PATH=/srv/images darkroomd\n\n\
             Set DARKROOM_CONFIG to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("DARKROOM_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Initialize origin storage
    let storage = darkroom_storage::from_config(&config.storage)
        .await
        .context("failed to initialize storage")?;
    tracing::info!(backend = storage.backend_name(), "Origin storage initialized");

    // Verify storage connectivity before accepting requests.
    storage
        .health_check()
        .await
        .context("storage health check failed")?;
    tracing::info!("Origin storage connectivity verified");

    // Initialize edge cache
    let cache = darkroom_cache::from_config(&config.cache);
    tracing::info!(backend = cache.backend_name(), "Edge cache initialized");

    // Initialize codec
    let codec: Arc<dyn ImageCodec> = Arc::new(ImageRsCodec::new());
    tracing::info!(codec = codec.codec_name(), "Codec initialized");

    // Create application state
    let state = AppState::new(config.clone(), storage, cache, codec);

    // Create router
    let app = create_router(state.clone());

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    tracing::info!(policy = ?config.server.negotiation, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let in-flight cache writes finish before teardown.
    state.background.close();
    state.background.wait().await;

    Ok(())
}

/// Resolve when the process receives a shutdown signal.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
