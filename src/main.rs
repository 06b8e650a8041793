use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;

use prana::api::{create_router, AppState};
use prana::{Config, PosePipeline};

/// Yoga pose coaching and wellness API server.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// TOML configuration file, `prana.toml` when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides `server.port`
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    prana::logging::init();
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let pipeline = PosePipeline::from_config(&config).context("failed to load pose models")?;
    let state = AppState::new(
        Arc::new(pipeline),
        Duration::from_secs(config.server.inference_timeout_secs),
        config.server.max_tracked_users,
    );
    let app = create_router(state, config.server.max_body_bytes);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
