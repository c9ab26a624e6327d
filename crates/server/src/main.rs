use anyhow::Context;
use clap::Parser;
use seoscope_core::{Auditor, FetchConfig};
use seoscope_server::{AppState, ServerConfig, cors_layer, notifier_from_config, router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    let filter = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let auditor = Auditor::new(FetchConfig { timeout: config.fetch_timeout, ..Default::default() });
    let notifier = notifier_from_config(&config.notifier);
    let state = AppState::new(auditor, notifier);

    if config.allowed_origins.is_empty() {
        tracing::warn!("no allowed origins configured, CORS accepts any origin");
    }
    let app = router(state, cors_layer(&config.allowed_origins));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Starting seoscope server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
