//! walkin-server binary

use anyhow::Context;
use walkin_server::config::SheetBackendKind;
use walkin_server::{AppState, Config, build_app, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    let _log_guard = logger::init_logger(config.log_json, config.log_dir.as_deref());

    tracing::info!(
        "Starting walkin-server (env: {}, backend: {:?})",
        config.environment,
        config.backend
    );

    if config.is_production() && config.backend == SheetBackendKind::Memory {
        tracing::warn!("In-memory sheet backend selected in production");
    }

    let port = config.port;
    let state = AppState::new(config).context("failed to initialize sheet backend")?;

    if let Err(e) = state.walkin.test_connection().await {
        let err: shared::AppError = e.into();
        tracing::warn!("Spreadsheet not reachable at startup: {err}");
    }

    let app = build_app(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("walkin-server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("walkin-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
