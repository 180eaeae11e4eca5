//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use std::sync::Arc;
use toybox_core::{Config, LogFormat};

/// Load configuration from the environment (and `.env`).
pub fn load_config() -> Result<Config> {
    report_config_error(Config::from_env())
}

/// Log a rejected configuration through tracing before it aborts startup.
///
/// The configured log format is unknown at this point, so the pretty format
/// is installed.
fn report_config_error(config: Result<Config>) -> Result<Config> {
    config.map_err(|e| {
        // An already installed subscriber is fine.
        crate::telemetry::init_telemetry(LogFormat::Pretty).ok();
        tracing::error!(error = %e, "Invalid configuration");
        e.context("Failed to load configuration")
    })
}

/// Initialize the entire application: tracing, storage client, state, routes.
///
/// Any error here is fatal; the service never starts without a storage client.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        key_strategy = %config.key_strategy(),
        max_upload_bytes = ?config.max_upload_bytes(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(storage, config.upload.clone()));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
