//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use toybox_core::Config;
use toybox_storage::{create_storage, Storage};

/// Build the storage client, logging and propagating any failure.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage client...");

    let storage = create_storage(config).await.map_err(|e| {
        tracing::error!(error = %e, "Storage client initialization failed");
        e
    });

    storage.context("Failed to initialize storage client")
}
