use crate::{S3Storage, Storage, StorageError, StorageResult};
use std::sync::Arc;
use toybox_core::Config;

/// Create the storage backend from configuration.
///
/// Fails on invalid storage settings or unresolvable credentials; callers are
/// expected to abort startup on error.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    config
        .validate()
        .map_err(|e| StorageError::ConfigError(e.to_string()))?;

    let storage = S3Storage::new(&config.storage).await?;

    tracing::info!(
        bucket = %config.storage.bucket,
        region = %config.storage.region,
        endpoint = %storage.endpoint_url(),
        credentials = ?config.storage.credentials,
        "S3 client initialized (path-style addressing)"
    );

    Ok(Arc::new(storage))
}
