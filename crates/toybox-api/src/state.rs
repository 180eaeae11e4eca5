//! Application state shared by all handlers.

use std::sync::Arc;
use toybox_core::config::UploadConfig;
use toybox_storage::{Storage, TimestampKeys};

/// Built once at startup and injected through axum's `State`. Nothing in it
/// changes after construction except the timestamp key counter.
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub upload: UploadConfig,
    pub timestamps: TimestampKeys,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, upload: UploadConfig) -> Self {
        Self {
            storage,
            upload,
            timestamps: TimestampKeys::new(),
        }
    }
}
