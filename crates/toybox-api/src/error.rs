//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every error renders as its status
//! code plus a fixed plain-text message; internal detail only reaches the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use toybox_core::{AppError, ErrorMetadata, LogLevel};
use toybox_storage::StorageError;

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: neither the trait nor AppError are local to this crate)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::UploadFailed(msg) => AppError::Upload(msg),
            StorageError::PresignFailed(msg) => AppError::Presign(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidFileName(msg),
            StorageError::DeleteFailed(msg) => AppError::Internal(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type = error_type,
                code = error.error_code(),
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, app_error.client_message()).into_response()
    }
}
