//! Error types module
//!
//! All request-path failures are unified under [`AppError`]. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`], so the HTTP
//! layer never decides status codes or client messages by itself.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed client input
    Debug,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message. Never contains internal detail.
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed multipart form: {0}")]
    MalformedForm(String),

    #[error("Missing file: {0}")]
    MissingFile(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Presign failed: {0}")]
    Presign(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::MalformedForm(_) => (400, "MALFORMED_FORM", LogLevel::Debug),
        AppError::MissingFile(_) => (400, "MISSING_FILE", LogLevel::Debug),
        AppError::InvalidFileName(_) => (400, "INVALID_FILE_NAME", LogLevel::Debug),
        AppError::Upload(_) => (500, "UPLOAD_FAILED", LogLevel::Error),
        AppError::Presign(_) => (500, "PRESIGN_FAILED", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &str {
        match self {
            AppError::MalformedForm(_) => "MalformedForm",
            AppError::MissingFile(_) => "MissingFile",
            AppError::InvalidFileName(_) => "InvalidFileName",
            AppError::Upload(_) => "Upload",
            AppError::Presign(_) => "Presign",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MalformedForm(_) => "Failed to parse form".to_string(),
            AppError::MissingFile(_) => "Failed to get file from form".to_string(),
            AppError::InvalidFileName(_) => "Invalid file name".to_string(),
            AppError::Upload(_) => "Failed to upload file".to_string(),
            AppError::Presign(_) => "Failed to generate presigned URL".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}
