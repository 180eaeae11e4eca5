//! Toybox Core Library
//!
//! Configuration, the storage key strategy and the application error taxonomy
//! shared by the storage and API crates.

pub mod config;
pub mod error;
pub mod key_strategy;

// Re-export commonly used types
pub use config::{Config, CredentialSource, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use key_strategy::KeyStrategy;
