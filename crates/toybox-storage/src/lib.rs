//! Toybox Storage Library
//!
//! This crate provides the storage abstraction used by the upload path and its
//! S3-compatible implementation.
//!
//! # Storage key format
//!
//! Keys are flat object names with no path separators: either
//! `{unix_nanos}{extension}` or the validated client filename. Key generation
//! is centralized in the `keys` module.

pub mod factory;
pub mod keys;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{derive_storage_key, validate_filename_key, TimestampKeys};
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
