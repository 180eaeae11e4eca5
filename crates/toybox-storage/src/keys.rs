//! Storage key derivation for uploaded files.
//!
//! Key format: `{unix_nanos}{extension}` for [`KeyStrategy::Timestamp`], or the
//! client filename for [`KeyStrategy::Filename`]. Neither form ever contains a
//! `/`.

use crate::traits::{StorageError, StorageResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use toybox_core::KeyStrategy;

/// S3 rejects keys longer than this many bytes.
const MAX_KEY_BYTES: usize = 1024;
/// Decimal digits of `u64::MAX`.
const MAX_NANOS_DIGITS: usize = 20;

/// Issues nanosecond timestamps that are unique within the process.
///
/// When two uploads land on the same clock reading, or the clock steps
/// backwards, the later one gets `last + 1`.
#[derive(Debug, Default)]
pub struct TimestampKeys {
    last: AtomicU64,
}

impl TimestampKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_nanos(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

/// Derive the storage key for an uploaded file.
pub fn derive_storage_key(
    strategy: KeyStrategy,
    filename: &str,
    timestamps: &TimestampKeys,
) -> StorageResult<String> {
    match strategy {
        KeyStrategy::Timestamp => Ok(format!(
            "{}{}",
            timestamps.next_nanos(),
            key_extension(filename).unwrap_or("")
        )),
        KeyStrategy::Filename => {
            validate_filename_key(filename)?;
            Ok(filename.to_string())
        }
    }
}

/// Reject filenames that are unsafe to reuse verbatim as object keys.
pub fn validate_filename_key(filename: &str) -> StorageResult<()> {
    if filename.is_empty() {
        return Err(StorageError::InvalidKey("filename is empty".to_string()));
    }
    if filename == "." || filename == ".." {
        return Err(StorageError::InvalidKey(format!(
            "'{}' is not a valid object name",
            filename
        )));
    }
    if filename.len() > MAX_KEY_BYTES {
        return Err(StorageError::InvalidKey(format!(
            "filename is {} bytes, limit is {}",
            filename.len(),
            MAX_KEY_BYTES
        )));
    }
    if filename.contains(['/', '\\']) {
        return Err(StorageError::InvalidKey(
            "filename contains a path separator".to_string(),
        ));
    }
    if filename.chars().any(char::is_control) {
        return Err(StorageError::InvalidKey(
            "filename contains control characters".to_string(),
        ));
    }
    Ok(())
}

/// Suffix of the last `/`-separated segment starting at its final `.`,
/// including the dot.
fn extension(filename: &str) -> Option<&str> {
    let base = filename
        .rfind('/')
        .map_or(filename, |idx| &filename[idx + 1..]);
    base.rfind('.').map(|idx| &base[idx..])
}

/// The extension as sent, unless it holds control characters or would push
/// the key past the S3 length limit.
fn key_extension(filename: &str) -> Option<&str> {
    extension(filename).filter(|ext| {
        ext.len() + MAX_NANOS_DIGITS <= MAX_KEY_BYTES && !ext.chars().any(char::is_control)
    })
}
