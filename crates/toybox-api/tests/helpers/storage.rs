//! In-memory storage double for integration tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use toybox_storage::{Storage, StorageError, StorageResult};

/// Base of the fake presigned URLs.
pub const TEST_ENDPOINT: &str = "http://s3.test.local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

/// Storage backed by a HashMap, with switches to simulate backend failures.
pub struct MemoryStorage {
    bucket: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    deleted: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_presigns: AtomicBool,
}

impl MemoryStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Mutex::new(HashMap::new()),
            deleted: Mutex::new(Vec::new()),
            fail_uploads: AtomicBool::new(false),
            fail_presigns: AtomicBool::new(false),
        }
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn fail_presigns(&self) {
        self.fail_presigns.store(true, Ordering::SeqCst);
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "dispatch failure: simulated backend outage at 10.0.0.7:4566".to_string(),
            ));
        }
        self.objects.lock().unwrap().insert(
            storage_key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if self.fail_presigns.load(Ordering::SeqCst) {
            return Err(StorageError::PresignFailed(
                "simulated signing failure".to_string(),
            ));
        }
        Ok(format!(
            "{}/{}/{}?X-Amz-Expires={}&X-Amz-Signature=deadbeef",
            TEST_ENDPOINT,
            self.bucket,
            storage_key,
            expires_in.as_secs()
        ))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.objects.lock().unwrap().remove(storage_key);
        self.deleted.lock().unwrap().push(storage_key.to_string());
        Ok(())
    }
}
