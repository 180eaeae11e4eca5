//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p toybox-api`.

#![allow(dead_code)]

pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::sync::Arc;
use toybox_api::setup::routes;
use toybox_api::state::AppState;
use toybox_core::config::UploadConfig;
use toybox_core::KeyStrategy;

use storage::MemoryStorage;

pub const TEST_BUCKET: &str = "toybox";

/// Test application: server plus the storage double behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup a test app with default upload settings (timestamp keys, 10 MiB cap).
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(UploadConfig::default())
}

/// Setup a test app reusing client filenames as keys.
pub fn setup_filename_app() -> TestApp {
    setup_test_app_with(UploadConfig {
        key_strategy: KeyStrategy::Filename,
        ..UploadConfig::default()
    })
}

pub fn setup_test_app_with(upload: UploadConfig) -> TestApp {
    let storage = Arc::new(MemoryStorage::new(TEST_BUCKET));
    let state = Arc::new(AppState::new(storage.clone(), upload));
    let app = routes::setup_routes(state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, storage }
}

/// Multipart form with a single file part named "file".
pub fn file_form(filename: &str, content_type: &str, data: &[u8]) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name(filename.to_string())
        .mime_type(content_type.to_string());
    MultipartForm::new().add_part("file", part)
}

/// Extract the storage key from an `Uploaded: <url>` response body.
pub fn key_from_response(body: &str) -> String {
    let url = body
        .strip_prefix("Uploaded: ")
        .expect("Expected 'Uploaded: ' prefix");
    let prefix = format!("{}/{}/", storage::TEST_ENDPOINT, TEST_BUCKET);
    let rest = url
        .strip_prefix(&prefix)
        .expect("Expected URL under the test bucket");
    rest.split('?').next().unwrap_or_default().to_string()
}
