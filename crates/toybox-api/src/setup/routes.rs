//! Route configuration and setup.

use crate::handlers::{root::hello, upload::upload_file};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router.
///
/// `/` is an exact GET route, not a catch-all: other methods on `/` get 405
/// and unknown paths get 404. `/s3` only accepts POST; axum answers every
/// other method with an empty 405. Without an explicit upload cap, axum's
/// default 2 MiB body limit applies.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(hello))
        .route("/s3", post(upload_file));

    if let Some(max_upload_bytes) = state.upload.max_upload_bytes {
        app = app.layer(DefaultBodyLimit::max(max_upload_bytes));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
