use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::extract::{multipart::MultipartRejection, Multipart, State};
use std::sync::Arc;
use toybox_core::AppError;
use toybox_storage::{derive_storage_key, Storage};

/// `POST /s3`: store one file and answer with a presigned download URL.
///
/// Upload and presign are attempted once each. If presigning fails after a
/// successful upload, the object is deleted again so it is not left behind
/// without anyone holding a URL for it.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, HttpAppError> {
    let multipart = multipart.map_err(|e| AppError::MalformedForm(e.body_text()))?;
    let file = extract_multipart_file(multipart).await?;

    let key = derive_storage_key(state.upload.key_strategy, &file.filename, &state.timestamps)?;
    let size = file.data.len();

    state
        .storage
        .upload_with_key(&key, file.data, &file.content_type)
        .await?;

    let url = match state
        .storage
        .get_presigned_url(&key, state.upload.presign_expiry)
        .await
    {
        Ok(url) => url,
        Err(e) => {
            discard_unreachable_object(state.storage.as_ref(), &key).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        bucket = %state.storage.bucket(),
        key = %key,
        original_filename = %file.filename,
        content_type = %file.content_type,
        size_bytes = size,
        "Uploaded file"
    );

    Ok(format!("Uploaded: {}", url))
}

async fn discard_unreachable_object(storage: &dyn Storage, key: &str) {
    if let Err(e) = storage.delete(key).await {
        tracing::warn!(
            error = %e,
            bucket = %storage.bucket(),
            key = %key,
            "Failed to delete object after presign failure; object is orphaned"
        );
    }
}
