//! Multipart extraction for the upload handler

use axum::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;
use toybox_core::AppError;

/// Name of the form field that carries the file.
pub const FILE_FIELD: &str = "file";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received from the client, fully buffered.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

/// Any multipart failure, including a body over the size limit, is a bad form.
fn multipart_error(err: MultipartError) -> AppError {
    AppError::MalformedForm(format!("{} (status {})", err.body_text(), err.status()))
}

/// Extract the single file part named "file".
///
/// The part must carry a non-empty filename. A second "file" part is
/// rejected; any other field is read past and ignored.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        if upload.is_some() {
            return Err(AppError::MissingFile(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(AppError::MissingFile(
                    "Field 'file' has no filename".to_string(),
                ))
            }
        };
        let content_type = field
            .content_type()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let data = field.bytes().await.map_err(multipart_error)?;

        upload = Some(UploadedFile {
            data,
            filename,
            content_type,
        });
    }

    upload.ok_or_else(|| AppError::MissingFile("No file provided".to_string()))
}
