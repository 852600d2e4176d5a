//! Serves files previously stored through the upload adapter.
//!
//! The upload handler returns URLs of the form `/files/uploads/{key}`; this
//! route streams the file back without buffering it in memory.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;

use casfos_core::AppError;

use crate::error::HttpAppError;
use crate::state::UploadState;

fn content_type_for(key: &str) -> &'static str {
    match std::path::Path::new(key)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[utoipa::path(
    get,
    path = "/files/{key}",
    tag = "uploads",
    params(("key" = String, Path, description = "Storage key of the file")),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn serve_file(
    State(state): State<UploadState>,
    Path(key): Path<String>,
) -> Result<Response, HttpAppError> {
    let stream = state
        .storage
        .download_stream(&key)
        .await
        .map_err(HttpAppError::from)?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&key))
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from_stream(body_stream))
        .map_err(|e| HttpAppError::from(AppError::Internal(e.to_string())))?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(content_type_for("uploads/a.pdf"), "application/pdf");
        assert_eq!(content_type_for("uploads/a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("uploads/a.png"), "image/png");
        assert_eq!(content_type_for("uploads/a.bin"), "application/octet-stream");
    }
}
