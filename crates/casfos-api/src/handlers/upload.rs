//! File upload handler
//!
//! Accepts a single multipart "file" field (PDF/JPEG/PNG, up to the
//! configured size limit), stores it through the upload adapter, and
//! returns a server-relative URL that clients store verbatim on the
//! owning entity.

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

use casfos_core::validation::UploadValidator;
use casfos_core::AppError;

use crate::error::HttpAppError;
use crate::state::UploadState;

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// Server-relative URL of the stored file
    pub file_url: String,
}

#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Invalid file", body = crate::error::ErrorResponse),
        (status = 413, description = "File too large", body = crate::error::ErrorResponse),
    )
)]
pub async fn upload_file(
    State(state): State<UploadState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let validator = UploadValidator::new(
        state.max_file_size,
        state.allowed_extensions.clone(),
        state.allowed_content_types.clone(),
    );

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::InvalidInput("Missing filename".to_string()))?;
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::InvalidInput("Missing content type".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        validator
            .validate_all(&filename, &content_type, data.len())
            .map_err(HttpAppError::from)?;

        let (key, url) = state
            .storage
            .upload(&filename, &content_type, data.to_vec())
            .await
            .map_err(HttpAppError::from)?;

        tracing::info!(key = %key, "File uploaded");
        return Ok(Json(UploadResponse {
            success: true,
            file_url: url,
        }));
    }

    Err(HttpAppError(AppError::InvalidInput(
        "No 'file' field in multipart body".to_string(),
    )))
}
