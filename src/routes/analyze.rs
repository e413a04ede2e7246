//! PDF analysis endpoints
//!
//! - `POST /analyze`: positioned words per page, JPEG for low-text pages
//! - `POST /split`: page count
//!
//! Both take a multipart upload with the document in the `file` field.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};

use crate::analysis::{validate_filename, AnalyzeResponse, SplitResponse};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the analysis router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_pdf))
        .route("/split", post(split_pdf))
}

/// An uploaded document that passed the filename check
struct Upload {
    filename: String,
    data: Bytes,
}

/// Pull the `file` field out of the multipart body
///
/// The filename is checked before the field body is read, so rejected
/// uploads are never buffered.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read upload: {}", e))
    })? {
        if field.name() != Some("file") {
            tracing::debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        tracing::debug!(
            "Received file field: filename='{}', content_type={:?}",
            filename,
            field.content_type()
        );

        validate_filename(&filename)?;

        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read file data: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;
        tracing::debug!("Read {} bytes of file data", data.len());

        return Ok(Upload { filename, data });
    }

    Err(AppError::MissingField(
        "Missing required multipart field 'file'".to_string(),
    ))
}

/// Extract words and fall back to page images
async fn analyze_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>> {
    let upload = read_upload(&mut multipart).await?;
    let service = state.analysis().clone();

    let response =
        tokio::task::spawn_blocking(move || service.analyze(&upload.data, &upload.filename))
            .await??;

    Ok(Json(response))
}

/// Report the page count
async fn split_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SplitResponse>> {
    let upload = read_upload(&mut multipart).await?;
    let service = state.analysis().clone();

    let response =
        tokio::task::spawn_blocking(move || service.split(&upload.data, &upload.filename))
            .await??;

    Ok(Json(response))
}
