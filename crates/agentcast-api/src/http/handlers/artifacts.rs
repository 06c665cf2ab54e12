//! Artifact upload, listing and download.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use agentcast_core::storage::artifact_store::ArtifactStore;
use agentcast_infra::storage::{detect_mime, is_text_mime};
use agentcast_types::artifact::StoredArtifact;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestClock};
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ArtifactList {
    pub files: Vec<String>,
}

/// POST /api/v1/upload - Store one file from the `file` multipart field.
pub async fn upload_artifact(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<StoredArtifact>>, AppError> {
    let clock = RequestClock::start();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file field has no filename".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        let path = state.artifacts.write(&filename, &data).await?;
        tracing::info!(filename = %filename, size = data.len(), "artifact uploaded");

        let stored = StoredArtifact {
            filename: filename.clone(),
            path: path.display().to_string(),
        };
        let href = format!("/api/v1/download/{filename}");
        return Ok(Json(clock.success(stored).with_link("download", &href)));
    }

    Err(AppError::Validation(format!(
        "missing multipart field '{UPLOAD_FIELD}'"
    )))
}

/// GET /api/v1/artifacts - Names of stored artifacts.
pub async fn list_artifacts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ArtifactList>>, AppError> {
    let clock = RequestClock::start();
    let files = state.artifacts.list().await?;
    Ok(Json(clock.success(ArtifactList { files })))
}

/// GET /api/v1/download/{filename} - Raw artifact bytes.
pub async fn download_artifact(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let data = state.artifacts.read_bytes(&filename).await?;

    let mime = detect_mime(&filename);
    let content_type = if is_text_mime(mime) {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    };
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    let content_type = HeaderValue::from_str(&content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}
