use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, FileLoader, LlmClient, ReportRenderer,
};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Serves a rendered artifact from the output directory as an attachment.
#[tracing::instrument(skip(state))]
pub async fn download_handler<F, L, R, S>(
    State(state): State<AppState<F, L, R, S>>,
    Path(filename): Path<String>,
) -> impl IntoResponse
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
    R: ReportRenderer + ?Sized + 'static,
    S: ArtifactStore + ?Sized + 'static,
{
    // Artifacts live in a flat directory; anything path-like is hostile.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        tracing::warn!(filename = %filename, "Rejected traversal attempt");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid filename".to_string(),
            }),
        )
            .into_response();
    }

    match state.artifact_store.load(&filename).await {
        Ok(bytes) => {
            let content_type = match filename.rsplit_once('.').map(|(_, ext)| ext) {
                Some("pdf") => "application/pdf",
                Some("txt") => "text/plain; charset=utf-8",
                _ => "application/octet-stream",
            };

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(ArtifactStoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "File not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(filename = %filename, error = %e, "Artifact read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to read artifact: {}", e),
                }),
            )
                .into_response()
        }
    }
}
