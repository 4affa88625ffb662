use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{ArtifactStore, FileLoader, LlmClient, ReportRenderer};
use crate::application::services::{FileOutcome, UploadedFile};
use crate::domain::ReportFormat;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub results: Vec<FileResult>,
}

/// Outcome of one uploaded file: either download URLs for both artifacts,
/// or the reason that file's pipeline failed. One entry per upload, in
/// submission order.
#[derive(Serialize)]
pub struct FileResult {
    pub filename: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txt_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler<F, L, R, S>(
    State(state): State<AppState<F, L, R, S>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
    R: ReportRenderer + ?Sized + 'static,
    S: ArtifactStore + ?Sized + 'static,
{
    let mut files: Vec<UploadedFile> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        let filename = field.file_name().unwrap_or("uploaded").to_string();
        let declared_mime = field.content_type().map(String::from);

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(filename = %filename, error = %e, "Failed to read file bytes");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read file {}: {}", filename, e),
                    }),
                )
                    .into_response();
            }
        };

        tracing::debug!(
            filename = %filename,
            content_type = declared_mime.as_deref().unwrap_or("unknown"),
            bytes = data.len(),
            "File received"
        );

        files.push(UploadedFile {
            filename,
            declared_mime,
            bytes: data.to_vec(),
        });
    }

    if files.is_empty() {
        tracing::warn!("Analyze request with no files");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No files uploaded".to_string(),
            }),
        )
            .into_response();
    }

    let file_count = files.len();
    let outcomes = state.analysis_service.analyze_batch(files).await;
    let results: Vec<FileResult> = outcomes.into_iter().map(to_file_result).collect();

    let succeeded = results.iter().filter(|r| r.status == "ok").count();
    tracing::info!(file_count, succeeded, "Analyze request complete");

    (StatusCode::OK, Json(AnalyzeResponse { results })).into_response()
}

fn to_file_result(outcome: FileOutcome) -> FileResult {
    match outcome.result {
        Ok(report) => {
            let url_for = |format: ReportFormat| {
                report
                    .artifacts
                    .iter()
                    .find(|a| a.format == format)
                    .map(|a| format!("/api/v1/reports/{}", a.filename))
            };

            FileResult {
                filename: outcome.filename,
                status: "ok",
                txt_url: url_for(ReportFormat::Txt),
                pdf_url: url_for(ReportFormat::Pdf),
                error: None,
            }
        }
        Err(e) => FileResult {
            filename: outcome.filename,
            status: "error",
            txt_url: None,
            pdf_url: None,
            error: Some(e.to_string()),
        },
    }
}
