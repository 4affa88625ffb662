use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ArtifactStore, FileLoader, LlmClient, ReportRenderer};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{analyze_handler, download_handler, health_handler};
use crate::presentation::state::AppState;

pub fn create_router<F, L, R, S>(state: AppState<F, L, R, S>) -> Router
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
    R: ReportRenderer + ?Sized + 'static,
    S: ArtifactStore + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.settings.upload.max_file_size_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/analyze", post(analyze_handler::<F, L, R, S>))
        .route(
            "/api/v1/reports/{filename}",
            get(download_handler::<F, L, R, S>),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
