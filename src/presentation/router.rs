use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::FileLoader;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_session_handler, delete_session_handler, health_handler, history_handler,
    replace_document_handler, run_task_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

pub fn create_router<F>(state: AppState<F>) -> Router
where
    F: FileLoader + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = usize::try_from(state.max_upload_bytes + MULTIPART_OVERHEAD_BYTES)
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/sessions", post(create_session_handler::<F>))
        .route(
            "/api/v1/sessions/{session_id}",
            delete(delete_session_handler::<F>),
        )
        .route(
            "/api/v1/sessions/{session_id}/document",
            put(replace_document_handler::<F>),
        )
        .route(
            "/api/v1/sessions/{session_id}/history",
            get(history_handler::<F>),
        )
        .route(
            "/api/v1/sessions/{session_id}/tasks/{task}",
            post(run_task_handler::<F>),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
