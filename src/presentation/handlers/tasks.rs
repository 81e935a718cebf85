use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::FileLoader;
use crate::domain::TaskKind;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::{assistant_error_response, error_response, parse_session_id};

#[derive(Deserialize, Default)]
pub struct TaskRequest {
    pub query: Option<String>,
}

#[derive(Serialize)]
pub struct TaskResponse {
    pub task: TaskKind,
    pub output: String,
    pub completion_calls: usize,
    pub failed_chunks: Vec<FailedChunk>,
}

#[derive(Serialize)]
pub struct FailedChunk {
    pub index: usize,
    pub error: String,
}

/// The body is optional: tasks without a query may be posted empty.
fn parse_request(body: &Bytes) -> Result<TaskRequest, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TaskRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", e),
        )
    })
}

#[tracing::instrument(skip(state, body))]
pub async fn run_task_handler<F>(
    State(state): State<AppState<F>>,
    Path((session_id, task)): Path<(String, String)>,
    body: Bytes,
) -> Response
where
    F: FileLoader + 'static,
{
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let task: TaskKind = match task.parse() {
        Ok(t) => t,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("{}", e)),
    };
    let request = match parse_request(&body) {
        Ok(r) => r,
        Err(response) => return response,
    };

    if let Some(query) = request.query.as_deref() {
        tracing::debug!(task = %task, query = %sanitize_prompt(query), "Running task");
    }

    match state
        .assistant_service
        .run_task(session_id, task, request.query)
        .await
    {
        Ok(output) => {
            tracing::info!(
                task = %task,
                completion_calls = output.completion_calls,
                failed_chunks = output.failures.len(),
                "Task successful"
            );
            let failed_chunks = output
                .failures
                .into_iter()
                .map(|f| FailedChunk {
                    index: f.index,
                    error: f.error.to_string(),
                })
                .collect();

            (
                StatusCode::OK,
                Json(TaskResponse {
                    task: output.task,
                    output: output.text,
                    completion_calls: output.completion_calls,
                    failed_chunks,
                }),
            )
                .into_response()
        }
        Err(e) => assistant_error_response(&e),
    }
}
