use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{FileLoaderError, SessionRepositoryError};
use crate::application::services::{AssistantError, ProcessError};
use crate::domain::SessionId;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

pub fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    Uuid::parse_str(raw).map(SessionId::from_uuid).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid session ID: {}", raw),
        )
    })
}

/// Maps service failures onto status codes. Completion failures keep the
/// `Error: <cause>` wording shown to end users.
pub fn assistant_error_response(error: &AssistantError) -> Response {
    let status = match error {
        AssistantError::Extraction(FileLoaderError::TooLarge { .. }) => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        AssistantError::Extraction(FileLoaderError::UnsupportedContentType(_)) => {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        }
        AssistantError::Extraction(FileLoaderError::ExtractionFailed(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AssistantError::Session(SessionRepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
        AssistantError::Session(SessionRepositoryError::AlreadyExists(_)) => StatusCode::CONFLICT,
        AssistantError::Process(ProcessError::Prompt(_)) => StatusCode::BAD_REQUEST,
        AssistantError::Process(ProcessError::Completion(_)) => StatusCode::BAD_GATEWAY,
    };

    let message = match error {
        AssistantError::Process(ProcessError::Completion(cause)) => format!("Error: {cause}"),
        other => other.to_string(),
    };

    if status.is_server_error() {
        tracing::error!(error = %error, status = status.as_u16(), "Request failed");
    } else {
        tracing::warn!(error = %error, status = status.as_u16(), "Request rejected");
    }

    error_response(status, message)
}
