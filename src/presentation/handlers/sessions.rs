use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::FileLoader;
use crate::application::services::UploadedDocument;
use crate::domain::{ChatEntry, ContentType};
use crate::presentation::state::AppState;

use super::error::{assistant_error_response, error_response, parse_session_id};

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub document_id: String,
    pub filename: String,
    pub characters: usize,
}

impl From<UploadedDocument> for SessionResponse {
    fn from(uploaded: UploadedDocument) -> Self {
        Self {
            session_id: uploaded.session_id.to_string(),
            document_id: uploaded.document.id.as_uuid().to_string(),
            filename: uploaded.document.filename,
            characters: uploaded.characters,
        }
    }
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub entries: Vec<ChatEntry>,
}

struct UploadedFile {
    filename: String,
    content_type: ContentType,
    data: Bytes,
}

/// Body-limit overruns surface as 413; other malformed bodies as 400.
fn multipart_error_response(context: &str, error: &MultipartError) -> Response {
    let status = error.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %error, "Upload exceeds body limit");
        return error_response(status, format!("File too large: {}", error.body_text()));
    }
    tracing::error!(error = %error, "{}", context);
    error_response(StatusCode::BAD_REQUEST, format!("{}: {}", context, error))
}

/// Takes the `file` field, or the first field carrying a filename.
async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded"));
            }
            Err(e) => return Err(multipart_error_response("Failed to read multipart", &e)),
        };

        if field.name() != Some("file") && field.file_name().is_none() {
            continue;
        }

        let filename = field.file_name().unwrap_or("document.pdf").to_string();
        let mime = field.content_type().map(str::to_string);

        let Some(content_type) = ContentType::detect(mime.as_deref(), &filename) else {
            let shown = mime.unwrap_or_else(|| "unknown".to_string());
            tracing::warn!(content_type = %shown, filename = %filename, "Unsupported upload");
            return Err(error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported content type: {}. Upload a PDF.", shown),
            ));
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error_response("Failed to read file", &e))?;

        tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn create_session_handler<F>(
    State(state): State<AppState<F>>,
    mut multipart: Multipart,
) -> Response
where
    F: FileLoader + 'static,
{
    let upload = match read_upload(&mut multipart).await {
        Ok(u) => u,
        Err(response) => return response,
    };

    match state
        .assistant_service
        .start_session(&upload.data, upload.filename, upload.content_type)
        .await
    {
        Ok(uploaded) => (StatusCode::CREATED, Json(SessionResponse::from(uploaded))).into_response(),
        Err(e) => assistant_error_response(&e),
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn replace_document_handler<F>(
    State(state): State<AppState<F>>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> Response
where
    F: FileLoader + 'static,
{
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let upload = match read_upload(&mut multipart).await {
        Ok(u) => u,
        Err(response) => return response,
    };

    match state
        .assistant_service
        .replace_document(session_id, &upload.data, upload.filename, upload.content_type)
        .await
    {
        Ok(uploaded) => (StatusCode::OK, Json(SessionResponse::from(uploaded))).into_response(),
        Err(e) => assistant_error_response(&e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn history_handler<F>(
    State(state): State<AppState<F>>,
    Path(session_id): Path<String>,
) -> Response
where
    F: FileLoader + 'static,
{
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.assistant_service.history(id).await {
        Ok(entries) => (
            StatusCode::OK,
            Json(HistoryResponse {
                session_id: id.to_string(),
                entries,
            }),
        )
            .into_response(),
        Err(e) => assistant_error_response(&e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_session_handler<F>(
    State(state): State<AppState<F>>,
    Path(session_id): Path<String>,
) -> Response
where
    F: FileLoader + 'static,
{
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.assistant_service.end_session(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => assistant_error_response(&e),
    }
}
