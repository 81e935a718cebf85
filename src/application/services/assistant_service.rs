use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::application::ports::{
    FileLoader, FileLoaderError, SessionRepository, SessionRepositoryError,
};
use crate::domain::{ChatEntry, ContentType, Document, DocumentText, Session, SessionId, TaskKind};

use super::document_processor::{DocumentProcessor, ProcessError, TaskOutput};

/// Session-level entry point: upload, run tasks, read history, tear down.
pub struct AssistantService<F>
where
    F: FileLoader,
{
    file_loader: Arc<F>,
    processor: Arc<DocumentProcessor>,
    sessions: Arc<dyn SessionRepository>,
}

#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub session_id: SessionId,
    pub document: Document,
    pub characters: usize,
}

impl<F> AssistantService<F>
where
    F: FileLoader,
{
    pub fn new(
        file_loader: Arc<F>,
        processor: Arc<DocumentProcessor>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            file_loader,
            processor,
            sessions,
        }
    }

    /// Extracts the document and opens a new session around it. Nothing is
    /// stored when extraction fails.
    pub async fn start_session(
        &self,
        data: &[u8],
        filename: String,
        content_type: ContentType,
    ) -> Result<UploadedDocument, AssistantError> {
        let (document, text) = self.extract(data, filename, content_type).await?;
        let characters = text.char_len();
        let session = Session::new(document.clone(), text);
        let session_id = self.sessions.create(session).await?;

        tracing::info!(
            session_id = %session_id,
            filename = %document.filename,
            characters,
            "Session started"
        );

        Ok(UploadedDocument {
            session_id,
            document,
            characters,
        })
    }

    /// Swaps the session's document wholesale. The previous text stays in
    /// place when extraction fails.
    pub async fn replace_document(
        &self,
        session_id: SessionId,
        data: &[u8],
        filename: String,
        content_type: ContentType,
    ) -> Result<UploadedDocument, AssistantError> {
        // Fail on unknown sessions before spending time on extraction.
        self.sessions.get(session_id).await?;

        let (document, text) = self.extract(data, filename, content_type).await?;
        let characters = text.char_len();
        self.sessions
            .replace_document(session_id, document.clone(), text)
            .await?;

        tracing::info!(session_id = %session_id, filename = %document.filename, characters, "Document replaced");

        Ok(UploadedDocument {
            session_id,
            document,
            characters,
        })
    }

    pub async fn run_task(
        &self,
        session_id: SessionId,
        task: TaskKind,
        query: Option<String>,
    ) -> Result<TaskOutput, AssistantError> {
        // Activity is refreshed before the completions start.
        let session = self.sessions.touch(session_id).await?;

        let output = self
            .processor
            .process(&session.text, task, query.as_deref())
            .await?;

        let entry = ChatEntry::new(task, query, output.text.clone());
        self.sessions.append_history(session_id, entry).await?;

        Ok(output)
    }

    pub async fn history(&self, session_id: SessionId) -> Result<Vec<ChatEntry>, AssistantError> {
        Ok(self.sessions.touch(session_id).await?.history)
    }

    pub async fn end_session(&self, session_id: SessionId) -> Result<(), AssistantError> {
        self.sessions.delete(session_id).await?;
        tracing::info!(session_id = %session_id, "Session ended");
        Ok(())
    }

    pub async fn evict_idle_sessions(&self, idle_for: Duration) -> usize {
        let evicted = self.sessions.evict_idle(Utc::now() - idle_for).await;
        if evicted > 0 {
            tracing::info!(evicted, "Idle sessions evicted");
        }
        evicted
    }

    async fn extract(
        &self,
        data: &[u8],
        filename: String,
        content_type: ContentType,
    ) -> Result<(Document, DocumentText), AssistantError> {
        let document = Document::new(filename, content_type, data.len() as u64);
        let text = self
            .file_loader
            .extract_text(data, &document)
            .await
            .map_err(AssistantError::Extraction)?;

        if text.trim().is_empty() {
            tracing::warn!(filename = %document.filename, "Document yielded no text");
        }

        Ok((document, DocumentText::from(text)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("extraction: {0}")]
    Extraction(#[from] FileLoaderError),
    #[error("session: {0}")]
    Session(#[from] SessionRepositoryError),
    #[error(transparent)]
    Process(#[from] ProcessError),
}
