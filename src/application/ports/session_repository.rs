use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ChatEntry, Document, DocumentText, Session, SessionId};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: Session) -> Result<SessionId, SessionRepositoryError>;

    async fn get(&self, id: SessionId) -> Result<Session, SessionRepositoryError>;

    /// Marks the session active now and returns a snapshot of it.
    async fn touch(&self, id: SessionId) -> Result<Session, SessionRepositoryError>;

    async fn replace_document(
        &self,
        id: SessionId,
        document: Document,
        text: DocumentText,
    ) -> Result<(), SessionRepositoryError>;

    async fn append_history(
        &self,
        id: SessionId,
        entry: ChatEntry,
    ) -> Result<(), SessionRepositoryError>;

    async fn delete(&self, id: SessionId) -> Result<(), SessionRepositoryError>;

    /// Drops every session whose last activity is older than `cutoff` and
    /// returns how many were removed.
    async fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionRepositoryError {
    #[error("session not found: {0}")]
    NotFound(SessionId),
    #[error("session already exists: {0}")]
    AlreadyExists(SessionId),
}
