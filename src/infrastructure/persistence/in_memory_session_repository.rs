use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{ChatEntry, Document, DocumentText, Session, SessionId};

/// Process-local session store. Sessions never outlive the process.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: Session) -> Result<SessionId, SessionRepositoryError> {
        let id = session.id;
        match self.sessions.write().await.entry(id) {
            Entry::Occupied(_) => Err(SessionRepositoryError::AlreadyExists(id)),
            Entry::Vacant(slot) => {
                slot.insert(session);
                Ok(id)
            }
        }
    }

    async fn get(&self, id: SessionId) -> Result<Session, SessionRepositoryError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionRepositoryError::NotFound(id))
    }

    async fn touch(&self, id: SessionId) -> Result<Session, SessionRepositoryError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionRepositoryError::NotFound(id))?;
        session.touch();
        Ok(session.clone())
    }

    async fn replace_document(
        &self,
        id: SessionId,
        document: Document,
        text: DocumentText,
    ) -> Result<(), SessionRepositoryError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionRepositoryError::NotFound(id))?;
        session.replace_document(document, text);
        Ok(())
    }

    async fn append_history(
        &self,
        id: SessionId,
        entry: ChatEntry,
    ) -> Result<(), SessionRepositoryError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionRepositoryError::NotFound(id))?;
        session.record(entry);
        Ok(())
    }

    async fn delete(&self, id: SessionId) -> Result<(), SessionRepositoryError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionRepositoryError::NotFound(id))
    }

    async fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let idle = session.is_idle_since(cutoff);
            if idle {
                tracing::debug!(
                    session_id = %id,
                    created_at = %session.created_at,
                    last_active_at = %session.last_active_at,
                    "Evicting idle session"
                );
            }
            !idle
        });
        before - sessions.len()
    }
}
