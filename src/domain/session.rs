use chrono::{DateTime, Utc};

use super::{ChatEntry, Document, DocumentText, SessionId};

/// Per-user context: the current document, its text and the task history.
///
/// Created on first upload, replaced document-wise on re-upload and dropped on
/// explicit teardown or idle expiry.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub document: Document,
    pub text: DocumentText,
    pub history: Vec<ChatEntry>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    pub fn new(document: Document, text: DocumentText) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            document,
            text,
            history: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn replace_document(&mut self, document: Document, text: DocumentText) {
        self.document = document;
        self.text = text;
        self.touch();
    }

    pub fn record(&mut self, entry: ChatEntry) {
        self.history.push(entry);
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_active_at < cutoff
    }
}
