use chrono::{DateTime, Utc};
use serde::Serialize;

use super::TaskKind;

#[derive(Debug, Clone, Serialize)]
pub struct ChatEntry {
    pub task: TaskKind,
    pub query: Option<String>,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl ChatEntry {
    pub fn new(task: TaskKind, query: Option<String>, answer: String) -> Self {
        Self {
            task,
            query,
            answer,
            created_at: Utc::now(),
        }
    }
}
