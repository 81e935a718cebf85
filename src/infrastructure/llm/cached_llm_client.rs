use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::CompletionRequest;

/// Memoises successful completions for a fixed window.
///
/// Keyed by the exact prompt and sampling parameters. Entries only leave the
/// map by expiring; expired ones are purged on the next insert. Failures are
/// never stored.
pub struct CachedLlmClient {
    inner: Arc<dyn LlmClient>,
    entries: RwLock<HashMap<String, (String, Instant)>>,
    ttl: Duration,
}

impl CachedLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>, ttl: Duration) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn lookup(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|(_, stored_at)| stored_at.elapsed() < self.ttl)
            .map(|(value, _)| value.clone())
    }

    async fn store(&self, key: String, value: String) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, (_, stored_at)| stored_at.elapsed() < self.ttl);
        entries.insert(key, (value, Instant::now()));
    }
}

#[async_trait]
impl LlmClient for CachedLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        let key = request.cache_key();

        if let Some(hit) = self.lookup(&key).await {
            tracing::debug!(task = %request.task, chunk = ?request.chunk_index, "Completion cache hit");
            return Ok(hit);
        }

        tracing::debug!(task = %request.task, chunk = ?request.chunk_index, "Completion cache miss");
        let answer = self.inner.complete(request).await?;
        self.store(key, answer.clone()).await;
        Ok(answer)
    }
}
