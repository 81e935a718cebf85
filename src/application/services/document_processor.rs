use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{CompletionRequest, DocumentText, TaskKind};

use super::prompt_builder::{PromptBuilder, PromptError};
use super::prompt_templates::{MEDICATIONS_HEADER, MEDICATIONS_NOT_FOUND, RECOMMENDATIONS_HEADER};

const CHUNK_SEPARATOR: &str = "\n\n";

/// Runs one task against a document: renders the prompts, calls the model
/// and post-processes the answer.
pub struct DocumentProcessor {
    prompt_builder: PromptBuilder,
    llm_client: Arc<dyn LlmClient>,
    summary_concurrency: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutput {
    pub task: TaskKind,
    pub text: String,
    pub completion_calls: usize,
    /// Summary chunks whose completion failed. Their slot in `text` holds an
    /// `Error: ...` line.
    pub failures: Vec<ChunkFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChunkFailure {
    pub index: usize,
    pub error: LlmClientError,
}

impl DocumentProcessor {
    pub fn new(
        prompt_builder: PromptBuilder,
        llm_client: Arc<dyn LlmClient>,
        summary_concurrency: usize,
    ) -> Self {
        Self {
            prompt_builder,
            llm_client,
            summary_concurrency: summary_concurrency.max(1),
        }
    }

    #[tracing::instrument(skip_all, fields(task = %task, text_chars = text.char_len()))]
    pub async fn process(
        &self,
        text: &DocumentText,
        task: TaskKind,
        query: Option<&str>,
    ) -> Result<TaskOutput, ProcessError> {
        if task.is_chunked() {
            return self.summarize(text, task).await;
        }

        let request = self.prompt_builder.build_single(task, text, query)?;
        let started = Instant::now();
        let answer = self
            .llm_client
            .complete(&request)
            .await
            .map_err(ProcessError::Completion)?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            answer_chars = answer.chars().count(),
            "Task completed"
        );

        Ok(TaskOutput {
            task,
            text: post_process(task, answer),
            completion_calls: 1,
            failures: Vec::new(),
        })
    }

    async fn summarize(&self, text: &DocumentText, task: TaskKind) -> Result<TaskOutput, ProcessError> {
        let requests = self.prompt_builder.build_chunked(task, text);
        let chunk_count = requests.len();
        let started = Instant::now();

        // `buffered` yields in input order regardless of completion order.
        let outcomes: Vec<(usize, Result<String, LlmClientError>)> = stream::iter(requests)
            .enumerate()
            .map(|(position, request)| self.complete_chunk(position, request))
            .buffered(self.summary_concurrency)
            .collect()
            .await;

        let mut sections = Vec::with_capacity(chunk_count);
        let mut failures = Vec::new();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(section) => sections.push(section),
                Err(error) => {
                    tracing::warn!(chunk = index, error = %error, "Summary chunk failed");
                    sections.push(format!("Error: {error}"));
                    failures.push(ChunkFailure { index, error });
                }
            }
        }

        if chunk_count > 0 && failures.len() == chunk_count {
            let first = failures.swap_remove(0);
            return Err(ProcessError::Completion(first.error));
        }

        tracing::info!(
            chunks = chunk_count,
            failed_chunks = failures.len(),
            concurrency = self.summary_concurrency,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Summary completed"
        );

        Ok(TaskOutput {
            task,
            text: sections.join(CHUNK_SEPARATOR),
            completion_calls: chunk_count,
            failures,
        })
    }

    async fn complete_chunk(
        &self,
        position: usize,
        request: CompletionRequest,
    ) -> (usize, Result<String, LlmClientError>) {
        let index = request.chunk_index.unwrap_or(position);
        (index, self.llm_client.complete(&request).await)
    }
}

fn post_process(task: TaskKind, answer: String) -> String {
    match task {
        TaskKind::Medications => {
            if answer.trim().is_empty() || answer.to_lowercase().contains("no medication") {
                MEDICATIONS_NOT_FOUND.to_string()
            } else {
                format!("{MEDICATIONS_HEADER}{answer}")
            }
        }
        TaskKind::Recommendations => format!("{RECOMMENDATIONS_HEADER}{answer}"),
        TaskKind::Qa | TaskKind::Eli5 | TaskKind::Summary => answer,
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProcessError {
    #[error("prompt: {0}")]
    Prompt(#[from] PromptError),
    #[error("completion: {0}")]
    Completion(LlmClientError),
}
