use std::sync::Arc;

use crate::application::ports::TextSplitter;
use crate::domain::{CompletionRequest, DocumentText, TaskKind, truncate_chars};

use super::prompt_parameters::{PromptParameters, TaskParameters};
use super::prompt_templates::{self, SYSTEM_PREAMBLE};

/// Renders task prompts from the fixed templates.
///
/// Every prompt embeds at most `budget_chars` characters of document text.
/// `summary` renders one prompt per chunk produced by the text splitter.
pub struct PromptBuilder {
    parameters: PromptParameters,
    text_splitter: Arc<dyn TextSplitter>,
}

impl PromptBuilder {
    pub fn new(parameters: PromptParameters, text_splitter: Arc<dyn TextSplitter>) -> Self {
        Self {
            parameters,
            text_splitter,
        }
    }

    pub fn parameters(&self) -> &PromptParameters {
        &self.parameters
    }

    pub fn build(
        &self,
        task: TaskKind,
        text: &DocumentText,
        query: Option<&str>,
    ) -> Result<Vec<CompletionRequest>, PromptError> {
        if task.is_chunked() {
            return Ok(self.build_chunked(task, text));
        }
        self.build_single(task, text, query).map(|request| vec![request])
    }

    /// One prompt over the leading `budget_chars` of the document. For
    /// `summary` this covers the first window only.
    pub fn build_single(
        &self,
        task: TaskKind,
        text: &DocumentText,
        query: Option<&str>,
    ) -> Result<CompletionRequest, PromptError> {
        let params = self.parameters.for_task(task);

        let query = query.map(str::trim).filter(|q| !q.is_empty());
        if task.requires_query() && query.is_none() {
            return Err(PromptError::MissingQuery(task));
        }
        let query = query.unwrap_or_default();
        let excerpt = text.excerpt(params.budget_chars);

        let prompt = match task {
            TaskKind::Qa => prompt_templates::qa(excerpt, query),
            TaskKind::Summary => prompt_templates::summary_chunk(excerpt),
            TaskKind::Eli5 => prompt_templates::eli5(excerpt, query),
            TaskKind::Medications => prompt_templates::medications(excerpt),
            TaskKind::Recommendations => prompt_templates::recommendations(excerpt),
        };

        tracing::debug!(task = %task, budget_chars = params.budget_chars, "Prompt rendered");

        Ok(self.request(task, prompt, params))
    }

    /// One prompt per chunk, in chunk order. Empty text yields no prompts.
    pub fn build_chunked(&self, task: TaskKind, text: &DocumentText) -> Vec<CompletionRequest> {
        let params = self.parameters.for_task(task);

        let requests: Vec<CompletionRequest> = self
            .text_splitter
            .split(text.as_str())
            .into_iter()
            .map(|chunk| {
                tracing::trace!(chunk = chunk.index, offset = chunk.offset, "Chunk prompt");
                let excerpt = truncate_chars(&chunk.text, params.budget_chars);
                self.request(task, prompt_templates::summary_chunk(excerpt), params)
                    .with_chunk_index(chunk.index)
            })
            .collect();

        tracing::debug!(
            task = %task,
            budget_chars = params.budget_chars,
            chunks = requests.len(),
            "Chunked prompts rendered"
        );

        requests
    }

    fn request(&self, task: TaskKind, prompt: String, params: TaskParameters) -> CompletionRequest {
        let request = CompletionRequest::new(task, prompt, params.temperature)
            .with_max_tokens(params.max_tokens);
        if self.parameters.include_system_preamble {
            request.with_system_preamble(SYSTEM_PREAMBLE)
        } else {
            request
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("task {0} requires a non-empty query")]
    MissingQuery(TaskKind),
}
