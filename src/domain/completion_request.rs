use super::TaskKind;

/// One prompt, ready to send: system preamble, user message and the task's
/// sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub task: TaskKind,
    pub chunk_index: Option<usize>,
    pub system_preamble: Option<String>,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(task: TaskKind, prompt: String, temperature: f32) -> Self {
        Self {
            task,
            chunk_index: None,
            system_preamble: None,
            prompt,
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_system_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.system_preamble = Some(preamble.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_chunk_index(mut self, index: usize) -> Self {
        self.chunk_index = Some(index);
        self
    }

    /// Identity of the request as seen by the remote endpoint. Task and chunk
    /// bookkeeping are not part of it.
    pub fn cache_key(&self) -> String {
        serde_json::json!([
            self.system_preamble,
            self.prompt,
            self.temperature,
            self.max_tokens,
        ])
        .to_string()
    }
}
