mod assistant_service;
mod document_processor;
mod prompt_builder;
mod prompt_parameters;
pub mod prompt_templates;

pub use assistant_service::{AssistantError, AssistantService, UploadedDocument};
pub use document_processor::{ChunkFailure, DocumentProcessor, ProcessError, TaskOutput};
pub use prompt_builder::{PromptBuilder, PromptError};
pub use prompt_parameters::{PromptParameters, PromptPreset, SUMMARY_CHUNK_CHARS, TaskParameters};
