mod file_loader;
mod llm_client;
mod session_repository;
mod text_splitter;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use session_repository::{SessionRepository, SessionRepositoryError};
pub use text_splitter::TextSplitter;
