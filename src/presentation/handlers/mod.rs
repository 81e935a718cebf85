mod error;
mod health;
mod sessions;
mod tasks;

pub use error::{ErrorResponse, assistant_error_response, error_response, parse_session_id};
pub use health::health_handler;
pub use sessions::{
    HistoryResponse, SessionResponse, create_session_handler, delete_session_handler,
    history_handler, replace_document_handler,
};
pub use tasks::{FailedChunk, TaskRequest, TaskResponse, run_task_handler};
