mod chat_entry;
mod chunk;
mod completion_request;
mod document;
mod document_text;
mod message_role;
mod session;
mod session_id;
mod task_kind;

pub use chat_entry::ChatEntry;
pub use chunk::Chunk;
pub use completion_request::CompletionRequest;
pub use document::{ContentType, Document, DocumentId};
pub use document_text::DocumentText;
pub(crate) use document_text::truncate_chars;
pub use message_role::MessageRole;
pub use session::Session;
pub use session_id::SessionId;
pub use task_kind::{ParseTaskError, TaskKind};
