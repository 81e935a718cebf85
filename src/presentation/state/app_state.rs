use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::application::services::AssistantService;

pub struct AppState<F>
where
    F: FileLoader,
{
    pub assistant_service: Arc<AssistantService<F>>,
    pub max_upload_bytes: u64,
}

impl<F> Clone for AppState<F>
where
    F: FileLoader,
{
    fn clone(&self) -> Self {
        Self {
            assistant_service: Arc::clone(&self.assistant_service),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
