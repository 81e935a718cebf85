use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document as PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::text_sanitizer::normalize_page_text;

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 20 * 1024 * 1024;

pub struct PdfAdapter {
    timeout: Duration,
    max_file_size_bytes: u64,
    normalize_text: bool,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            normalize_text: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_file_size_bytes(mut self, limit: u64) -> Self {
        self.max_file_size_bytes = limit;
        self
    }

    pub fn with_normalized_text(mut self, enabled: bool) -> Self {
        self.normalize_text = enabled;
        self
    }

    /// Concatenates page text in page order. The first failing page aborts
    /// the whole document.
    fn extract_pages(data: &[u8], normalize: bool) -> Result<(String, usize), FileLoaderError> {
        let doc = PdfDocument::load_mem(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let pages = doc.get_pages();
        let mut text = String::new();

        for page_number in pages.keys() {
            let page_text = doc.extract_text(&[*page_number]).map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("page {page_number}: {e}"))
            })?;

            if normalize {
                text.push_str(&normalize_page_text(&page_text));
            } else {
                text.push_str(&page_text);
            }
        }

        Ok((text, pages.len()))
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let size_bytes = data.len() as u64;
        if size_bytes > self.max_file_size_bytes {
            return Err(FileLoaderError::TooLarge {
                size_bytes,
                limit_bytes: self.max_file_size_bytes,
            });
        }

        let owned = data.to_vec();
        let normalize = self.normalize_text;

        let (text, page_count) = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned, normalize)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(
            page_count,
            characters = text.chars().count(),
            "PDF text extraction complete"
        );

        Ok(text)
    }
}
