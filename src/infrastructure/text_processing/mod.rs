mod fixed_window_splitter;
mod pdf_adapter;
mod text_sanitizer;

pub use fixed_window_splitter::FixedWindowSplitter;
pub use pdf_adapter::PdfAdapter;
pub use text_sanitizer::normalize_page_text;
