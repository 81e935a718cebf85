use std::sync::Arc;

/// Text extracted from one uploaded document.
///
/// Immutable once produced; a new upload replaces it wholesale. Cloning is
/// cheap, so sessions and in-flight tasks can share the same buffer. All
/// lengths are counted in `char`s so that truncation never splits a code point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentText(Arc<str>);

impl DocumentText {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns at most the first `budget` characters.
    pub fn excerpt(&self, budget: usize) -> &str {
        truncate_chars(&self.0, budget)
    }
}

impl From<String> for DocumentText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for DocumentText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub(crate) fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
