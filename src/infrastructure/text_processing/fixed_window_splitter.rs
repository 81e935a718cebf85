use crate::application::ports::TextSplitter;
use crate::domain::Chunk;

/// Splits text into contiguous, non-overlapping windows of `window_chars`
/// characters. Only the last window may be shorter.
pub struct FixedWindowSplitter {
    window_chars: usize,
}

impl FixedWindowSplitter {
    pub fn new(window_chars: usize) -> Self {
        Self {
            window_chars: window_chars.max(1),
        }
    }

    pub fn window_chars(&self) -> usize {
        self.window_chars
    }
}

impl TextSplitter for FixedWindowSplitter {
    fn split(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();

        chars
            .chunks(self.window_chars)
            .enumerate()
            .map(|(index, window)| {
                Chunk::new(index, index * self.window_chars, window.iter().collect())
            })
            .collect()
    }
}
