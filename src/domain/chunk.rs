/// A contiguous window of document text, processed independently of its
/// neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    /// Offset of the first character, counted in `char`s.
    pub offset: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(index: usize, offset: usize, text: String) -> Self {
        Self {
            index,
            offset,
            text,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
