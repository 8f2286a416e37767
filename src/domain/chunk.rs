// ============================================================
// Layer 3 — Chunk Domain Type
// ============================================================
// One window of a passage, produced by the TextSegmenter and
// handed to an extractor. Chunks live for a single `process`
// call and are dropped once their candidates are ranked.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Whole sentences joined by single spaces, possibly led by
    /// the overlap words carried over from the previous chunk
    pub text: String,

    /// Position of this chunk in the passage, starting at 0
    pub index: usize,
}

impl Chunk {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self { text: text.into(), index }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
