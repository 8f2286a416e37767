// ============================================================
// Layer 4 — Text Segmenter
// ============================================================
// Splits a long passage into overlapping, sentence-aligned chunks.
//
// Why do we need chunking?
//   Extractive QA models have a maximum input length.
//   A long passage can't just be truncated — we might cut off
//   the answer! Instead each chunk is answered separately and
//   the best candidate wins.
//
// Why sentence-aligned?
//   An answer span never crosses a sentence boundary cut by the
//   segmenter, because the segmenter never cuts a sentence.
//
// Algorithm (greedy accumulation):
//   1. Clean the passage (Preprocessor)
//   2. Split into sentences (SentenceSplitter)
//   3. Add sentences to the current chunk while the word count
//      stays ≤ max_words
//   4. When the next sentence would overflow a non-empty chunk,
//      close it and seed the next chunk with its last `overlap`
//      words (one synthetic unit, possibly a sentence fragment)
//   5. Flush whatever is left as the final chunk
//
// Example with max_words=8, overlap=2:
//   Sentences: "A b c." "D e f." "G h i."
//   Chunk 0:   "A b c. D e f."            (6 words)
//   Chunk 1:   "e f. G h i."              (2 overlap + 3 words)
//
// max_words is a soft cap: a single sentence longer than
// max_words is emitted whole rather than split.
//
// Reference: Rust Book §8 (Vectors, Strings)
//            Devlin et al. (2019) BERT paper - sliding window approach

use crate::data::preprocessor::{word_count, Preprocessor};
use crate::data::sentences::RuleSentenceSplitter;
use crate::domain::chunk::Chunk;
use crate::domain::error::SegmentationError;
use crate::domain::traits::SentenceSplitter;

pub struct TextSegmenter {
    /// Soft upper bound on words per chunk
    max_words: usize,
    /// Words carried from the end of one chunk into the next
    overlap: usize,
    preprocessor: Preprocessor,
    splitter: Box<dyn SentenceSplitter>,
}

impl TextSegmenter {
    /// Create a segmenter using the rule-based sentence splitter.
    ///
    /// Fails if `max_words` is zero. An `overlap` that is not smaller
    /// than `max_words` is clamped to `max_words - 1`.
    pub fn new(max_words: usize, overlap: usize) -> Result<Self, SegmentationError> {
        if max_words == 0 {
            return Err(SegmentationError::ZeroMaxWords);
        }

        let clamped = overlap.min(max_words - 1);
        if clamped != overlap {
            tracing::warn!(
                "overlap ({}) must be less than max_words ({}); using {}",
                overlap,
                max_words,
                clamped
            );
        }

        Ok(Self {
            max_words,
            overlap: clamped,
            preprocessor: Preprocessor::new(),
            splitter: Box::new(RuleSentenceSplitter::new()),
        })
    }

    /// Swap in a different sentence boundary detector.
    pub fn with_splitter(mut self, splitter: impl SentenceSplitter + 'static) -> Self {
        self.splitter = Box::new(splitter);
        self
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split `text` into ordered chunks. Empty input gives no chunks.
    pub fn segment(&self, text: &str) -> Vec<Chunk> {
        let cleaned   = self.preprocessor.clean(text);
        let sentences = self.splitter.split(&cleaned);

        let mut chunks: Vec<Chunk>    = Vec::new();
        let mut current: Vec<String>  = Vec::new();
        let mut current_len           = 0usize;

        for sentence in sentences {
            let sentence_len = word_count(&sentence);

            // Close the chunk if this sentence would overflow it
            if current_len + sentence_len > self.max_words && !current.is_empty() {
                let closed = current.join(" ");
                current.clear();
                current_len = 0;

                // Seed the next chunk with the tail of the closed one
                let closed_words: Vec<&str> = closed.split_whitespace().collect();
                if self.overlap > 0 && closed_words.len() > self.overlap {
                    let tail = &closed_words[closed_words.len() - self.overlap..];
                    current.push(tail.join(" "));
                    current_len = self.overlap;
                }

                chunks.push(Chunk::new(closed, chunks.len()));
            }

            current.push(sentence);
            current_len += sentence_len;
        }

        // Don't forget the last chunk
        if !current.is_empty() {
            chunks.push(Chunk::new(current.join(" "), chunks.len()));
        }

        tracing::debug!(
            "Split text into {} chunks with max {} words each",
            chunks.len(),
            self.max_words
        );
        chunks
    }
}
