// ============================================================
// Layer 4 — Text Pipeline
// ============================================================
// This layer turns a raw passage into model-sized pieces.
//
// The pipeline flows in this order:
//
//   raw passage
//       │
//       ▼
//   Preprocessor         → normalises quotes, symbols, whitespace
//       │
//       ▼
//   RuleSentenceSplitter → finds sentence boundaries
//       │
//       ▼
//   TextSegmenter        → packs sentences into overlapping chunks
//
// plus a display helper (context_window) that cuts a snippet of
// the passage around an answer.
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Cleans and normalises raw passage text
pub mod preprocessor;

/// Rule-based sentence boundary detection
pub mod sentences;

/// Splits passages into overlapping sentence-aligned chunks
pub mod segmenter;

/// Answer-centred snippets for display
pub mod snippet;
