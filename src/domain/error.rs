// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Two kinds of failure live in the domain:
//
//   SegmentationError — the segmenter was configured with
//                       nonsense (a zero word budget). This is a
//                       programming error and must stop execution.
//
//   ExtractionError   — an extractor could not produce an answer
//                       for one (question, text, model) call. The
//                       orchestrator logs it and moves on; it never
//                       reaches the caller of `process`.
//
// "No answer found" is not an error at all: it is `None`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentationError {
    #[error("max_words must be greater than zero")]
    ZeroMaxWords,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),

    #[error("question and text must both be non-empty")]
    EmptyInput,

    #[error("inference failed: {0}")]
    Inference(String),
}
