// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The engine depends on two capabilities it does not implement
// itself. Programming against traits keeps the orchestrator
// independent of how answers or sentence boundaries are found:
//
//   - LexicalExtractor implements AnswerExtractor
//   - A neural extractor (ONNX, remote API, ...) could too
//   - The orchestrator only sees &dyn AnswerExtractor
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use crate::domain::candidate::AnswerCandidate;
use crate::domain::error::ExtractionError;

// ─── AnswerExtractor ──────────────────────────────────────────────────────────
/// Maps `(question, text)` to a scored answer span using the named model.
///
/// `Ok(None)` means the model ran but found nothing worth returning.
/// Implementations own any model cache and its locking; the orchestrator
/// only borrows them, which is why the trait is `Send + Sync`.
pub trait AnswerExtractor: Send + Sync {
    fn extract(
        &self,
        question: &str,
        text:     &str,
        model_id: &str,
    ) -> Result<Option<AnswerCandidate>, ExtractionError>;
}

// ─── SentenceSplitter ─────────────────────────────────────────────────────────
/// Splits normalised text into sentences, in order.
///
/// Must not drop text: joining the output with single spaces
/// should reproduce the (single-spaced) input.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}
