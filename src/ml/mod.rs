// ============================================================
// Layer 5 — Model Layer
// ============================================================
// Everything that knows about specific models lives here.
// The application layer only sees the AnswerExtractor trait
// and opaque model id strings.
//
// What's in this layer:
//
//   registry.rs  — The catalogue of known model ids, with
//                  names, descriptions and sizes, plus a
//                  context-size based recommendation
//
//   extractor.rs — LexicalExtractor, the default extractor:
//                  scores sentences by question-term overlap
//                  and cuts the answer span after the match
//
// A neural extractor would be added here as another
// AnswerExtractor implementation; nothing above this layer
// needs to change.

/// Known models and model recommendation
pub mod registry;

/// Term-overlap answer extraction
pub mod extractor;
