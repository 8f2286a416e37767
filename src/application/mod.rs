// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to answer a question.
//
// Rules for this layer:
//   - No model code here (that's Layer 5)
//   - No UI or printing here (that's Layer 1)
//   - No file access (that's Layer 6)
//   - Only workflow coordination and the policies that drive it
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Tunables for a QA run
pub mod config;

// Confidence ordering of answer candidates
pub mod ranker;

// Passage-length based strategy choice
pub mod selector;

// The direct / chunked / ensemble workflow
pub mod orchestrator;
