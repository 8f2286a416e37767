// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums, and traits that define the core
// concepts of the system.
//
// Rules for this layer:
//   - NO file I/O
//   - NO model-specific code
//   - Only plain data types, errors, and capability traits
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Answer candidates and the final QA result
pub mod candidate;

// Overlapping windows of a passage
pub mod chunk;

// Strategy names and caller requests
pub mod strategy;

// Segmentation and extraction errors
pub mod error;

// Capabilities the engine depends on
pub mod traits;
