// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles the concerns that don't belong in any specific
// business layer:
//
//   config_store.rs — Reading the engine config (JSON) and the
//                     context passage from disk, with errors
//                     that name the offending file.
//
//   history.rs      — In-memory record of answered questions
//                     for interactive sessions.
//
// Keeping file access here means the application layer can be
// driven entirely from memory in tests.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Config and context file loading
pub mod config_store;

/// Session question history
pub mod history;
