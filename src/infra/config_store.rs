// ============================================================
// Layer 6 — Configuration and Context Files
// ============================================================
// Reads the two files a run may depend on:
//
//   --config <path>   EngineConfig as JSON. Fields missing from
//                     the file keep their defaults.
//   --context <path>  The passage to search, as UTF-8 text.
//
// Both are read eagerly and fail with a message naming the file,
// so a typo in a path is reported before any question is asked.
//
// Example config file:
//   {
//     "max_words": 250,
//     "overlap": 40,
//     "ensemble": { "fallback_model": "deepset/roberta-base-squad2" }
//   }
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::application::config::EngineConfig;

/// Load and validate an EngineConfig from a JSON file.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

    let cfg: EngineConfig = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config JSON in '{}'", path.display()))?;

    cfg.validate()
        .with_context(|| format!("Invalid settings in '{}'", path.display()))?;

    tracing::debug!("Loaded engine config from '{}'", path.display());
    Ok(cfg)
}

/// Read a passage from a text file.
pub fn load_context(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read context from '{}'", path.display()))?;

    tracing::info!(
        "Loaded context from '{}' ({} words)",
        path.display(),
        text.split_whitespace().count()
    );
    Ok(text)
}
