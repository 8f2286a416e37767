// ============================================================
// Layer 2 — Engine Configuration
// ============================================================
// All tunables of a QA run in one place.
// Serialisable so it can be read from a JSON file with --config;
// any field missing from the file keeps its default, so a file
// containing just {"max_words": 200} is valid.
//
// The ensemble models are configuration rather than literals in
// the orchestrator so the policy can be audited and swapped.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::application::ranker::TOP_N;
use crate::application::selector::{CHUNKED_MIN_WORDS, ENSEMBLE_MIN_WORDS};
use crate::ml::registry::{DISTILBERT, ELECTRA_SMALL, ROBERTA_BASE};

// ─── Ensemble Models ─────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleModels {
    /// First pass: small and fast
    pub fast_model:     String,
    /// Second pass: slower, more accurate
    pub accurate_model: String,
    /// Direct run when neither pass finds anything
    pub fallback_model: String,
}

impl Default for EnsembleModels {
    fn default() -> Self {
        Self {
            fast_model:     ELECTRA_SMALL.to_string(),
            accurate_model: ROBERTA_BASE.to_string(),
            fallback_model: DISTILBERT.to_string(),
        }
    }
}

// ─── Engine Configuration ────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Model used when the caller doesn't name one
    pub default_model:      String,
    /// Soft cap on words per chunk
    pub max_words:          usize,
    /// Words shared between adjacent chunks
    pub overlap:            usize,
    /// Passages with at least this many words are chunked
    pub chunked_min_words:  usize,
    /// Passages with at least this many words use the ensemble
    pub ensemble_min_words: usize,
    /// How many ranked candidates to keep
    pub top_n:              usize,
    pub ensemble:           EnsembleModels,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_model:      DISTILBERT.to_string(),
            max_words:          300,
            overlap:            50,
            chunked_min_words:  CHUNKED_MIN_WORDS,
            ensemble_min_words: ENSEMBLE_MIN_WORDS,
            top_n:              TOP_N,
            ensemble:           EnsembleModels::default(),
        }
    }
}

impl EngineConfig {
    /// Reject settings that would make every run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            bail!("max_words must be greater than zero");
        }
        if self.top_n == 0 {
            bail!("top_n must be greater than zero");
        }
        if self.chunked_min_words > self.ensemble_min_words {
            bail!(
                "chunked_min_words ({}) must not exceed ensemble_min_words ({})",
                self.chunked_min_words,
                self.ensemble_min_words
            );
        }
        Ok(())
    }
}
