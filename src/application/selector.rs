// ============================================================
// Layer 2 — Strategy Selector
// ============================================================
// Picks a strategy from the passage length when the caller
// asks for "auto":
//
//   words < 200          → direct   (chunking overhead buys nothing)
//   200 ≤ words < 1000   → chunked  (stay inside the model's input limit)
//   words ≥ 1000         → ensemble (a second model offsets truncation risk)
//
// Words are counted by splitting on whitespace.

use crate::application::config::EngineConfig;
use crate::data::preprocessor::word_count;
use crate::domain::strategy::Strategy;

/// Default word count at which chunking starts
pub const CHUNKED_MIN_WORDS: usize = 200;

/// Default word count at which the ensemble takes over
pub const ENSEMBLE_MIN_WORDS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategySelector {
    chunked_min_words:  usize,
    ensemble_min_words: usize,
}

impl StrategySelector {
    pub fn new(chunked_min_words: usize, ensemble_min_words: usize) -> Self {
        Self { chunked_min_words, ensemble_min_words }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(cfg.chunked_min_words, cfg.ensemble_min_words)
    }

    pub fn select(&self, passage: &str) -> Strategy {
        let words = word_count(passage);
        if words < self.chunked_min_words {
            Strategy::Direct
        } else if words < self.ensemble_min_words {
            Strategy::Chunked
        } else {
            Strategy::Ensemble
        }
    }
}
