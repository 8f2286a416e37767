// ============================================================
// Layer 3 — Processing Strategies
// ============================================================
// Three ways to answer a question against a passage:
//
//   direct   — one extraction call over the whole passage
//   chunked  — split into overlapping chunks, extract per chunk, rank
//   ensemble — two chunked runs with different models, rank the winners
//
// Callers ask for a strategy by name. "auto" lets the selector
// decide from passage length; unknown names are kept so the
// orchestrator can log them before falling back to direct.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Direct,
    Chunked,
    Ensemble,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Direct   => "direct",
            Strategy::Chunked  => "chunked",
            Strategy::Ensemble => "ensemble",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller asked for, before selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StrategyRequest {
    /// Pick a strategy from the passage length
    #[default]
    Auto,
    /// Run exactly this strategy
    Explicit(Strategy),
    /// A name we don't recognise — the orchestrator falls back to direct
    Unrecognized(String),
}

impl From<&str> for StrategyRequest {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto"     => StrategyRequest::Auto,
            "direct"   => StrategyRequest::Explicit(Strategy::Direct),
            "chunked"  => StrategyRequest::Explicit(Strategy::Chunked),
            "ensemble" => StrategyRequest::Explicit(Strategy::Ensemble),
            _          => StrategyRequest::Unrecognized(name.to_string()),
        }
    }
}

impl From<Strategy> for StrategyRequest {
    fn from(strategy: Strategy) -> Self {
        StrategyRequest::Explicit(strategy)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_known_names() {
        assert_eq!(StrategyRequest::from("auto"), StrategyRequest::Auto);
        assert_eq!(
            StrategyRequest::from("Chunked"),
            StrategyRequest::Explicit(Strategy::Chunked)
        );
        assert_eq!(
            StrategyRequest::from(" ensemble "),
            StrategyRequest::Explicit(Strategy::Ensemble)
        );
    }

    #[test]
    fn test_unknown_name_is_kept() {
        assert_eq!(
            StrategyRequest::from("turbo"),
            StrategyRequest::Unrecognized("turbo".to_string())
        );
    }

    #[test]
    fn test_display_matches_serde_name() {
        let json = serde_json::to_string(&Strategy::Ensemble).unwrap();
        assert_eq!(json, format!("\"{}\"", Strategy::Ensemble));
    }
}
