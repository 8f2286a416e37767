// ============================================================
// Layer 1 — CLI Arguments and Output
// ============================================================
// Defines the flags of the `passage-qa` binary and how results
// are printed.
//
// Flags are grouped by concern:
//   AskArgs    — what to ask and how to answer it
//   TuningArgs — engine settings (config file + overrides),
//                turned into an EngineConfig with TryFrom
//
// Settings are resolved in this order, later wins:
//   built-in defaults → --config file → --max-words / --overlap
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, PathBuf, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::Result;
use clap::Args;
use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::path::PathBuf;

use crate::application::config::EngineConfig;
use crate::data::snippet::context_window;
use crate::domain::candidate::QaResult;
use crate::domain::strategy::StrategyRequest;
use crate::infra::config_store;
use crate::infra::history::History;
use crate::ml::registry::ModelRegistry;

/// Passage used when --context is not given
pub const DEFAULT_CONTEXT: &str = "Artificial intelligence (AI) is intelligence demonstrated by \
machines, as opposed to natural intelligence displayed by humans.";

/// Characters shown on either side of the answer in the snippet
const SNIPPET_WINDOW: usize = 100;

/// Value of --model that asks for a size-based recommendation
const AUTO_MODEL: &str = "auto";

/// What to ask and how to answer it
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(long, required_unless_present_any = ["list_models", "interactive"])]
    pub question: Option<String>,

    /// Text file holding the passage to search
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Model id, or "auto" to pick one by passage size
    #[arg(long)]
    pub model: Option<String>,

    /// auto, direct, chunked or ensemble
    #[arg(long, default_value = "auto")]
    pub strategy: String,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Keep asking questions about the same passage
    #[arg(long)]
    pub interactive: bool,
}

impl AskArgs {
    pub fn strategy_request(&self) -> StrategyRequest {
        StrategyRequest::from(self.strategy.as_str())
    }

    /// Read the passage, or fall back to the built-in one.
    pub fn load_context(&self) -> Result<String> {
        match &self.context {
            Some(path) => config_store::load_context(path),
            None => {
                tracing::info!("No --context given, using the built-in passage");
                Ok(DEFAULT_CONTEXT.to_string())
            }
        }
    }

    /// Resolve --model against the registry.
    /// No flag means the configured default; "auto" means a
    /// recommendation based on passage length.
    pub fn resolve_model(
        &self,
        registry: &ModelRegistry,
        config:   &EngineConfig,
        context:  &str,
    ) -> Result<String> {
        let model = match self.model.as_deref() {
            None => config.default_model.clone(),
            Some(m) if m.eq_ignore_ascii_case(AUTO_MODEL) => {
                let chars       = context.chars().count();
                let recommended = registry.recommend_for_context(chars);
                tracing::info!("Recommended {} for {} characters of context", recommended, chars);
                recommended.to_string()
            }
            Some(m) => m.to_string(),
        };

        if !registry.contains(&model) {
            anyhow::bail!("Unknown model '{}' (see --list-models)", model);
        }
        Ok(model)
    }
}

/// Engine settings
#[derive(Args, Debug, Default)]
pub struct TuningArgs {
    /// JSON file with engine settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum words per chunk (overrides the config file)
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Words shared by neighbouring chunks (overrides the config file)
    #[arg(long)]
    pub overlap: Option<usize>,
}

/// Convert CLI TuningArgs into the application-layer EngineConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
/// Fallible because the config file has to be read and the
/// merged settings validated.
impl TryFrom<&TuningArgs> for EngineConfig {
    type Error = anyhow::Error;

    /// Defaults, then the config file, then command-line overrides.
    fn try_from(a: &TuningArgs) -> Result<Self> {
        let mut cfg = match &a.config {
            Some(path) => config_store::load_config(path)?,
            None       => EngineConfig::default(),
        };

        if let Some(max_words) = a.max_words {
            cfg.max_words = max_words;
        }
        if let Some(overlap) = a.overlap {
            cfg.overlap = overlap;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// Human-readable report for one answered question.
pub fn render_result(question: &str, result: &QaResult, context: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Question: {}", question);
    let _ = writeln!(out, "Answer: {}", result.answer());
    let _ = writeln!(out, "Score: {:.4}", result.score());

    if let Some(index) = result.candidate.chunk_index {
        let _ = writeln!(out, "(Found in chunk: {})", index);
    }

    let _ = writeln!(
        out,
        "Strategy: {} | Model: {} | Time: {:.2}s",
        result.strategy_used, result.model_used, result.processing_time_secs
    );
    let _ = writeln!(out, "Confidence: {}", result.confidence());

    if !result.alternate_answers.is_empty() {
        let _ = writeln!(out, "Alternatives:");
        for alt in &result.alternate_answers {
            let _ = writeln!(out, "  - {}", alt);
        }
    }

    let _ = writeln!(out, "Context: {}", context_window(context, result.answer(), SNIPPET_WINDOW));
    out
}

/// Write one outcome, as text or as a JSON document (`null` when unanswered).
pub fn write_outcome<W: io::Write>(
    out:      &mut W,
    question: &str,
    result:   Option<&QaResult>,
    context:  &str,
    json:     bool,
) -> Result<()> {
    let text = match (json, result) {
        (true, _)        => format!("{}\n", serde_json::to_string_pretty(&result)?),
        (false, Some(r)) => render_result(question, r, context),
        (false, None)    => format!("Question: {}\nNo answer found.\n", question),
    };
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Numbered history listing, or a JSON array of entries.
pub fn render_history(history: &History, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(history.entries())?));
    }
    if history.is_empty() {
        return Ok("No questions answered yet.\n".to_string());
    }
    Ok(history
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{:>3}. {}\n", i + 1, e))
        .collect())
}

/// Model table, or a JSON array of the registry entries.
pub fn render_models(registry: &ModelRegistry, json: bool) -> Result<String> {
    if json {
        let models: Vec<_> = registry.iter().collect();
        return Ok(format!("{}\n", serde_json::to_string_pretty(&models)?));
    }

    let mut out = String::from("Available models:\n");
    for m in registry.iter() {
        let _ = writeln!(out, "  {:<55} {:<14} {:>5} MB  {}", m.id, m.name, m.size_mb, m.description);
    }
    Ok(out)
}
