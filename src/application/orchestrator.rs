// ============================================================
// Layer 2 — QA Orchestrator
// ============================================================
// Answers one question against one passage:
//   1. Resolve the strategy (auto → StrategySelector)
//   2. Run it:
//        direct   — one extractor call over the whole passage
//        chunked  — segment, one call per chunk, rank
//        ensemble — chunked with a fast model, chunked with an
//                   accurate model, rank the two winners;
//                   if both come back empty, direct with the
//                   fallback model
//   3. Attach timing, strategy and model to the winner
//
// Extraction failures never escape: a failed call is logged and
// treated as "no candidate from here". When nothing is left the
// result is None, which callers must render as "no answer".
//
// Execution is sequential and blocking. The extractor is borrowed,
// not owned — its lifetime and locking belong to the caller.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::application::config::{EngineConfig, EnsembleModels};
use crate::application::ranker::AnswerRanker;
use crate::application::selector::StrategySelector;
use crate::data::segmenter::TextSegmenter;
use crate::domain::candidate::{AnswerCandidate, QaResult};
use crate::domain::strategy::{Strategy, StrategyRequest};
use crate::domain::traits::AnswerExtractor;

/// The winner of one strategy run, before timing is attached
struct Winner {
    candidate:  AnswerCandidate,
    alternates: Vec<String>,
}

impl From<AnswerCandidate> for Winner {
    fn from(candidate: AnswerCandidate) -> Self {
        Self { candidate, alternates: Vec::new() }
    }
}

pub struct QaOrchestrator<'a> {
    extractor: &'a dyn AnswerExtractor,
    segmenter: TextSegmenter,
    ranker:    AnswerRanker,
    selector:  StrategySelector,
    ensemble:  EnsembleModels,
}

impl<'a> QaOrchestrator<'a> {
    /// Build an orchestrator over a borrowed extractor.
    /// Fails on invalid configuration.
    pub fn new(extractor: &'a dyn AnswerExtractor, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let segmenter = TextSegmenter::new(config.max_words, config.overlap)
            .context("Invalid chunking configuration")?;

        Ok(Self {
            extractor,
            segmenter,
            ranker:   AnswerRanker::new(config.top_n),
            selector: StrategySelector::from_config(config),
            ensemble: config.ensemble.clone(),
        })
    }

    /// Answer `question` from `context`. `None` means no answer was found.
    pub fn process(
        &self,
        question: &str,
        context:  &str,
        model_id: &str,
        request:  StrategyRequest,
    ) -> Option<QaResult> {
        self.process_with_cancel(question, context, model_id, request, &AtomicBool::new(false))
    }

    /// Like `process`, but stops extracting once `cancel` is raised.
    /// The flag is checked between chunks; whatever was collected
    /// before that point is still ranked.
    pub fn process_with_cancel(
        &self,
        question: &str,
        context:  &str,
        model_id: &str,
        request:  StrategyRequest,
        cancel:   &AtomicBool,
    ) -> Option<QaResult> {
        let started  = Instant::now();
        let strategy = self.resolve(request, context);

        if context.trim().is_empty() {
            tracing::warn!("Empty context, nothing to search");
            return None;
        }

        let winner = match strategy {
            Strategy::Direct   => self.direct(question, context, model_id).map(Winner::from),
            Strategy::Chunked  => self.chunked(question, context, model_id, cancel).map(Winner::from),
            Strategy::Ensemble => self.ensemble(question, context, cancel),
        };

        let Some(Winner { candidate, alternates }) = winner else {
            tracing::info!("No answer found ({} strategy)", strategy);
            return None;
        };

        let model_used = candidate
            .model
            .clone()
            .unwrap_or_else(|| model_id.to_string());

        let result = QaResult {
            candidate,
            processing_time_secs: started.elapsed().as_secs_f64(),
            strategy_used:        strategy,
            model_used,
            alternate_answers:    alternates,
        };

        tracing::info!(
            "Answer '{}' (score {:.4}) via {} with {} in {:.2}s",
            result.answer(),
            result.score(),
            result.strategy_used,
            result.model_used,
            result.processing_time_secs
        );
        Some(result)
    }

    fn resolve(&self, request: StrategyRequest, context: &str) -> Strategy {
        match request {
            StrategyRequest::Auto => {
                let strategy = self.selector.select(context);
                tracing::info!("Auto-selected {} strategy", strategy);
                strategy
            }
            StrategyRequest::Explicit(strategy) => strategy,
            StrategyRequest::Unrecognized(name) => {
                tracing::warn!("Unknown strategy '{}', falling back to direct", name);
                Strategy::Direct
            }
        }
    }

    // ─── direct ──────────────────────────────────────────────────────────────
    fn direct(&self, question: &str, context: &str, model_id: &str) -> Option<AnswerCandidate> {
        tracing::info!("Using direct QA approach with model {}", model_id);

        match self.extractor.extract(question, context, model_id) {
            Ok(Some(candidate)) => Some(candidate.with_model(model_id)),
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Error in direct QA with {}: {}", model_id, e);
                None
            }
        }
    }

    // ─── chunked ─────────────────────────────────────────────────────────────
    fn chunked(
        &self,
        question: &str,
        context:  &str,
        model_id: &str,
        cancel:   &AtomicBool,
    ) -> Option<AnswerCandidate> {
        tracing::info!("Using chunked QA approach with model {}", model_id);

        let chunks = self.segmenter.segment(context);
        tracing::info!(
            "Split context into {} chunks (max {} words, overlap {})",
            chunks.len(),
            self.segmenter.max_words(),
            self.segmenter.overlap()
        );

        let mut candidates = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            if cancel.load(Ordering::Relaxed) {
                tracing::warn!("Cancelled after {} of {} chunks", chunk.index, chunks.len());
                break;
            }

            tracing::debug!("Chunk {} ({} words)", chunk.index, chunk.word_count());
            match self.extractor.extract(question, &chunk.text, model_id) {
                Ok(Some(candidate)) => {
                    candidates.push(candidate.with_chunk_index(chunk.index).with_model(model_id));
                }
                Ok(None) => tracing::debug!("No answer in chunk {}", chunk.index),
                Err(e) => tracing::warn!(
                    "Skipping chunk {} ({}): {}",
                    chunk.index,
                    model_id,
                    e
                ),
            }
        }

        self.ranker.rank(&candidates).into_iter().next()
    }

    // ─── ensemble ────────────────────────────────────────────────────────────
    fn ensemble(&self, question: &str, context: &str, cancel: &AtomicBool) -> Option<Winner> {
        tracing::info!("Using ensemble QA approach with multiple models");

        let passes = [&self.ensemble.fast_model, &self.ensemble.accurate_model];
        let model_best: Vec<AnswerCandidate> = passes
            .into_iter()
            .filter_map(|model| self.chunked(question, context, model, cancel))
            .collect();

        let mut ranked = self.ranker.rank(&model_best).into_iter();
        if let Some(candidate) = ranked.next() {
            // The ranker already dropped repeated answer texts
            let alternates = ranked.map(|c| c.answer).collect();
            return Some(Winner { candidate, alternates });
        }

        if cancel.load(Ordering::Relaxed) {
            return None;
        }

        tracing::warn!(
            "Ensemble found no answer, falling back to direct with {}",
            self.ensemble.fallback_model
        );
        self.direct(question, context, &self.ensemble.fallback_model)
            .map(Winner::from)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ExtractionError;
    use crate::ml::extractor::LexicalExtractor;
    use crate::ml::registry::{BERT_LARGE, DISTILBERT, ELECTRA_SMALL, ROBERTA_BASE};
    use std::sync::Mutex;

    type Reply = Result<Option<AnswerCandidate>, ExtractionError>;

    /// Extractor driven by a closure that records every call as (model, text).
    struct Scripted<F> {
        reply: F,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl<F> Scripted<F>
    where
        F: Fn(&str, &str) -> Reply + Send + Sync,
    {
        fn new(reply: F) -> Self {
            Self { reply, calls: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn models_called(&self) -> Vec<String> {
            self.calls().into_iter().map(|(m, _)| m).collect()
        }
    }

    impl<F> AnswerExtractor for Scripted<F>
    where
        F: Fn(&str, &str) -> Reply + Send + Sync,
    {
        fn extract(&self, _question: &str, text: &str, model_id: &str) -> Reply {
            self.calls.lock().unwrap().push((model_id.to_string(), text.to_string()));
            (self.reply)(text, model_id)
        }
    }

    fn always_fails() -> Scripted<impl Fn(&str, &str) -> Reply + Send + Sync> {
        Scripted::new(|_: &str, _: &str| Err(ExtractionError::Inference("boom".to_string())))
    }

    /// `n_words` words as ten-word sentences; sentence `k` starts with "Fact{k}"
    fn passage(n_words: usize) -> String {
        (0..n_words / 10)
            .map(|k| format!("Fact{k} one two three four five six seven eight end."))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn orchestrator(extractor: &dyn AnswerExtractor) -> QaOrchestrator<'_> {
        QaOrchestrator::new(extractor, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_end_to_end_short_passage_goes_direct() {
        let extractor = LexicalExtractor::default();
        let qa        = orchestrator(&extractor);
        let context   = "Artificial intelligence (AI) is intelligence demonstrated by machines, \
                         as opposed to natural intelligence displayed by humans.";

        let result = qa.process("What is AI?", context, DISTILBERT, StrategyRequest::Auto).unwrap();

        assert_eq!(result.answer(), "intelligence demonstrated by machines");
        assert!(result.score() > 0.0);
        assert_eq!(result.strategy_used, Strategy::Direct);
        assert_eq!(result.model_used, DISTILBERT);
        assert_eq!(result.candidate.chunk_index, None);
        assert!(result.processing_time_secs >= 0.0);
    }

    #[test]
    fn test_medium_passage_is_chunked_and_best_chunk_wins() {
        let text      = passage(500).replace("Fact42 ", "Needle ");
        let extractor = Scripted::new(|chunk: &str, _: &str| {
            let score = if chunk.contains("Needle") { 0.9 } else { 0.2 };
            Ok(Some(AnswerCandidate::new("found", score, 0, 5)))
        });
        let qa = orchestrator(&extractor);

        let result = qa.process("Where?", &text, ROBERTA_BASE, StrategyRequest::Auto).unwrap();

        assert_eq!(result.strategy_used, Strategy::Chunked);
        assert!((result.score() - 0.9).abs() < 1e-6);
        assert_eq!(result.model_used, ROBERTA_BASE);

        // The winning chunk index points at the chunk holding the needle
        let calls = extractor.calls();
        let idx   = result.candidate.chunk_index.unwrap();
        assert!(calls[idx].1.contains("Needle"));
        assert!(calls.len() > 1);
    }

    #[test]
    fn test_chunked_skips_failing_chunks() {
        let text      = passage(600).replace("Fact0 ", "Poison ");
        let extractor = Scripted::new(|chunk: &str, _: &str| {
            if chunk.contains("Poison") {
                Err(ExtractionError::Inference("bad chunk".to_string()))
            } else {
                Ok(Some(AnswerCandidate::new("ok", 0.5, 0, 2)))
            }
        });
        let qa = orchestrator(&extractor);

        let result = qa.process("Q?", &text, DISTILBERT, Strategy::Chunked.into()).unwrap();
        assert_eq!(result.answer(), "ok");
        assert_ne!(result.candidate.chunk_index, Some(0));
    }

    #[test]
    fn test_explicit_strategy_bypasses_selection() {
        let extractor = Scripted::new(|_: &str, _: &str| Ok(Some(AnswerCandidate::new("a", 0.7, 0, 1))));
        let qa        = orchestrator(&extractor);

        let result = qa.process("Q?", "Tiny passage.", DISTILBERT, Strategy::Chunked.into()).unwrap();
        assert_eq!(result.strategy_used, Strategy::Chunked);
        assert_eq!(result.candidate.chunk_index, Some(0));
    }

    #[test]
    fn test_unknown_strategy_falls_back_to_direct() {
        let extractor = Scripted::new(|_: &str, _: &str| Ok(Some(AnswerCandidate::new("a", 0.7, 0, 1))));
        let qa        = orchestrator(&extractor);
        let text      = passage(1200);

        let result = qa.process("Q?", &text, DISTILBERT, StrategyRequest::from("turbo")).unwrap();

        assert_eq!(result.strategy_used, Strategy::Direct);
        let calls = extractor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, text);
    }

    #[test]
    fn test_always_failing_extractor_never_answers() {
        let extractor = always_fails();
        let qa        = orchestrator(&extractor);

        let requests = [
            StrategyRequest::Auto,
            Strategy::Direct.into(),
            Strategy::Chunked.into(),
            Strategy::Ensemble.into(),
            StrategyRequest::from("bogus"),
        ];
        for text in [passage(50), passage(500), passage(1500)] {
            for request in requests.clone() {
                assert!(qa.process("Q?", &text, DISTILBERT, request).is_none());
            }
        }
    }

    #[test]
    fn test_long_passage_uses_ensemble_with_alternates() {
        let extractor = Scripted::new(|_: &str, model: &str| {
            let candidate = match model {
                m if m == ELECTRA_SMALL => AnswerCandidate::new("fast answer", 0.6, 0, 11),
                m if m == ROBERTA_BASE  => AnswerCandidate::new("accurate answer", 0.9, 0, 15),
                _                       => return Ok(None),
            };
            Ok(Some(candidate))
        });
        let qa = orchestrator(&extractor);

        let result = qa.process("Q?", &passage(1500), DISTILBERT, StrategyRequest::Auto).unwrap();

        assert_eq!(result.strategy_used, Strategy::Ensemble);
        assert_eq!(result.answer(), "accurate answer");
        assert_eq!(result.model_used, ROBERTA_BASE);
        assert_eq!(result.alternate_answers, vec!["fast answer".to_string()]);
        assert!(!extractor.models_called().contains(&DISTILBERT.to_string()));
    }

    #[test]
    fn test_ensemble_agreement_has_no_alternates() {
        let extractor = Scripted::new(|_: &str, model: &str| {
            let score = if model == ELECTRA_SMALL { 0.4 } else { 0.8 };
            Ok(Some(AnswerCandidate::new("same", score, 0, 4)))
        });
        let qa = orchestrator(&extractor);

        let result = qa.process("Q?", &passage(1500), DISTILBERT, Strategy::Ensemble.into()).unwrap();
        assert!(result.alternate_answers.is_empty());
        assert_eq!(result.model_used, ROBERTA_BASE);
    }

    #[test]
    fn test_ensemble_falls_back_to_direct_model() {
        let text      = passage(1500);
        let extractor = Scripted::new(|_: &str, model: &str| {
            if model == DISTILBERT {
                Ok(Some(AnswerCandidate::new("fallback", 0.3, 0, 8)))
            } else {
                Ok(None)
            }
        });
        let qa = orchestrator(&extractor);

        let result = qa.process("Q?", &text, BERT_LARGE, StrategyRequest::Auto).unwrap();

        assert_eq!(result.strategy_used, Strategy::Ensemble);
        assert_eq!(result.answer(), "fallback");
        assert_eq!(result.model_used, DISTILBERT);

        // The fallback is a direct run: one call over the whole passage, last
        let calls = extractor.calls();
        let last  = calls.last().unwrap();
        assert_eq!(last.0, DISTILBERT);
        assert_eq!(last.1, text);
        assert_eq!(calls.iter().filter(|(m, _)| m == DISTILBERT).count(), 1);
    }

    #[test]
    fn test_ensemble_fallback_is_attempted_before_giving_up() {
        let extractor = Scripted::new(|_: &str, _: &str| Ok(None));
        let qa        = orchestrator(&extractor);

        assert!(qa.process("Q?", &passage(1500), DISTILBERT, StrategyRequest::Auto).is_none());
        assert_eq!(extractor.models_called().last().map(String::as_str), Some(DISTILBERT));
    }

    #[test]
    fn test_empty_context_is_not_sent_to_extractor() {
        let extractor = Scripted::new(|_: &str, _: &str| Ok(Some(AnswerCandidate::new("x", 1.0, 0, 1))));
        let qa        = orchestrator(&extractor);

        assert!(qa.process("Q?", "   ", DISTILBERT, StrategyRequest::Auto).is_none());
        assert!(extractor.calls().is_empty());
    }

    #[test]
    fn test_context_that_cleans_to_nothing_has_no_chunks() {
        let extractor = Scripted::new(|_: &str, _: &str| Ok(Some(AnswerCandidate::new("x", 1.0, 0, 1))));
        let qa        = orchestrator(&extractor);

        let chunked = StrategyRequest::Explicit(Strategy::Chunked);
        assert!(qa.process("Q?", "••• ★", DISTILBERT, chunked).is_none());
        assert!(extractor.calls().is_empty());
    }

    #[test]
    fn test_raised_cancel_flag_stops_before_first_chunk() {
        let extractor = Scripted::new(|_: &str, _: &str| Ok(Some(AnswerCandidate::new("x", 1.0, 0, 1))));
        let qa        = orchestrator(&extractor);
        let cancel    = AtomicBool::new(true);

        let result = qa.process_with_cancel("Q?", &passage(1500), DISTILBERT, StrategyRequest::Auto, &cancel);
        assert!(result.is_none());
        assert!(extractor.calls().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let extractor = always_fails();
        let cfg       = EngineConfig { max_words: 0, ..EngineConfig::default() };
        assert!(QaOrchestrator::new(&extractor, &cfg).is_err());
    }
}
