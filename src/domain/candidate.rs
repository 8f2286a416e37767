// ============================================================
// Layer 3 — Answer Candidate and QA Result
// ============================================================
// The core concept of extractive Q&A:
//   - We have a question
//   - We have a context passage (or one chunk of it)
//   - The answer is a SPAN within that text
//     (a start and end byte offset into the text)
//
// An AnswerCandidate is what one extraction pass produces.
// A QaResult is the winning candidate after ranking, extended
// with the metadata of the run that produced it.
//
// Example:
//   Question: "What is AI?"
//   Context:  "Artificial intelligence (AI) is intelligence demonstrated by machines, ..."
//   Answer:   bytes 32..69 → "intelligence demonstrated by machines"
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

use crate::domain::strategy::Strategy;

/// One scored answer span proposed by an extractor.
///
/// `start` and `end` are byte offsets into the text handed to the
/// extractor: the chunk text for chunked runs, the passage for direct runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCandidate {
    /// The extracted answer text
    pub answer: String,

    /// Model-reported confidence in [0, 1]
    pub score: f32,

    /// Byte offset of the first answer byte
    pub start: usize,

    /// Byte offset one past the last answer byte
    pub end: usize,

    /// Which chunk produced this candidate (chunked runs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,

    /// Which model produced this candidate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AnswerCandidate {
    pub fn new(answer: impl Into<String>, score: f32, start: usize, end: usize) -> Self {
        Self {
            answer:      answer.into(),
            score,
            start,
            end,
            chunk_index: None,
            model:       None,
        }
    }

    /// Tag the candidate with the chunk it came from
    pub fn with_chunk_index(mut self, index: usize) -> Self {
        self.chunk_index = Some(index);
        self
    }

    /// Tag the candidate with the model that produced it
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Coarse confidence bands used when presenting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: f32) -> Self {
        if score >= 0.8 {
            ConfidenceLevel::High
        } else if score >= 0.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfidenceLevel::High   => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low    => "low",
        };
        f.write_str(s)
    }
}

/// The orchestrator's final answer: the winning candidate plus
/// the metadata of the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaResult {
    #[serde(flatten)]
    pub candidate: AnswerCandidate,

    /// Wall-clock seconds spent inside `process`
    pub processing_time_secs: f64,

    /// The strategy that actually ran (never "auto")
    pub strategy_used: Strategy,

    /// The model that produced the winning candidate
    pub model_used: String,

    /// Other distinct answers, best first (ensemble runs only)
    pub alternate_answers: Vec<String>,
}

impl QaResult {
    pub fn answer(&self) -> &str {
        &self.candidate.answer
    }

    pub fn score(&self) -> f32 {
        self.candidate.score
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.candidate.score)
    }
}
