// ============================================================
// Layer 6 — Question History
// ============================================================
// Keeps a record of every answered question in an interactive
// session so the user can look back at earlier answers.
//
// History is in-memory only: it lives as long as the session
// and is never written to disk.
//
// Each entry records:
//   - question:  what was asked
//   - answer:    the winning answer text
//   - score:     its confidence in [0, 1]
//   - model:     the model that produced it
//   - timestamp: local time the answer was produced
//
// Example listing:
//   [2026-10-19 14:02:11] What is AI? → intelligence demonstrated by machines (1.0000, distilbert-base-uncased-distilled-squad)

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::candidate::QaResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub question:  String,
    pub answer:    String,
    pub score:     f32,
    pub model:     String,
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    pub fn from_result(question: impl Into<String>, result: &QaResult) -> Self {
        Self {
            question:  question.into(),
            answer:    result.answer().to_string(),
            score:     result.score(),
            model:     result.model_used.clone(),
            timestamp: Local::now(),
        }
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} → {} ({:.4}, {})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.question,
            self.answer,
            self.score,
            self.model
        )
    }
}

/// Answered questions in the order they were asked.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answered question. Unanswered questions are not recorded.
    pub fn record(&mut self, question: &str, result: &QaResult) {
        let entry = HistoryEntry::from_result(question, result);
        tracing::debug!("History entry {}: {}", self.entries.len() + 1, entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
