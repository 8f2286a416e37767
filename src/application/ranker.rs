// ============================================================
// Layer 2 — Answer Ranker
// ============================================================
// Orders answer candidates from many chunks (or many models)
// by confidence and keeps the best few.
//
// Rules:
//   - Highest score first
//   - Equal scores keep their input order (the sort is stable,
//     and input order carries chunk/model provenance)
//   - A later candidate with the same answer text as an earlier
//     one is dropped
//   - At most `top_n` candidates are returned
//   - NaN scores sort last

use std::collections::HashSet;

use crate::domain::candidate::AnswerCandidate;

/// Default number of candidates kept after ranking
pub const TOP_N: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct AnswerRanker {
    top_n: usize,
}

impl AnswerRanker {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Rank `candidates` without modifying them. Empty in, empty out.
    pub fn rank(&self, candidates: &[AnswerCandidate]) -> Vec<AnswerCandidate> {
        let mut sorted: Vec<&AnswerCandidate> = candidates.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| sort_key(b.score).total_cmp(&sort_key(a.score)));

        let mut seen: HashSet<&str>         = HashSet::new();
        let mut ranked: Vec<AnswerCandidate> = Vec::with_capacity(self.top_n);
        for candidate in sorted {
            if ranked.len() == self.top_n {
                break;
            }
            if seen.insert(candidate.answer.trim()) {
                ranked.push(candidate.clone());
            }
        }
        ranked
    }
}

fn sort_key(score: f32) -> f32 {
    if score.is_nan() { f32::NEG_INFINITY } else { score }
}
