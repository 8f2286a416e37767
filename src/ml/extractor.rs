// ============================================================
// Layer 5 — Lexical Answer Extractor
// ============================================================
// A deterministic stand-in for a neural span predictor. It picks
// an answer span by term overlap instead of by logits, which
// makes the CLI usable without model weights and gives tests a
// real extractor to run against.
//
// Strategy:
//   1. Pull key terms out of the question (lowercase, drop
//      punctuation and stop words)
//   2. Split the text into sentences and score each one by the
//      total length of the key terms it contains as whole words;
//      longer, more specific terms outweigh short generic ones
//   3. In the best sentence, the answer starts after the LAST
//      matched term, skipping linking words ("is", "was", "by")
//      and bare dashes, and runs to the next clause punctuation:
//
//        Q: "What is AI?"
//        S: "Artificial intelligence (AI) is intelligence demonstrated by machines, ..."
//                                    ^^^^ match   ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ answer
//
//      If nothing follows the last match, the words before the
//      first match are used instead ("Alexander Fleming discovered
//      penicillin." answers "Who discovered penicillin?")
//   4. Score = matched term weight / total term weight
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use crate::data::sentences::RuleSentenceSplitter;
use crate::domain::candidate::AnswerCandidate;
use crate::domain::error::ExtractionError;
use crate::domain::traits::{AnswerExtractor, SentenceSplitter};
use crate::ml::registry::ModelRegistry;

/// Longest answer span, in words
const MAX_ANSWER_WORDS: usize = 30;

const STOP_WORDS: &[&str] = &[
    "what", "when", "where", "which", "who", "whom", "whose", "why", "how",
    "does", "did", "do", "will", "can", "this", "that", "these", "those",
    "have", "has", "had", "from", "the", "and", "for", "are", "was", "were",
    "is", "an", "of", "in", "on", "to", "it", "its", "by", "be", "as", "at",
    "with", "about", "there", "their", "or",
];

/// Skipped at the start of an answer span
const LINKING_WORDS: &[&str] = &[
    "is", "are", "was", "were", "by", "called", "named", "refers", "to",
];

pub struct LexicalExtractor {
    registry: ModelRegistry,
    splitter: RuleSentenceSplitter,
}

impl LexicalExtractor {
    /// Serve every model id known to `registry`.
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry, splitter: RuleSentenceSplitter::new() }
    }
}

impl Default for LexicalExtractor {
    fn default() -> Self {
        Self::new(ModelRegistry::builtin())
    }
}

impl AnswerExtractor for LexicalExtractor {
    fn extract(
        &self,
        question: &str,
        text:     &str,
        model_id: &str,
    ) -> Result<Option<AnswerCandidate>, ExtractionError> {
        if !self.registry.contains(model_id) {
            return Err(ExtractionError::UnknownModel(model_id.to_string()));
        }
        if question.trim().is_empty() || text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let terms = key_terms(question);
        if terms.is_empty() {
            tracing::debug!("No key terms in question '{}'", question);
            return Ok(None);
        }
        let total_weight: usize = terms.iter().map(|t| t.len()).sum();

        // Best sentence as (weight, byte offset, byte length)
        let mut best: Option<(usize, usize, usize)> = None;
        let mut cursor = 0usize;

        for sentence in self.splitter.split(text) {
            // Sentences are trimmed slices of `text`, in order
            let Some(rel) = text[cursor..].find(sentence.as_str()) else {
                continue;
            };
            let offset = cursor + rel;
            cursor     = offset + sentence.len();

            let weight = matched_weight(&sentence, &terms);
            if weight > best.map_or(0, |b| b.0) {
                best = Some((weight, offset, sentence.len()));
            }
        }

        let Some((weight, offset, len)) = best else {
            return Ok(None);
        };

        let sentence = &text[offset..offset + len];
        let Some((start, end)) = answer_span(sentence, &terms) else {
            return Ok(None);
        };

        let score = (weight as f32 / total_weight as f32).clamp(0.0, 1.0);
        let (start, end) = (offset + start, offset + end);

        tracing::debug!(
            "Span [{},{}) conf={:.4} answer='{}'",
            start,
            end,
            score,
            &text[start..end]
        );

        Ok(Some(AnswerCandidate::new(&text[start..end], score, start, end)))
    }
}

/// Lowercase a word and strip surrounding punctuation.
fn normalise(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}

/// Distinct content words of the question, in order of appearance.
fn key_terms(question: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in question.split_whitespace() {
        let w = normalise(word);
        if w.chars().count() < 2 || STOP_WORDS.contains(&w.as_str()) {
            continue;
        }
        if !terms.contains(&w) {
            terms.push(w);
        }
    }
    terms
}

/// Total length of the distinct key terms occurring in `sentence` as whole words.
fn matched_weight(sentence: &str, terms: &[String]) -> usize {
    let words: Vec<String> = sentence.split_whitespace().map(normalise).collect();
    terms
        .iter()
        .filter(|t| words.contains(t))
        .map(|t| t.len())
        .sum()
}

/// Whitespace-separated words of `text` with their byte offsets.
fn word_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, &text[s..]));
    }
    spans
}

fn is_linking(word: &str) -> bool {
    LINKING_WORDS.contains(&normalise(word).as_str())
}

/// Dashes, stray brackets and the like: words with nothing to read.
fn is_bare_punctuation(word: &str) -> bool {
    !word.chars().any(char::is_alphanumeric)
}

/// Drop bare-punctuation words from both ends of a span.
fn trim_bare_punctuation(mut span: Vec<(usize, &str)>) -> Vec<(usize, &str)> {
    while span.last().is_some_and(|(_, w)| is_bare_punctuation(w)) {
        span.pop();
    }
    let lead = span.iter().take_while(|(_, w)| is_bare_punctuation(w)).count();
    span.drain(..lead);
    span
}

/// Byte range of the answer inside `sentence`, trimmed of outer punctuation.
fn answer_span(sentence: &str, terms: &[String]) -> Option<(usize, usize)> {
    let words   = word_spans(sentence);
    let matched: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, (_, w))| terms.contains(&normalise(w)))
        .map(|(i, _)| i)
        .collect();

    let first = *matched.first()?;
    let last  = *matched.last()?;

    // Preferred: the clause after the last matched term
    let mut i = last + 1;
    while i < words.len() && (is_bare_punctuation(words[i].1) || is_linking(words[i].1)) {
        i += 1;
    }
    let mut span: Vec<(usize, &str)> = Vec::new();
    for &(pos, w) in words[i.min(words.len())..].iter().take(MAX_ANSWER_WORDS) {
        span.push((pos, w));
        if w.ends_with([',', ';', ':', '.', '!', '?']) {
            break;
        }
    }

    // Fallbacks: the words before the first match, then the whole sentence
    let mut span = trim_bare_punctuation(span);
    if span.is_empty() {
        span = trim_bare_punctuation(
            words[..first].iter().rev().take(MAX_ANSWER_WORDS).rev().copied().collect(),
        );
    }
    if span.is_empty() {
        span = trim_bare_punctuation(words.clone());
    }

    let (first_pos, first_word) = *span.first()?;
    let (last_pos, last_word)   = *span.last()?;

    let lead  = first_word.len() - first_word.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
    let start = first_pos + lead;
    let end   = last_pos + last_word.trim_end_matches(|c: char| !c.is_alphanumeric()).len();

    (start < end).then_some((start, end))
}
