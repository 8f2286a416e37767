// ============================================================
// Layer 4 — Sentence Splitter
// ============================================================
// Finds sentence boundaries in normalised text so chunks can be
// cut between sentences instead of in the middle of one.
//
// A boundary is terminal punctuation (. ! ?), optionally followed
// by closing quotes or brackets, then whitespace, then something
// that does not start with a lowercase letter:
//
//   "It rained. Then it stopped."   → 2 sentences
//   "It rained. then it stopped."   → 1 sentence
//
// Full stops after common abbreviations ("Dr.", "e.g.") are not
// boundaries. Neither is one after a single capital letter when
// the next word reads like a name ("J. Smith", "J. R. R. Tolkien").
// If the next word is a common sentence opener the letter ends
// the sentence instead ("grade A. Next year", "Vitamin C. It").
// A one-letter sentence end followed by a proper noun
// ("Plan B. Smith agreed.") is still read as an initial.
//
// Text after the last boundary is kept as the final sentence,
// even without terminal punctuation, so nothing is ever dropped.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::traits::SentenceSplitter;

static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.!?]+["')\]`]*\s+"#).expect("sentence boundary pattern is valid")
});

/// Lowercased tokens (without their final dot) that end in a full stop
/// but do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs",
    "e.g", "i.e", "inc", "ltd", "fig", "u.s", "a.m", "p.m",
];

/// Capitalised words that usually open a sentence rather than
/// continue a name after an initial.
const SENTENCE_OPENERS: &[&str] = &[
    "a", "an", "the", "it", "its", "this", "that", "these", "those", "there",
    "then", "he", "she", "they", "we", "i", "you", "in", "on", "at", "but",
    "and", "so", "next", "after", "however", "when", "while", "if", "as", "for",
];

/// Punctuation-driven splitter with an abbreviation list.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleSentenceSplitter;

impl RuleSentenceSplitter {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSplitter for RuleSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start     = 0usize;

        for m in BOUNDARY.find_iter(text) {
            // Only split when the next sentence looks like one
            match text[m.end()..].chars().next() {
                None                        => continue,
                Some(c) if c.is_lowercase() => continue,
                Some(_)                     => {}
            }

            if is_abbreviation(&text[start..m.start()], m.as_str(), &text[m.end()..]) {
                continue;
            }

            // Keep punctuation and closing quotes, drop the whitespace
            let terminator_end = m.start() + m.as_str().trim_end().len();
            let sentence       = text[start..terminator_end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = m.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        sentences
    }
}

/// True when the full stop that ends `before` belongs to an abbreviation
/// or an initial rather than to the end of a sentence. `after` is the
/// text following the boundary.
fn is_abbreviation(before: &str, terminator: &str, after: &str) -> bool {
    // "?" and "!" always end a sentence; so does an ellipsis
    if !terminator.starts_with('.') || terminator.starts_with("..") {
        return false;
    }

    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_uppercase() {
            return continues_name(after);
        }
    }

    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

/// Whether the word after an initial reads as the rest of a name:
/// another initial, or a capitalised word that isn't a sentence opener.
fn continues_name(after: &str) -> bool {
    let Some(next) = after.split_whitespace().next() else {
        return false;
    };
    let next = next.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = next.chars();
    match (chars.next(), chars.next()) {
        (Some(c), Some('.')) if c.is_uppercase() => true,
        (Some(c), _) if c.is_uppercase() => {
            let word = normalised_word(next);
            !SENTENCE_OPENERS.contains(&word.as_str())
        }
        _ => false,
    }
}

fn normalised_word(word: &str) -> String {
    word.trim_end_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}
