// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans a raw passage before it is split into sentences.
//
// Pasted or uploaded text often contains:
//   - Curly quotes from word processors
//   - Bullets, arrows, emoji and other symbols
//   - Tabs, newlines and runs of spaces from formatting
//
// A QA model gains nothing from those, and they confuse
// sentence boundary detection.
//
// Cleaning steps (applied in order):
//   1. Normalise curly quotes to straight quotes
//   2. Replace characters outside the allow-list with a space
//      (word characters, whitespace, . , ? ! ; : ( ) [ ] " ' ` -)
//   3. Collapse runs of whitespace into a single space
//   4. Trim leading/trailing whitespace
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

/// Punctuation kept verbatim by `clean`.
const ALLOWED_PUNCTUATION: &[char] = &[
    '.', ',', '?', '!', ';', ':', '(', ')', '[', ']', '"', '\'', '`', '-',
];

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw passage. The output is single-spaced and trimmed.
    pub fn clean(&self, text: &str) -> String {

        // ── Step 1 + 2: Normalise individual characters ──────────────────────
        let mapped = text.chars().map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            c if c.is_alphanumeric() || c == '_' => c,
            c if ALLOWED_PUNCTUATION.contains(&c) => c,
            // Whitespace and everything outside the allow-list
            _ => ' ',
        });

        // ── Step 3 + 4: Collapse spaces and trim ──────────────────────────────
        let mut out        = String::with_capacity(text.len());
        let mut last_space = true; // swallows leading spaces

        for c in mapped {
            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        // At most one trailing space can survive the loop
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
