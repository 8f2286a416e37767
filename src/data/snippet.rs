// ============================================================
// Layer 4 — Context Window
// ============================================================
// Cuts a readable snippet of the source text around an answer,
// so the user can see where it came from:
//
//   "...intelligence (AI) is intelligence demonstrated by machines, as opposed..."
//
// The answer is located by text search rather than by offsets:
// offsets from a chunked run point into the cleaned chunk, not
// into the raw passage the user supplied.

/// Return up to `window` bytes of `text` on either side of the first
/// occurrence of `answer`, with "..." marking truncated ends.
/// Returns the whole text when the answer does not occur in it.
pub fn context_window(text: &str, answer: &str, window: usize) -> String {
    let answer = answer.trim();
    let pos = match text.find(answer) {
        Some(pos) if !answer.is_empty() => pos,
        _ => return text.to_string(),
    };

    let start = floor_char_boundary(text, pos.saturating_sub(window));
    let end   = ceil_char_boundary(text, (pos + answer.len() + window).min(text.len()));

    let mut snippet = String::with_capacity(end - start + 6);
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&text[start..end]);
    if end < text.len() {
        snippet.push_str("...");
    }
    snippet
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_marks_both_ends() {
        let text = "aaaa bbbb ANSWER cccc dddd";
        assert_eq!(context_window(text, "ANSWER", 5), "...bbbb ANSWER cccc...");
    }

    #[test]
    fn test_window_at_start_has_no_leading_ellipsis() {
        assert_eq!(context_window("ANSWER then more", "ANSWER", 5), "ANSWER then...");
    }

    #[test]
    fn test_missing_answer_returns_text() {
        assert_eq!(context_window("short text", "absent", 3), "short text");
        assert_eq!(context_window("short text", "  ", 3), "short text");
    }

    #[test]
    fn test_respects_char_boundaries() {
        // 'é' is two bytes; a 1-byte window would land inside it
        let snippet = context_window("é ANSWER é", "ANSWER", 2);
        assert_eq!(snippet, "é ANSWER é");
    }
}
