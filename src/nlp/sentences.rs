//! Sentence boundary detection over tokens.

use super::Span;

/// Layout facts about a token needed for segmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    /// Starts exactly where the previous token ended (no whitespace).
    pub glued: bool,
    /// Preceded by a blank line.
    pub paragraph_start: bool,
}

fn is_terminal(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| matches!(c, '.' | '!' | '?' | '…'))
}

fn is_closing(word: &str) -> bool {
    matches!(word, ")" | "]" | "}" | "\"" | "'" | "”" | "’" | "»")
}

/// Split a token sequence into sentences.
///
/// A run of terminal punctuation ends a sentence, together with any closing
/// quotes or brackets glued to it. A blank line always starts a new one.
/// `layout` may be shorter than `words`; missing entries count as default.
pub fn segment(words: &[&str], layout: &[Layout]) -> Vec<Span> {
    let layout_at = |i: usize| layout.get(i).copied().unwrap_or_default();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < words.len() {
        if i > start && layout_at(i).paragraph_start {
            sentences.push(Span::new(start, i));
            start = i;
        }
        if is_terminal(words[i]) {
            let mut end = i + 1;
            while end < words.len()
                && (is_terminal(words[end]) || (is_closing(words[end]) && layout_at(end).glued))
            {
                end += 1;
            }
            sentences.push(Span::new(start, end));
            start = end;
            i = end;
            continue;
        }
        i += 1;
    }
    if start < words.len() {
        sentences.push(Span::new(start, words.len()));
    }

    sentences
}
