//! Noun chunk detection.
//!
//! Pattern matching over Penn tags, within one sentence at a time:
//! `(DET)? (ADJ|NUM)* (NOUN)+ (POS (ADJ|NUM)* (NOUN)+)*`, or a lone
//! personal/wh- pronoun.

use super::Span;

fn is_determiner(tag: &str) -> bool {
    matches!(tag, "DT" | "PDT" | "PRP$" | "WDT" | "WP$")
}

fn is_modifier(tag: &str) -> bool {
    matches!(tag, "JJ" | "JJR" | "JJS" | "CD")
}

fn is_noun(tag: &str) -> bool {
    matches!(tag, "NN" | "NNS" | "NNP" | "NNPS")
}

/// Extract non-overlapping noun chunks, left to right.
pub fn noun_chunks(tags: &[&str], sentences: &[Span]) -> Vec<Span> {
    let mut chunks = Vec::new();

    for sentence in sentences {
        let end = sentence.end.min(tags.len());
        let mut i = sentence.start;
        while i < end {
            match match_chunk(tags, i, end) {
                Some(chunk_end) => {
                    chunks.push(Span::new(i, chunk_end));
                    i = chunk_end;
                }
                None => i += 1,
            }
        }
    }

    chunks
}

/// End of the chunk starting at `start`, if one does.
fn match_chunk(tags: &[&str], start: usize, end: usize) -> Option<usize> {
    if matches!(tags[start], "PRP" | "WP") {
        return Some(start + 1);
    }

    let mut j = start;
    if is_determiner(tags[j]) {
        j += 1;
    }
    j = match_nominal(tags, j, end)?;

    // Possessive continuation: "the president 's wife".
    while j < end && tags[j] == "POS" {
        match match_nominal(tags, j + 1, end) {
            Some(next) => j = next,
            None => break,
        }
    }

    Some(j)
}

/// `(ADJ|NUM)* (NOUN)+` starting at `j`.
fn match_nominal(tags: &[&str], mut j: usize, end: usize) -> Option<usize> {
    while j < end && is_modifier(tags[j]) {
        j += 1;
    }
    let noun_start = j;
    while j < end && is_noun(tags[j]) {
        j += 1;
    }
    (j > noun_start).then_some(j)
}
