//! Rule-based English tokenizer.
//!
//! Splits on whitespace, then peels prefix and suffix punctuation and English
//! clitics off each chunk. Abbreviations, initials, URLs and e-mail addresses
//! are kept whole; internal hyphens, apostrophes and decimal points never
//! split a token.

use std::sync::LazyLock;

use regex::Regex;

use super::lexicon;

/// A token with byte offsets into the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Preceded by a blank line.
    pub paragraph_start: bool,
}

const PREFIX_CHARS: &[char] = &[
    '(', '[', '{', '"', '\'', '`', '“', '‘', '«', '¿', '¡', '$', '£', '€', '¥', '#',
];

const SUFFIX_CHARS: &[char] = &[
    ')', ']', '}', '"', '\'', '”', '’', ',', ';', ':', '!', '?', '%', '»', '…',
];

const CLITICS: &[&str] = &[
    "n't", "n’t", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'s", "’s", "'m", "’m", "'d", "’d",
];

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:https?://|www\.)\S+$").expect("url pattern should compile")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$").expect("email pattern should compile")
});

/// Tokenize `text`, preserving byte offsets.
pub fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut chunk_start: Option<usize> = None;
    let mut newlines = 0usize;
    let mut paragraph_break = false;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = chunk_start.take() {
                split_chunk(text, start, i, paragraph_break, &mut tokens);
                paragraph_break = false;
                newlines = 0;
            }
            if c == '\n' {
                newlines += 1;
                if newlines >= 2 && !tokens.is_empty() {
                    paragraph_break = true;
                }
            }
        } else if chunk_start.is_none() {
            chunk_start = Some(i);
        }
    }
    if let Some(start) = chunk_start {
        split_chunk(text, start, text.len(), paragraph_break, &mut tokens);
    }

    tokens
}

fn split_chunk(text: &str, start: usize, end: usize, paragraph_start: bool, out: &mut Vec<RawToken>) {
    let mut lo = start;
    let mut hi = end;
    let mut prefixes: Vec<(usize, usize)> = Vec::new();
    let mut suffixes: Vec<(usize, usize)> = Vec::new();

    while lo < hi {
        let s = &text[lo..hi];
        if is_exception(s) {
            break;
        }
        match s.chars().next() {
            Some(c) if PREFIX_CHARS.contains(&c) && s.len() > c.len_utf8() => {
                prefixes.push((lo, lo + c.len_utf8()));
                lo += c.len_utf8();
            }
            _ => break,
        }
    }

    while lo < hi {
        let s = &text[lo..hi];
        if is_exception(s) {
            break;
        }
        match suffix_len(s) {
            Some(n) => {
                suffixes.push((hi - n, hi));
                hi -= n;
            }
            None => break,
        }
    }

    let mut pieces = prefixes;
    if lo < hi {
        pieces.push((lo, hi));
    }
    pieces.extend(suffixes.into_iter().rev());

    for (n, (s, e)) in pieces.into_iter().enumerate() {
        out.push(RawToken {
            text: text[s..e].to_string(),
            start: s,
            end: e,
            paragraph_start: paragraph_start && n == 0,
        });
    }
}

/// Chunks that must not lose any more characters.
fn is_exception(s: &str) -> bool {
    if CLITICS.iter().any(|c| s.eq_ignore_ascii_case(c)) {
        return true;
    }
    let last = s.chars().last().unwrap_or(' ');
    if (URL.is_match(s) || EMAIL.is_match(s)) && (last.is_alphanumeric() || last == '/') {
        return true;
    }
    false
}

/// Byte length of the suffix to split off `s`, if any.
fn suffix_len(s: &str) -> Option<usize> {
    let char_count = s.chars().count();
    if char_count < 2 {
        return None;
    }

    if s.ends_with("...") {
        return if char_count > 3 { Some(3) } else { None };
    }

    let last = s.chars().last()?;
    if SUFFIX_CHARS.contains(&last) {
        return Some(last.len_utf8());
    }

    if last == '.' {
        return if lexicon::is_abbreviation(s) { None } else { Some(1) };
    }

    CLITICS
        .iter()
        .find(|clitic| {
            s.len() > clitic.len()
                && s.is_char_boundary(s.len() - clitic.len())
                && s[s.len() - clitic.len()..].eq_ignore_ascii_case(clitic)
        })
        .map(|clitic| clitic.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_simple_sentence() {
        assert_eq!(
            texts("Barack Obama was born in Hawaii."),
            vec!["Barack", "Obama", "was", "born", "in", "Hawaii", "."]
        );
    }

    #[test]
    fn test_offsets_point_into_text() {
        let text = "He said: \"Go!\"";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
        assert_eq!(texts(text), vec!["He", "said", ":", "\"", "Go", "!", "\""]);
    }

    #[test]
    fn test_clitics() {
        assert_eq!(texts("I can't go."), vec!["I", "ca", "n't", "go", "."]);
        assert_eq!(texts("It's John's."), vec!["It", "'s", "John", "'s", "."]);
        assert_eq!(texts("We'll see"), vec!["We", "'ll", "see"]);
    }

    #[test]
    fn test_abbreviations_stay_whole() {
        assert_eq!(
            texts("Mr. Smith moved to the U.S. in 1990."),
            vec!["Mr.", "Smith", "moved", "to", "the", "U.S.", "in", "1990", "."]
        );
    }

    #[test]
    fn test_brackets_and_currency() {
        assert_eq!(texts("($5.50)"), vec!["(", "$", "5.50", ")"]);
        assert_eq!(texts("50%"), vec!["50", "%"]);
    }

    #[test]
    fn test_urls_and_emails() {
        assert_eq!(
            texts("See https://example.org/a, or mail me@example.com."),
            vec!["See", "https://example.org/a", ",", "or", "mail", "me@example.com", "."]
        );
    }

    #[test]
    fn test_ellipsis_and_hyphen() {
        assert_eq!(texts("well-known..."), vec!["well-known", "..."]);
        assert_eq!(texts("..."), vec!["..."]);
    }

    #[test]
    fn test_multibyte_offsets() {
        let text = "Café “Noir”.";
        let tokens = tokenize(text);
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Café", "“", "Noir", "”", "."]);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_paragraph_breaks() {
        let tokens = tokenize("One.\n\nTwo.\nThree.");
        let flagged: Vec<&str> = tokens
            .iter()
            .filter(|t| t.paragraph_start)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(flagged, vec!["Two"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t ").is_empty());
    }
}
