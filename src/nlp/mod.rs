//! NLP pipeline abstraction.
//!
//! Provides a `Pipeline` trait for pluggable analysis backends and a built-in
//! `RuleBasedPipeline` for English. The annotator only sees the trait, so a
//! model-backed implementation can be dropped in without touching the MMIF
//! side.

pub mod chunker;
pub mod gazetteer;
pub mod lemmatizer;
pub mod lexicon;
pub mod ner;
pub mod rule_based;
pub mod sentences;
pub mod tagger;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use rule_based::RuleBasedPipeline;

/// One token as reported by a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Char offset of the first character in the analysed text.
    pub idx: usize,
    /// Fine-grained (Penn Treebank) part-of-speech tag.
    pub tag: String,
    pub lemma: String,
}

impl Token {
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Char offset one past the last character.
    pub fn end(&self) -> usize {
        self.idx + self.char_len()
    }
}

/// A token-position range (`start..end`, end exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    pub fn labeled(start: usize, end: usize, label: &str) -> Self {
        Self {
            start,
            end,
            label: Some(label.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Output of a pipeline run over one text.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedDoc {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<Span>,
    pub noun_chunks: Vec<Span>,
    pub entities: Vec<Span>,
}

impl AnalyzedDoc {
    /// Char range covered by a span's tokens, if the span is in bounds.
    pub fn char_range(&self, span: &Span) -> Option<(usize, usize)> {
        if span.is_empty() || span.end > self.tokens.len() {
            return None;
        }
        Some((self.tokens[span.start].idx, self.tokens[span.end - 1].end()))
    }

    /// Surface text of a span, taken from the analysed text.
    pub fn span_text(&self, span: &Span) -> String {
        match self.char_range(span) {
            Some((start, end)) => crate::utils::char_slice(&self.text, start, end).to_string(),
            None => String::new(),
        }
    }
}

/// Which named-entity model to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NerModel {
    /// Relies on capitalization cues.
    #[default]
    Cased,
    /// Case-insensitive, for lower-cased text such as ASR transcripts.
    Uncased,
}

/// Per-call options for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub ner_model: NerModel,
}

/// Trait for pluggable NLP pipelines.
///
/// Implementations must be usable from many requests at once through a
/// shared reference; nothing here takes `&mut self`.
pub trait Pipeline: Send + Sync {
    /// Human-readable pipeline identifier.
    fn name(&self) -> &str;

    /// Version reported as `analyzer_version` in app metadata.
    fn version(&self) -> &str;

    /// Run every stage, tokenization included, over raw text.
    fn process(&self, text: &str, options: &PipelineOptions) -> AnalyzedDoc;

    /// Run every stage except tokenization over an existing token sequence.
    /// The analysed text is the words joined by single spaces.
    fn process_pretokenized(&self, words: &[String], options: &PipelineOptions) -> AnalyzedDoc;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> AnalyzedDoc {
        let text = "Ça va bien.".to_string();
        let tokens = vec![
            Token {
                text: "Ça".into(),
                idx: 0,
                tag: "PRP".into(),
                lemma: "ça".into(),
            },
            Token {
                text: "va".into(),
                idx: 3,
                tag: "VBZ".into(),
                lemma: "aller".into(),
            },
            Token {
                text: "bien".into(),
                idx: 6,
                tag: "RB".into(),
                lemma: "bien".into(),
            },
            Token {
                text: ".".into(),
                idx: 10,
                tag: ".".into(),
                lemma: ".".into(),
            },
        ];
        AnalyzedDoc {
            text,
            tokens,
            sentences: vec![Span::new(0, 4)],
            ..Default::default()
        }
    }

    #[test]
    fn test_token_end_counts_chars() {
        let d = doc();
        assert_eq!(d.tokens[0].end(), 2);
    }

    #[test]
    fn test_span_text_and_range() {
        let d = doc();
        assert_eq!(d.char_range(&Span::new(0, 4)), Some((0, 11)));
        assert_eq!(d.span_text(&Span::new(1, 3)), "va bien");
        assert_eq!(d.char_range(&Span::new(2, 9)), None);
        assert_eq!(d.span_text(&Span::new(3, 3)), "");
    }

    #[test]
    fn test_span_overlap() {
        assert!(Span::new(0, 2).overlaps(&Span::new(1, 3)));
        assert!(!Span::new(0, 2).overlaps(&Span::new(2, 3)));
    }
}
