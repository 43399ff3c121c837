//! Built-in English pipeline assembled from the rule-based stages.

use super::sentences::{self, Layout};
use super::tokenizer::{self, RawToken};
use super::{chunker, lemmatizer, ner, tagger};
use super::{AnalyzedDoc, Pipeline, PipelineOptions, Token};
use crate::utils::CharIndex;

/// Rule-based English pipeline: tokenizer, sentence splitter, tagger,
/// lemmatizer, noun chunker and named-entity recognizer.
///
/// Stateless, so one instance serves every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedPipeline;

impl RuleBasedPipeline {
    pub fn new() -> Self {
        Self
    }

    fn analyze(&self, text: String, raw: Vec<RawToken>, options: &PipelineOptions) -> AnalyzedDoc {
        let words: Vec<&str> = raw.iter().map(|t| t.text.as_str()).collect();
        let layout: Vec<Layout> = raw
            .iter()
            .enumerate()
            .map(|(i, t)| Layout {
                glued: i > 0 && raw[i - 1].end == t.start,
                paragraph_start: t.paragraph_start,
            })
            .collect();

        let sentences = sentences::segment(&words, &layout);
        let mut sentence_starts = vec![false; words.len()];
        for sentence in &sentences {
            if let Some(flag) = sentence_starts.get_mut(sentence.start) {
                *flag = true;
            }
        }

        let tags = tagger::tag(&words, &sentence_starts);
        let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
        let noun_chunks = chunker::noun_chunks(&tag_refs, &sentences);
        let entities = ner::recognize(&words, &tag_refs, &sentences, options.ner_model);

        let index = CharIndex::new(&text);
        let tokens = raw
            .iter()
            .zip(&tags)
            .map(|(t, tag)| Token {
                text: t.text.clone(),
                idx: index.byte_to_char(t.start),
                tag: tag.clone(),
                lemma: lemmatizer::lemmatize(&t.text, tag),
            })
            .collect();

        tracing::trace!(
            tokens = raw.len(),
            sentences = sentences.len(),
            entities = entities.len(),
            "Analyzed text"
        );

        AnalyzedDoc {
            text,
            tokens,
            sentences,
            noun_chunks,
            entities,
        }
    }
}

impl Pipeline for RuleBasedPipeline {
    fn name(&self) -> &str {
        "rule-based-en"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn process(&self, text: &str, options: &PipelineOptions) -> AnalyzedDoc {
        let raw = tokenizer::tokenize(text);
        self.analyze(text.to_string(), raw, options)
    }

    fn process_pretokenized(&self, words: &[String], options: &PipelineOptions) -> AnalyzedDoc {
        let text = words.join(" ");
        let mut raw = Vec::with_capacity(words.len());
        let mut offset = 0;
        for word in words {
            raw.push(RawToken {
                text: word.clone(),
                start: offset,
                end: offset + word.len(),
                paragraph_start: false,
            });
            offset += word.len() + 1;
        }
        self.analyze(text, raw, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{NerModel, Span};

    fn run(text: &str) -> AnalyzedDoc {
        RuleBasedPipeline::new().process(text, &PipelineOptions::default())
    }

    #[test]
    fn test_full_sentence() {
        let doc = run("Barack Obama was born in Hawaii.");

        let words: Vec<&str> = doc.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Barack", "Obama", "was", "born", "in", "Hawaii", "."]);

        let tags: Vec<&str> = doc.tokens.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["NNP", "NNP", "VBD", "VBN", "IN", "NNP", "."]);

        let lemmas: Vec<&str> = doc.tokens.iter().map(|t| t.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["Barack", "Obama", "be", "bear", "in", "Hawaii", "."]);

        assert_eq!(doc.sentences, vec![Span::new(0, 7)]);
        assert_eq!(doc.noun_chunks, vec![Span::new(0, 2), Span::new(5, 6)]);
        assert_eq!(
            doc.entities,
            vec![Span::labeled(0, 2, "PERSON"), Span::labeled(5, 6, "GPE")]
        );
        assert_eq!(doc.span_text(&doc.entities[0]), "Barack Obama");
    }

    #[test]
    fn test_offsets_are_char_based() {
        let text = "Café owners in São Paulo.";
        let doc = run(text);
        for token in &doc.tokens {
            assert_eq!(crate::utils::char_slice(text, token.idx, token.end()), token.text);
        }
        let paulo = doc.tokens.iter().find(|t| t.text == "Paulo").unwrap();
        assert_eq!(paulo.idx, 19);
    }

    #[test]
    fn test_pretokenized_keeps_tokens() {
        let words: Vec<String> = ["barack", "obama", "visited", "hawaii"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let options = PipelineOptions {
            ner_model: NerModel::Uncased,
        };
        let doc = RuleBasedPipeline::new().process_pretokenized(&words, &options);

        assert_eq!(doc.text, "barack obama visited hawaii");
        assert_eq!(doc.tokens.len(), 4);
        let starts: Vec<usize> = doc.tokens.iter().map(|t| t.idx).collect();
        assert_eq!(starts, vec![0, 7, 13, 21]);
        assert_eq!(
            doc.entities,
            vec![Span::labeled(0, 2, "PERSON"), Span::labeled(3, 4, "GPE")]
        );
    }

    #[test]
    fn test_multiple_sentences() {
        let doc = run("It rained. We stayed home!");
        assert_eq!(doc.sentences, vec![Span::new(0, 3), Span::new(3, 7)]);
    }

    #[test]
    fn test_empty_text() {
        let doc = run("");
        assert!(doc.tokens.is_empty());
        assert!(doc.sentences.is_empty());
        assert!(doc.entities.is_empty());
    }
}
