//! Turns text documents in an MMIF into pipeline views.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::params::RuntimeParams;
use super::token_index::{TokenIndex, TokenRef};
use crate::config::Settings;
use crate::error::{Result, WrapperError};
use crate::models::metadata::app_identifier;
use crate::models::{vocabulary, Annotation, AppMetadata, Mmif, TextDocumentRef, View};
use crate::nlp::{AnalyzedDoc, Pipeline, RuleBasedPipeline, Span};
use crate::utils::char_slice;
use crate::services::linking::{EntityLinker, LinkMap, SpotlightLinker};
use crate::services::text_source::TextSource;

/// What the pipeline runs over for one document.
enum PipelineInput {
    Text(String),
    /// Words of an earlier tokenization, with references back to it.
    Tokens {
        words: Vec<String>,
        refs: Vec<TokenRef>,
    },
}

/// A named entity ready to be written.
#[derive(Debug, Clone, PartialEq)]
struct EntityOut {
    span: Span,
    category: Option<String>,
    kbid: Option<String>,
}

/// Result of a failed `process` call: the input MMIF plus an error view.
#[derive(Debug)]
pub struct ProcessingFailure {
    pub mmif: Mmif,
    pub error: WrapperError,
}

/// The MMIF adapter around a pipeline.
///
/// Shared across requests; holds no per-request state.
pub struct Annotator {
    pipeline: Arc<dyn Pipeline>,
    linker: Option<Arc<dyn EntityLinker>>,
    text_source: TextSource,
    app: String,
    default_pretty: bool,
}

impl Annotator {
    pub fn new(pipeline: Arc<dyn Pipeline>) -> Self {
        Self {
            pipeline,
            linker: None,
            text_source: TextSource::default(),
            app: app_identifier(),
            default_pretty: false,
        }
    }

    /// Built-in pipeline, plus a Spotlight linker when one is configured.
    pub fn from_settings(settings: &Settings) -> Self {
        let annotator = Self::new(Arc::new(RuleBasedPipeline::new()))
            .with_text_source(TextSource::new(settings.request_timeout))
            .with_default_pretty(settings.pretty);

        match &settings.linker_endpoint {
            Some(endpoint) => annotator.with_linker(Arc::new(SpotlightLinker::new(
                endpoint,
                settings.linker_confidence,
                settings.request_timeout,
            ))),
            None => annotator,
        }
    }

    pub fn with_linker(mut self, linker: Arc<dyn EntityLinker>) -> Self {
        self.linker = Some(linker);
        self
    }

    pub fn with_text_source(mut self, text_source: TextSource) -> Self {
        self.text_source = text_source;
        self
    }

    pub fn with_default_pretty(mut self, pretty: bool) -> Self {
        self.default_pretty = pretty;
        self
    }

    pub fn metadata(&self) -> AppMetadata {
        AppMetadata::new(self.pipeline.as_ref())
    }

    pub fn default_pretty(&self) -> bool {
        self.default_pretty
    }

    /// Annotate, and on failure return the untouched input with an error
    /// view appended instead of a partial result.
    pub async fn process(
        &self,
        input: Mmif,
        params: &RuntimeParams,
    ) -> std::result::Result<Mmif, ProcessingFailure> {
        let mut mmif = input.clone();
        match self.annotate(&mut mmif, params).await {
            Ok(()) => Ok(mmif),
            Err(error) => {
                warn!("Annotation failed: {}", error);
                let mut mmif = input;
                mmif.add_error_view(&self.app, &error.to_string());
                Err(ProcessingFailure { mmif, error })
            }
        }
    }

    /// Add one view per text document, in document order.
    pub async fn annotate(&self, mmif: &mut Mmif, params: &RuntimeParams) -> Result<()> {
        if mmif.metadata.mmif.is_empty() {
            mmif.metadata.mmif = vocabulary::mmif_spec_uri();
        }

        let documents = mmif.text_documents();
        info!("Annotating {} text document(s)", documents.len());

        for document in &documents {
            let view = self.annotate_document(mmif, document, params).await?;
            debug!(
                "View {} for {} has {} annotations",
                view.id,
                document.qualified_id(),
                view.annotations.len()
            );
            mmif.views.push(view);
        }

        Ok(())
    }

    async fn annotate_document(
        &self,
        mmif: &Mmif,
        document: &TextDocumentRef,
        params: &RuntimeParams,
    ) -> Result<View> {
        if let Some(language) = document.language.as_deref().filter(|l| !is_english(l)) {
            warn!(
                "Document {} is tagged '{}'; analysing it as English",
                document.qualified_id(),
                language
            );
        }

        let prior = if params.pretokenized {
            prior_tokens(mmif, document)?
        } else {
            None
        };
        // Span text is cut from the source when token offsets point into it.
        let source_text = prior.as_ref().and(document.text.clone());
        let input = match prior {
            Some((words, refs)) => PipelineInput::Tokens { words, refs },
            None => PipelineInput::Text(self.text_source.read(document).await?),
        };

        let options = params.pipeline_options();
        let pipeline = Arc::clone(&self.pipeline);
        let (doc, refs) = tokio::task::spawn_blocking(move || match input {
            PipelineInput::Text(text) => (pipeline.process(&text, &options), None),
            PipelineInput::Tokens { words, refs } => {
                (pipeline.process_pretokenized(&words, &options), Some(refs))
            }
        })
        .await
        .map_err(|e| WrapperError::Pipeline(e.to_string()))?;

        let entities = self.entities(&doc, params).await;

        let mut view = View::new(mmif.next_view_id());
        self.sign_view(&mut view, params);
        build_view(
            &mut view,
            &document.qualified_id(),
            &doc,
            refs.as_deref(),
            source_text.as_deref(),
            &entities,
        )?;
        Ok(view)
    }

    fn sign_view(&self, view: &mut View, params: &RuntimeParams) {
        view.metadata.app = self.app.clone();
        view.metadata.timestamp = Some(chrono::Utc::now().to_rfc3339());
        view.metadata.parameters = params.raw_json();
        view.metadata.app_configuration = params.resolved_json(self.default_pretty);
    }

    /// Pipeline entities, linked or replaced by linker output on request.
    async fn entities(&self, doc: &AnalyzedDoc, params: &RuntimeParams) -> Vec<EntityOut> {
        let recognized = |links: Option<&LinkMap>| -> Vec<EntityOut> {
            doc.entities
                .iter()
                .map(|span| EntityOut {
                    span: Span::new(span.start, span.end),
                    category: span.label.clone().filter(|label| !label.is_empty()),
                    kbid: links
                        .and_then(|l| doc.char_range(span).and_then(|range| l.get(&range)))
                        .map(|link| link.uri.clone()),
                })
                .collect()
        };

        if !params.link {
            return recognized(None);
        }
        let Some(linker) = &self.linker else {
            warn!("Entity linking requested but no linker endpoint is configured");
            return recognized(None);
        };

        let links = match linker.link(&doc.text).await {
            Ok(links) => links,
            Err(e) => {
                warn!("Entity linking via {} failed: {}", linker.linker_id(), e);
                return recognized(None);
            }
        };
        debug!("Linker returned {} entities", links.len());

        if params.overwrite {
            linked_entities(doc, &links)
        } else {
            recognized(Some(&links))
        }
    }
}

/// Words and back-references of the latest view holding tokens for
/// `document`, if any.
fn prior_tokens(
    mmif: &Mmif,
    document: &TextDocumentRef,
) -> Result<Option<(Vec<String>, Vec<TokenRef>)>> {
    let Some(view) = mmif
        .views_for_document(document)
        .into_iter()
        .rev()
        .find(|v| v.contains_type(vocabulary::TOKEN))
    else {
        debug!(
            "No prior tokenization for {}, tokenizing text",
            document.qualified_id()
        );
        return Ok(None);
    };

    let mut words = Vec::new();
    let mut refs = Vec::new();
    for token in view.annotations_of_type(vocabulary::TOKEN) {
        let word = token
            .get_str("text")
            .or_else(|| token.get_str("word"))
            .ok_or_else(|| {
                WrapperError::InvalidMmif(format!("Token {}:{} has no text", view.id, token.id()))
            })?;
        let id = if token.id().contains(':') {
            token.id().to_string()
        } else {
            format!("{}:{}", view.id, token.id())
        };
        words.push(word.to_string());
        refs.push(TokenRef::new(id, token.get_usize("start"), token.get_usize("end")));
    }

    if words.is_empty() {
        return Ok(None);
    }
    debug!("Reusing {} tokens from view {}", words.len(), view.id);
    Ok(Some((words, refs)))
}

/// Entities taken from linker spans, snapped to token boundaries. Links
/// overlapping an earlier one are dropped.
fn linked_entities(doc: &AnalyzedDoc, links: &LinkMap) -> Vec<EntityOut> {
    let mut ordered: Vec<(&(usize, usize), _)> = links.iter().collect();
    ordered.sort_by_key(|((start, end), _)| (*start, *end));

    let mut out: Vec<EntityOut> = Vec::new();
    for ((start, end), link) in ordered {
        let Some(span) = snap_to_tokens(doc, *start, *end) else {
            debug!("Link '{}' at {}..{} covers no token", link.surface, start, end);
            continue;
        };
        if out.last().is_some_and(|prev| prev.span.overlaps(&span)) {
            debug!("Dropping overlapping link '{}' ({})", link.surface, link.uri);
            continue;
        }
        out.push(EntityOut {
            span,
            category: Some(link.category()),
            kbid: Some(link.uri.clone()),
        });
    }
    out
}

/// Smallest token span covering chars `start..end`.
fn snap_to_tokens(doc: &AnalyzedDoc, start: usize, end: usize) -> Option<Span> {
    let first = doc.tokens.iter().position(|t| t.end() > start)?;
    let last = doc.tokens.iter().rposition(|t| t.idx < end)?;
    (first <= last).then(|| Span::new(first, last + 1))
}

/// Whether a language tag ("en", "en-US") names English.
fn is_english(tag: &str) -> bool {
    let primary = tag.split(['-', '_']).next().unwrap_or_default();
    primary.eq_ignore_ascii_case("en") || primary.eq_ignore_ascii_case("eng")
}

/// Fill `view` from the analysis of one document. With `prior` tokens,
/// `source_text` is the document text their offsets refer to.
fn build_view(
    view: &mut View,
    document_id: &str,
    doc: &AnalyzedDoc,
    prior: Option<&[TokenRef]>,
    source_text: Option<&str>,
    entities: &[EntityOut],
) -> Result<()> {
    for at_type in vocabulary::OUTPUT_TYPES {
        view.new_contain(at_type, document_id);
    }

    let mut index = TokenIndex::with_len(doc.tokens.len());
    for (n, token) in doc.tokens.iter().enumerate() {
        let annotation = view.new_annotation(vocabulary::TOKEN);
        match prior.and_then(|refs| refs.get(n)) {
            Some(prior_ref) => {
                annotation.add_property("targets", vec![prior_ref.id.clone()]);
                index.insert(n, prior_ref.clone());
            }
            None => {
                annotation.add_property("start", token.idx);
                annotation.add_property("end", token.end());
                index.insert(
                    n,
                    TokenRef::new(annotation.id(), Some(token.idx), Some(token.end())),
                );
            }
        }
        annotation.add_property("pos", token.tag.as_str());
        annotation.add_property("lemma", token.lemma.as_str());
        annotation.add_property("text", token.text.as_str());
    }

    for span in &doc.noun_chunks {
        add_span(view, vocabulary::NOUN_CHUNK, doc, source_text, &index, span)?;
    }
    for span in &doc.sentences {
        add_span(view, vocabulary::SENTENCE, doc, source_text, &index, span)?;
    }
    for entity in entities {
        let annotation = add_span(
            view,
            vocabulary::NAMED_ENTITY,
            doc,
            source_text,
            &index,
            &entity.span,
        )?;
        if let Some(category) = &entity.category {
            annotation.add_property("category", category.as_str());
        }
        if let Some(kbid) = &entity.kbid {
            annotation.add_property("kbid", kbid.as_str());
        }
    }

    Ok(())
}

fn add_span<'v>(
    view: &'v mut View,
    at_type: &str,
    doc: &AnalyzedDoc,
    source_text: Option<&str>,
    index: &TokenIndex,
    span: &Span,
) -> Result<&'v mut Annotation> {
    let resolved = index.resolve(span)?;
    let text = match (source_text, resolved.start, resolved.end) {
        (Some(source), Some(start), Some(end)) => char_slice(source, start, end).to_string(),
        _ => doc.span_text(span),
    };
    let annotation = view.new_annotation(at_type);
    annotation.add_property("targets", resolved.targets);
    annotation.add_property("text", text);
    if let (Some(start), Some(end)) = (resolved.start, resolved.end) {
        annotation.add_property("start", start);
        annotation.add_property("end", end);
    }
    Ok(annotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::linking::LinkedEntity;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct FixedLinker(LinkMap);

    #[async_trait]
    impl EntityLinker for FixedLinker {
        fn linker_id(&self) -> &str {
            "fixed"
        }

        async fn link(&self, _text: &str) -> Result<LinkMap> {
            Ok(self.0.clone())
        }
    }

    struct DownLinker;

    #[async_trait]
    impl EntityLinker for DownLinker {
        fn linker_id(&self) -> &str {
            "down"
        }

        async fn link(&self, _text: &str) -> Result<LinkMap> {
            Err(WrapperError::Linking("connection refused".to_string()))
        }
    }

    fn annotator() -> Annotator {
        Annotator::new(Arc::new(RuleBasedPipeline::new()))
    }

    fn text_mmif(text: &str) -> Mmif {
        Mmif::from_value(json!({
            "metadata": {"mmif": "http://mmif.clams.ai/1.0.0"},
            "documents": [{
                "@type": vocabulary::TEXT_DOCUMENT,
                "properties": {"id": "m1", "text": {"@value": text}}
            }]
        }))
        .unwrap()
    }

    fn link(uri: &str, surface: &str, types: &[&str]) -> LinkedEntity {
        LinkedEntity {
            uri: uri.to_string(),
            surface: surface.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn of_type<'a>(view: &'a View, at_type: &'a str) -> Vec<&'a Annotation> {
        view.annotations_of_type(at_type).collect()
    }

    #[tokio::test]
    async fn test_builds_one_view_per_document() {
        let mut mmif = text_mmif("Barack Obama was born in Hawaii.");
        annotator()
            .annotate(&mut mmif, &RuntimeParams::default())
            .await
            .unwrap();

        assert_eq!(mmif.views.len(), 1);
        let view = &mmif.views[0];
        assert_eq!(view.id, "v_0");
        assert_eq!(view.metadata.app, app_identifier());
        assert!(view.metadata.timestamp.is_some());
        for at_type in vocabulary::OUTPUT_TYPES {
            assert_eq!(view.metadata.contains[at_type]["document"], "m1");
        }

        let tokens = of_type(view, vocabulary::TOKEN);
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[0].id(), "t_1");
        assert_eq!(tokens[0].get_usize("start"), Some(0));
        assert_eq!(tokens[0].get_usize("end"), Some(6));
        assert_eq!(tokens[3].get_str("lemma"), Some("bear"));

        let sentences = of_type(view, vocabulary::SENTENCE);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].get_usize("start"), Some(0));
        assert_eq!(sentences[0].get_usize("end"), Some(32));

        let entities = of_type(view, vocabulary::NAMED_ENTITY);
        let found: Vec<(&str, &str)> = entities
            .iter()
            .map(|e| (e.get_str("text").unwrap(), e.get_str("category").unwrap()))
            .collect();
        assert_eq!(found, vec![("Barack Obama", "PERSON"), ("Hawaii", "GPE")]);
        assert_eq!(entities[0].get("targets"), Some(&json!(["t_1", "t_2"])));
        assert!(entities[0].get("kbid").is_none());
    }

    #[tokio::test]
    async fn test_fills_missing_mmif_version() {
        let mut mmif = Mmif::from_value(json!({"metadata": {}, "documents": []})).unwrap();
        annotator()
            .annotate(&mut mmif, &RuntimeParams::default())
            .await
            .unwrap();
        assert_eq!(mmif.metadata.mmif, "http://mmif.clams.ai/1.0.0");
        assert!(mmif.views.is_empty());
    }

    #[tokio::test]
    async fn test_pretokenized_reuses_prior_tokens() {
        let mut mmif = Mmif::from_value(json!({
            "metadata": {"mmif": "http://mmif.clams.ai/1.0.0"},
            "documents": [{
                "@type": vocabulary::TEXT_DOCUMENT,
                "properties": {"id": "m1", "text": {"@value": "jim  lehrer works at pbs"}}
            }],
            "views": [{
                "id": "v_0",
                "metadata": {
                    "app": "http://apps.clams.ai/some-asr",
                    "contains": {(vocabulary::TOKEN): {"document": "m1"}}
                },
                "annotations": [
                    {"@type": vocabulary::TOKEN, "properties": {"id": "t_1", "text": "jim", "start": 0, "end": 3}},
                    {"@type": vocabulary::TOKEN, "properties": {"id": "t_2", "text": "lehrer", "start": 5, "end": 11}},
                    {"@type": vocabulary::TOKEN, "properties": {"id": "t_3", "text": "works", "start": 12, "end": 17}},
                    {"@type": vocabulary::TOKEN, "properties": {"id": "t_4", "text": "at", "start": 18, "end": 20}},
                    {"@type": vocabulary::TOKEN, "properties": {"id": "t_5", "text": "pbs", "start": 21, "end": 24}}
                ]
            }]
        }))
        .unwrap();

        let params = RuntimeParams::from_pairs([("pretokenized", "true"), ("uncased", "true")]);
        annotator().annotate(&mut mmif, &params).await.unwrap();

        let view = &mmif.views[1];
        assert_eq!(view.id, "v_1");
        let tokens = of_type(view, vocabulary::TOKEN);
        assert_eq!(tokens.len(), 5);
        assert!(tokens.iter().all(|t| t.get("start").is_none()));
        assert_eq!(tokens[1].get("targets"), Some(&json!(["v_0:t_2"])));

        let entities = of_type(view, vocabulary::NAMED_ENTITY);
        assert_eq!(entities[0].get_str("category"), Some("PERSON"));
        assert_eq!(entities[0].get("targets"), Some(&json!(["v_0:t_1", "v_0:t_2"])));
        // Offsets come from the referenced tokens, in the source text.
        assert_eq!(entities[0].get_usize("start"), Some(0));
        assert_eq!(entities[0].get_usize("end"), Some(11));
        // ...and so does the text, double space included.
        assert_eq!(entities[0].get_str("text"), Some("jim  lehrer"));
        assert_eq!(entities[1].get_str("category"), Some("ORG"));

        assert_eq!(view.metadata.parameters["pretokenized"], "true");
        assert_eq!(view.metadata.app_configuration["uncased"], true);
    }

    #[tokio::test]
    async fn test_pretokenized_without_tokens_falls_back_to_text() {
        let mut mmif = text_mmif("Hello world.");
        let params = RuntimeParams::from_pairs([("pretokenized", "yes")]);
        annotator().annotate(&mut mmif, &params).await.unwrap();

        let tokens = of_type(&mmif.views[0], vocabulary::TOKEN);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].get_usize("start"), Some(0));
    }

    #[tokio::test]
    async fn test_links_attach_by_span() {
        let mut links = LinkMap::new();
        links.insert(
            (0, 12),
            link("http://dbpedia.org/resource/Barack_Obama", "Barack Obama", &["DBpedia:Person"]),
        );
        // Same surface as the entity but at a position no entity covers.
        links.insert(
            (100, 106),
            link("http://dbpedia.org/resource/Elsewhere", "Hawaii", &[]),
        );

        let mut mmif = text_mmif("Barack Obama was born in Hawaii.");
        let params = RuntimeParams::from_pairs([("link", "true")]);
        annotator()
            .with_linker(Arc::new(FixedLinker(links)))
            .annotate(&mut mmif, &params)
            .await
            .unwrap();

        let entities = of_type(&mmif.views[0], vocabulary::NAMED_ENTITY);
        assert_eq!(
            entities[0].get_str("kbid"),
            Some("http://dbpedia.org/resource/Barack_Obama")
        );
        assert_eq!(entities[0].get_str("category"), Some("PERSON"));
        assert!(entities[1].get("kbid").is_none());
    }

    #[tokio::test]
    async fn test_overwrite_uses_linker_spans() {
        let mut links = LinkMap::new();
        links.insert(
            (25, 31),
            link("http://dbpedia.org/resource/Hawaii", "Hawaii", &["Schema:Place", "DBpedia:Place"]),
        );
        links.insert(
            (7, 12),
            link("http://dbpedia.org/resource/Barack_Obama", "Obama", &[]),
        );

        let mut mmif = text_mmif("Barack Obama was born in Hawaii.");
        let params = RuntimeParams::from_pairs([("link", "1"), ("overwrite", "1")]);
        annotator()
            .with_linker(Arc::new(FixedLinker(links)))
            .annotate(&mut mmif, &params)
            .await
            .unwrap();

        let entities = of_type(&mmif.views[0], vocabulary::NAMED_ENTITY);
        let found: Vec<(&str, &str)> = entities
            .iter()
            .map(|e| (e.get_str("text").unwrap(), e.get_str("category").unwrap()))
            .collect();
        assert_eq!(found, vec![("Obama", "MISC"), ("Hawaii", "Place")]);
        assert_eq!(entities[0].get("targets"), Some(&json!(["t_2"])));
    }

    #[tokio::test]
    async fn test_linker_failure_degrades_to_no_links() {
        let mut mmif = text_mmif("Barack Obama was born in Hawaii.");
        let params = RuntimeParams::from_pairs([("link", "true"), ("overwrite", "true")]);
        annotator()
            .with_linker(Arc::new(DownLinker))
            .annotate(&mut mmif, &params)
            .await
            .unwrap();

        let entities = of_type(&mmif.views[0], vocabulary::NAMED_ENTITY);
        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.get("kbid").is_none()));
    }

    #[tokio::test]
    async fn test_failure_returns_input_with_error_view() {
        let input = Mmif::from_value(json!({
            "metadata": {"mmif": "http://mmif.clams.ai/1.0.0"},
            "documents": [
                {"@type": vocabulary::TEXT_DOCUMENT, "properties": {"id": "m1", "text": {"@value": "Fine."}}},
                {"@type": vocabulary::TEXT_DOCUMENT, "properties": {"id": "m2", "location": "/no/such/file.txt"}}
            ]
        }))
        .unwrap();

        let failure = annotator()
            .process(input, &RuntimeParams::default())
            .await
            .unwrap_err();

        assert!(matches!(failure.error, WrapperError::SourceUnavailable { .. }));
        // No partial views: only the error view is added.
        assert_eq!(failure.mmif.views.len(), 1);
        let view = &failure.mmif.views[0];
        assert!(view.annotations.is_empty());
        let message: &Value = &view.metadata.error.as_ref().unwrap()["message"];
        assert!(message.as_str().unwrap().contains("/no/such/file.txt"));
    }

    /// The built-in pipeline with entity labels stripped.
    struct UnlabeledPipeline(RuleBasedPipeline);

    impl UnlabeledPipeline {
        fn strip(mut doc: AnalyzedDoc) -> AnalyzedDoc {
            for entity in &mut doc.entities {
                entity.label = None;
            }
            doc
        }
    }

    impl Pipeline for UnlabeledPipeline {
        fn name(&self) -> &str {
            "unlabeled"
        }

        fn version(&self) -> &str {
            "0"
        }

        fn process(&self, text: &str, options: &crate::nlp::PipelineOptions) -> AnalyzedDoc {
            Self::strip(self.0.process(text, options))
        }

        fn process_pretokenized(
            &self,
            words: &[String],
            options: &crate::nlp::PipelineOptions,
        ) -> AnalyzedDoc {
            Self::strip(self.0.process_pretokenized(words, options))
        }
    }

    #[tokio::test]
    async fn test_unlabeled_entities_have_no_category() {
        let mut mmif = text_mmif("Barack Obama was born in Hawaii.");
        Annotator::new(Arc::new(UnlabeledPipeline(RuleBasedPipeline::new())))
            .annotate(&mut mmif, &RuntimeParams::default())
            .await
            .unwrap();

        let entities = of_type(&mmif.views[0], vocabulary::NAMED_ENTITY);
        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.get("category").is_none()));
    }

    #[tokio::test]
    async fn test_non_english_document_is_still_annotated() {
        let mut mmif = Mmif::from_value(json!({
            "metadata": {"mmif": "http://mmif.clams.ai/1.0.0"},
            "documents": [{
                "@type": vocabulary::TEXT_DOCUMENT,
                "properties": {"id": "m1", "text": {"@value": "Guten Tag.", "@language": "de"}}
            }]
        }))
        .unwrap();
        annotator()
            .annotate(&mut mmif, &RuntimeParams::default())
            .await
            .unwrap();
        assert_eq!(of_type(&mmif.views[0], vocabulary::TOKEN).len(), 3);
    }

    #[test]
    fn test_is_english() {
        for tag in ["en", "EN", "en-US", "en_GB", "eng"] {
            assert!(is_english(tag), "{tag}");
        }
        for tag in ["de", "fr-CA", "", "english"] {
            assert!(!is_english(tag), "{tag}");
        }
    }

    /// A Spotlight stand-in answering every request with `status` and `body`.
    async fn spotlight(status: u16, body: &'static str) -> Arc<SpotlightLinker> {
        let status = axum::http::StatusCode::from_u16(status).unwrap();
        let app = axum::Router::new().fallback(move || async move { (status, body) });
        let base = crate::utils::test_server::spawn(app).await;
        Arc::new(SpotlightLinker::new(&base, 0.5, 5))
    }

    #[tokio::test]
    async fn test_spotlight_links_after_astral_characters() {
        let linker = spotlight(
            200,
            r#"{"Resources": [{"@URI": "http://dbpedia.org/resource/Barack_Obama",
                "@surfaceForm": "Barack Obama", "@offset": "3", "@types": "DBpedia:Person"}]}"#,
        )
        .await;

        let mut mmif = text_mmif("😀 Barack Obama was born in Hawaii.");
        let params = RuntimeParams::from_pairs([("link", "true")]);
        annotator()
            .with_linker(linker)
            .annotate(&mut mmif, &params)
            .await
            .unwrap();

        let entities = of_type(&mmif.views[0], vocabulary::NAMED_ENTITY);
        let obama = entities
            .iter()
            .find(|e| e.get_str("text") == Some("Barack Obama"))
            .unwrap();
        assert_eq!(obama.get_usize("start"), Some(2));
        assert_eq!(
            obama.get_str("kbid"),
            Some("http://dbpedia.org/resource/Barack_Obama")
        );
    }

    #[tokio::test]
    async fn test_spotlight_server_error_degrades_to_no_links() {
        let linker = spotlight(500, "Internal Server Error").await;

        let mut mmif = text_mmif("Barack Obama was born in Hawaii.");
        let params = RuntimeParams::from_pairs([("link", "true")]);
        annotator()
            .with_linker(linker)
            .annotate(&mut mmif, &params)
            .await
            .unwrap();

        let entities = of_type(&mmif.views[0], vocabulary::NAMED_ENTITY);
        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.get("kbid").is_none()));
    }

    #[test]
    fn test_snap_to_tokens() {
        let doc = RuleBasedPipeline::new().process("Barack Obama was born.", &Default::default());
        assert_eq!(snap_to_tokens(&doc, 0, 12), Some(Span::new(0, 2)));
        assert_eq!(snap_to_tokens(&doc, 2, 9), Some(Span::new(0, 2)));
        assert_eq!(snap_to_tokens(&doc, 50, 60), None);
    }
}
