//! End-to-end checks through the public API and the HTTP router.

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use mmif_nlp::config::Settings;
use mmif_nlp::models::{vocabulary, Mmif};
use mmif_nlp::server::{create_router, AppState};
use mmif_nlp::services::{Annotator, RuntimeParams};

const TEXT: &str = "Dr. Müller moved to São Paulo in March 2019. \
                    She joined Acme Corporation, which pays 5 percent more.\n\n\
                    The old café closed on Friday.";

fn text_mmif(text: &str) -> Value {
    json!({
        "metadata": {"mmif": "http://mmif.clams.ai/1.0.0"},
        "documents": [{
            "@type": vocabulary::TEXT_DOCUMENT,
            "properties": {"id": "m1", "text": {"@value": text, "@language": "en"}}
        }]
    })
}

async fn annotate(input: Value, params: &[(&str, &str)]) -> Mmif {
    let mut mmif = Mmif::from_value(input).unwrap();
    Annotator::from_settings(&Settings::default())
        .annotate(&mut mmif, &RuntimeParams::from_pairs(params.iter().copied()))
        .await
        .unwrap();
    mmif
}

#[tokio::test]
async fn token_offsets_cover_their_text() {
    let mmif = annotate(text_mmif(TEXT), &[]).await;
    let view = &mmif.views[0];

    let tokens: Vec<_> = view.annotations_of_type(vocabulary::TOKEN).collect();
    assert!(!tokens.is_empty());
    let chars: Vec<char> = TEXT.chars().collect();
    for token in &tokens {
        let start = token.get_usize("start").unwrap();
        let end = token.get_usize("end").unwrap();
        let text = token.get_str("text").unwrap();
        assert_eq!(end - start, text.chars().count());
        assert_eq!(chars[start..end].iter().collect::<String>(), text);
        assert!(token.get_str("pos").is_some());
        assert!(token.get_str("lemma").is_some());
    }
}

#[tokio::test]
async fn spans_match_the_union_of_their_tokens() {
    let mmif = annotate(text_mmif(TEXT), &[]).await;
    let view = &mmif.views[0];

    let offsets: HashMap<&str, (usize, usize)> = view
        .annotations_of_type(vocabulary::TOKEN)
        .map(|t| {
            (
                t.id(),
                (t.get_usize("start").unwrap(), t.get_usize("end").unwrap()),
            )
        })
        .collect();

    let sentences = view.annotations_of_type(vocabulary::SENTENCE).count();
    assert_eq!(sentences, 3);

    for at_type in [
        vocabulary::NOUN_CHUNK,
        vocabulary::SENTENCE,
        vocabulary::NAMED_ENTITY,
    ] {
        for span in view.annotations_of_type(at_type) {
            let targets: Vec<&str> = span
                .get("targets")
                .and_then(Value::as_array)
                .unwrap()
                .iter()
                .filter_map(Value::as_str)
                .collect();
            assert!(!targets.is_empty());
            let first = offsets[targets[0]];
            let last = offsets[targets[targets.len() - 1]];
            assert_eq!(span.get_usize("start"), Some(first.0), "{}", span.id());
            assert_eq!(span.get_usize("end"), Some(last.1), "{}", span.id());
        }
    }
}

#[tokio::test]
async fn annotation_ids_are_unique_within_a_view() {
    let mmif = annotate(text_mmif(TEXT), &[]).await;
    let view = &mmif.views[0];
    let mut seen = std::collections::HashSet::new();
    for annotation in &view.annotations {
        assert!(seen.insert(annotation.id().to_string()), "{}", annotation.id());
    }
}

#[tokio::test]
async fn documents_inside_views_are_addressed_by_view() {
    let input = json!({
        "metadata": {"mmif": "http://mmif.clams.ai/1.0.0"},
        "documents": [],
        "views": [{
            "id": "v_0",
            "metadata": {"app": "http://apps.clams.ai/ocr"},
            "annotations": [{
                "@type": vocabulary::TEXT_DOCUMENT,
                "properties": {"id": "td1", "text": {"@value": "Welcome to Boston."}}
            }]
        }]
    });

    let mmif = annotate(input, &[]).await;
    assert_eq!(mmif.views.len(), 2);
    let view = mmif.get_view("v_1").unwrap();
    assert_eq!(
        view.metadata.contains[vocabulary::TOKEN]["document"],
        "v_0:td1"
    );
}

#[tokio::test]
async fn pretokenized_request_through_the_router() {
    let words = ["barack", "obama", "visited", "hawaii"];
    let mut offset = 0;
    let tokens: Vec<Value> = words
        .iter()
        .enumerate()
        .map(|(n, word)| {
            let start = offset;
            offset += word.len() + 1;
            json!({
                "@type": vocabulary::TOKEN,
                "properties": {
                    "id": format!("t_{}", n + 1),
                    "text": word,
                    "start": start,
                    "end": start + word.len()
                }
            })
        })
        .collect();

    let mut input = text_mmif("barack obama visited hawaii");
    input["views"] = json!([{
        "id": "v_0",
        "metadata": {
            "app": "http://apps.clams.ai/asr",
            "contains": {(vocabulary::TOKEN): {"document": "m1"}}
        },
        "annotations": tokens
    }]);

    let app = create_router(AppState::from_settings(&Settings::default()));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/?pretokenized&uncased=true")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(input.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let mmif = Mmif::parse(std::str::from_utf8(&body).unwrap()).unwrap();
    let view = &mmif.views[1];

    let new_tokens: Vec<_> = view.annotations_of_type(vocabulary::TOKEN).collect();
    assert_eq!(new_tokens.len(), words.len());
    assert!(new_tokens.iter().all(|t| t.get("start").is_none()));
    for (n, token) in new_tokens.iter().enumerate() {
        assert_eq!(token.get("targets"), Some(&json!([format!("v_0:t_{}", n + 1)])));
    }

    let categories: Vec<&str> = view
        .annotations_of_type(vocabulary::NAMED_ENTITY)
        .filter_map(|e| e.get_str("category"))
        .collect();
    assert_eq!(categories, vec!["PERSON", "GPE"]);
}

#[tokio::test]
async fn metadata_is_stable_across_requests() {
    let app = create_router(AppState::from_settings(&Settings::default()));
    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/?pretty").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap());
    }
    assert_eq!(bodies[0], bodies[1]);
}
