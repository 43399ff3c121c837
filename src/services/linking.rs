//! Entity linking against a DBpedia Spotlight compatible service.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, WrapperError};
use crate::utils::Utf16Index;

/// A knowledge-base match for a span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedEntity {
    pub uri: String,
    pub surface: String,
    /// Type labels as reported by the service ("DBpedia:Person", ...).
    pub types: Vec<String>,
}

impl LinkedEntity {
    /// Category for an entity created from this link: the local name of the
    /// first DBpedia or Schema.org type, or `MISC`.
    pub fn category(&self) -> String {
        self.types
            .iter()
            .find_map(|t| {
                t.strip_prefix("DBpedia:")
                    .or_else(|| t.strip_prefix("Schema:"))
            })
            .filter(|name| !name.is_empty())
            .unwrap_or("MISC")
            .to_string()
    }
}

/// Links keyed by `(char_start, char_end)` in the analysed text.
pub type LinkMap = HashMap<(usize, usize), LinkedEntity>;

/// Trait for entity linking backends.
#[async_trait]
pub trait EntityLinker: Send + Sync {
    /// Human-readable backend identifier.
    fn linker_id(&self) -> &str;

    /// Find knowledge-base entities in `text`.
    async fn link(&self, text: &str) -> Result<LinkMap>;
}

/// Client for the Spotlight `/annotate` endpoint.
pub struct SpotlightLinker {
    client: reqwest::Client,
    endpoint: String,
    confidence: f64,
}

impl SpotlightLinker {
    pub fn new(endpoint: &str, confidence: f64, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mmif-nlp/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            confidence,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EntityLinker for SpotlightLinker {
    fn linker_id(&self) -> &str {
        "dbpedia-spotlight"
    }

    async fn link(&self, text: &str) -> Result<LinkMap> {
        let url = format!("{}/annotate", self.endpoint);
        let confidence = self.confidence.to_string();
        debug!("Linking {} chars via {}", text.chars().count(), url);

        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("text", text), ("confidence", confidence.as_str())])
            .send()
            .await
            .map_err(|e| WrapperError::Linking(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(WrapperError::Linking(format!("HTTP {}", resp.status())));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| WrapperError::Linking(e.to_string()))?;
        parse_response(&body, text)
    }
}

#[derive(Deserialize)]
struct SpotlightResponse {
    #[serde(rename = "Resources", default)]
    resources: Vec<SpotlightResource>,
}

#[derive(Deserialize)]
struct SpotlightResource {
    #[serde(rename = "@URI")]
    uri: String,
    #[serde(rename = "@surfaceForm")]
    surface_form: serde_json::Value,
    #[serde(rename = "@offset")]
    offset: serde_json::Value,
    #[serde(rename = "@types", default)]
    types: String,
}

/// Spotlight serializes numbers as strings, and short numeric surface
/// forms sometimes as numbers.
fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a Spotlight JSON body for `text` into span-keyed links.
///
/// Spotlight reports offsets in UTF-16 code units; keys are converted to
/// char offsets in `text`.
pub fn parse_response(body: &str, text: &str) -> Result<LinkMap> {
    let response: SpotlightResponse =
        serde_json::from_str(body).map_err(|e| WrapperError::Linking(e.to_string()))?;

    let index = Utf16Index::new(text);
    let mut links = LinkMap::new();
    for resource in response.resources {
        let surface = value_to_string(&resource.surface_form);
        let Ok(offset) = value_to_string(&resource.offset).parse::<usize>() else {
            debug!("Skipping link with bad offset for {}", resource.uri);
            continue;
        };
        let span = index
            .to_char(offset)
            .zip(index.to_char(offset + surface.encode_utf16().count()));
        let Some((start, end)) = span else {
            debug!("Skipping link outside the text for {}", resource.uri);
            continue;
        };
        let types = resource
            .types
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        links.insert(
            (start, end),
            LinkedEntity {
                uri: resource.uri,
                surface,
                types,
            },
        );
    }

    Ok(links)
}
