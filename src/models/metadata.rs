//! App metadata served at `GET /`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::vocabulary;
use crate::nlp::Pipeline;

/// Identifier base; the app version is appended as `/vX.Y.Z`.
pub const APP_IDENTIFIER_BASE: &str = "http://apps.clams.ai/mmif-nlp";

/// Versioned app identifier, also used to sign views.
pub fn app_identifier() -> String {
    format!("{}/v{}", APP_IDENTIFIER_BASE, env!("CARGO_PKG_VERSION"))
}

/// An input or output type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoSpec {
    #[serde(rename = "@type")]
    pub at_type: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl IoSpec {
    pub fn required(at_type: &str) -> Self {
        Self {
            at_type: at_type.to_string(),
            required: true,
        }
    }

    pub fn optional(at_type: &str) -> Self {
        Self {
            at_type: at_type.to_string(),
            required: false,
        }
    }
}

/// A runtime parameter declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub default: Value,
    pub multivalued: bool,
}

impl ParameterSpec {
    fn boolean(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            param_type: "boolean".to_string(),
            default: Value::Bool(false),
            multivalued: false,
        }
    }
}

/// Static description of the app and the pipeline it wraps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub name: String,
    pub description: String,
    pub app_version: String,
    pub mmif_version: String,
    pub analyzer_version: String,
    pub app_license: String,
    pub analyzer_license: String,
    pub identifier: String,
    pub url: String,
    pub input: Vec<IoSpec>,
    pub output: Vec<IoSpec>,
    pub parameters: Vec<ParameterSpec>,
}

impl AppMetadata {
    /// Describe this app wrapping `pipeline`.
    pub fn new(pipeline: &dyn Pipeline) -> Self {
        Self {
            name: "MMIF wrapper for English NLP".to_string(),
            description: format!(
                "Apply the {} pipeline to all text documents in a MMIF file.",
                pipeline.name()
            ),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            mmif_version: vocabulary::MMIF_VERSION.to_string(),
            analyzer_version: pipeline.version().to_string(),
            app_license: env!("CARGO_PKG_LICENSE").to_string(),
            analyzer_license: env!("CARGO_PKG_LICENSE").to_string(),
            identifier: app_identifier(),
            url: env!("CARGO_PKG_REPOSITORY").to_string(),
            input: vec![
                IoSpec::required(vocabulary::TEXT_DOCUMENT),
                IoSpec::optional(vocabulary::TOKEN),
            ],
            output: vocabulary::OUTPUT_TYPES
                .iter()
                .map(|t| IoSpec::required(t))
                .collect(),
            parameters: parameter_specs(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> String {
        let out = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        // A struct of strings, bools and JSON values always serializes.
        out.unwrap_or_default()
    }
}

fn parameter_specs() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::boolean(
            "pretokenized",
            "Reuse an existing tokenization of each text document, when one is \
             available, instead of tokenizing again. Useful for ASR transcripts.",
        ),
        ParameterSpec::boolean(
            "uncased",
            "Use the case-insensitive named entity model, for lower-cased text.",
        ),
        ParameterSpec::boolean(
            "link",
            "Link named entities to DBpedia through the configured linking service.",
        ),
        ParameterSpec::boolean(
            "overwrite",
            "With link, replace the recognized entities with the linked ones \
             instead of attaching links to matching entities.",
        ),
        ParameterSpec::boolean("pretty", "Pretty-print the output MMIF."),
    ]
}
