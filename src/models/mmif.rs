//! MMIF container model.
//!
//! Only the parts the service reads or writes are typed. Everything else is
//! kept as raw JSON so an input document survives a round trip unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::vocabulary;
use crate::error::{Result, WrapperError};

/// A whole MMIF document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mmif {
    pub metadata: MmifMetadata,
    #[serde(default)]
    pub documents: Vec<Annotation>,
    #[serde(default)]
    pub views: Vec<View>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MmifMetadata {
    /// Spec version URI; empty when the input carried none.
    #[serde(default)]
    pub mmif: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A typed record: `@type` plus free-form `properties`.
///
/// Documents share this shape, so they are represented with it as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "@type")]
    pub at_type: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Annotation {
    pub fn new(at_type: &str, id: String) -> Self {
        let mut properties = Map::new();
        properties.insert("id".to_string(), Value::String(id));
        Self {
            at_type: at_type.to_string(),
            properties,
        }
    }

    pub fn id(&self) -> &str {
        self.get_str("id").unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.properties
            .get(key)
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    }

    pub fn add_property(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }

    pub fn is_type(&self, at_type: &str) -> bool {
        vocabulary::same_type(&self.at_type, at_type)
    }
}

/// Output container for one run of one app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub id: String,
    #[serde(default)]
    pub metadata: ViewMetadata,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(skip)]
    id_counters: HashMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub app: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub contains: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(
        default,
        rename = "appConfiguration",
        skip_serializing_if = "Map::is_empty"
    )]
    pub app_configuration: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl View {
    pub fn new(id: String) -> Self {
        Self {
            id,
            metadata: ViewMetadata::default(),
            annotations: Vec::new(),
            id_counters: HashMap::new(),
        }
    }

    /// Declare that this view holds annotations of `at_type` over `document`.
    pub fn new_contain(&mut self, at_type: &str, document: &str) {
        let mut entry = Map::new();
        entry.insert("document".to_string(), Value::String(document.to_string()));
        self.metadata
            .contains
            .insert(at_type.to_string(), Value::Object(entry));
    }

    /// Whether `contains` declares `at_type` (version-insensitive).
    pub fn contains_type(&self, at_type: &str) -> bool {
        self.metadata
            .contains
            .keys()
            .any(|k| vocabulary::same_type(k, at_type))
    }

    /// Whether any `contains` entry of this view points at `document`.
    pub fn refers_to_document(&self, document: &str) -> bool {
        self.metadata.contains.values().any(|v| {
            v.get("document")
                .and_then(Value::as_str)
                .is_some_and(|d| d == document)
        })
    }

    /// Append a new annotation with a freshly minted id (`t_1`, `ne_3`, ...).
    pub fn new_annotation(&mut self, at_type: &str) -> &mut Annotation {
        let prefix = vocabulary::id_prefix(at_type);
        if !self.id_counters.contains_key(&prefix) {
            let marker = format!("{}_", prefix);
            let existing = self
                .annotations
                .iter()
                .filter(|a| a.id().starts_with(&marker))
                .count();
            self.id_counters.insert(prefix.clone(), existing);
        }
        let counter = self.id_counters.entry(prefix.clone()).or_insert(0);
        *counter += 1;
        let id = format!("{}_{}", prefix, counter);

        self.annotations.push(Annotation::new(at_type, id));
        let last = self.annotations.len() - 1;
        &mut self.annotations[last]
    }

    pub fn annotations_of_type<'a>(
        &'a self,
        at_type: &'a str,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations.iter().filter(move |a| a.is_type(at_type))
    }
}

/// A text document located somewhere in an MMIF, with its addressing
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDocumentRef {
    /// Id as written in the document's properties.
    pub id: String,
    /// Id of the view holding this document, for documents produced by
    /// another app.
    pub parent: Option<String>,
    pub text: Option<String>,
    pub language: Option<String>,
    pub location: Option<String>,
}

impl TextDocumentRef {
    fn from_annotation(doc: &Annotation, parent: Option<&str>) -> Self {
        let text_value = doc.get("text");
        let text = text_value
            .and_then(|t| t.get("@value").or(Some(t)))
            .and_then(Value::as_str)
            .map(str::to_string);
        let language = text_value
            .and_then(|t| t.get("@language"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            id: doc.id().to_string(),
            parent: parent.map(str::to_string),
            text,
            language,
            location: doc.get_str("location").map(str::to_string),
        }
    }

    /// Id other annotations use to point at this document.
    pub fn qualified_id(&self) -> String {
        match &self.parent {
            Some(parent) if !self.id.contains(':') => format!("{}:{}", parent, self.id),
            _ => self.id.clone(),
        }
    }
}

impl Mmif {
    pub fn parse(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| WrapperError::InvalidMmif(e.to_string()))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| WrapperError::InvalidMmif(e.to_string()))
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let out = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(out)
    }

    /// Every text document, top-level ones first, then those held by views
    /// in view order.
    pub fn text_documents(&self) -> Vec<TextDocumentRef> {
        let top_level = self
            .documents
            .iter()
            .filter(|d| d.is_type(vocabulary::TEXT_DOCUMENT))
            .map(|d| TextDocumentRef::from_annotation(d, None));

        let nested = self.views.iter().flat_map(|view| {
            view.annotations_of_type(vocabulary::TEXT_DOCUMENT)
                .map(move |d| TextDocumentRef::from_annotation(d, Some(&view.id)))
        });

        top_level.chain(nested).collect()
    }

    /// Views whose `contains` block points at the given document, in order.
    pub fn views_for_document<'a>(&'a self, document: &'a TextDocumentRef) -> Vec<&'a View> {
        let qualified = document.qualified_id();
        self.views
            .iter()
            .filter(|v| v.refers_to_document(&qualified) || v.refers_to_document(&document.id))
            .collect()
    }

    pub fn get_view(&self, id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    /// The next free `v_N` id, starting from the number of views present.
    pub fn next_view_id(&self) -> String {
        let mut n = self.views.len();
        while self.views.iter().any(|v| v.id == format!("v_{}", n)) {
            n += 1;
        }
        format!("v_{}", n)
    }

    /// Append an empty view with the next free `v_N` id.
    pub fn new_view(&mut self) -> &mut View {
        let id = self.next_view_id();
        self.views.push(View::new(id));
        let last = self.views.len() - 1;
        &mut self.views[last]
    }

    /// Append a view that records a processing failure.
    pub fn add_error_view(&mut self, app: &str, message: &str) {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let view = self.new_view();
        view.metadata.app = app.to_string();
        view.metadata.timestamp = Some(timestamp);
        view.metadata.error = Some(serde_json::json!({ "message": message }));
    }
}
