//! Runtime parameters accepted by `annotate`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::nlp::{NerModel, PipelineOptions};

/// Parse a boolean parameter value. A bare flag (`?pretty`) counts as true.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Parameters for one annotate call, raw and resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeParams {
    /// Values exactly as the caller sent them.
    pub raw: BTreeMap<String, String>,
    pub pretokenized: bool,
    pub uncased: bool,
    pub link: bool,
    pub overwrite: bool,
    /// `None` when the caller did not say; the server default applies.
    pub pretty: Option<bool>,
}

impl RuntimeParams {
    /// Build from key/value pairs such as a query string. Unknown keys are
    /// kept in `raw`; unparseable booleans keep their default.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();

            let slot = match key.as_str() {
                "pretokenized" => Some(&mut params.pretokenized),
                "uncased" => Some(&mut params.uncased),
                "link" => Some(&mut params.link),
                "overwrite" => Some(&mut params.overwrite),
                _ => None,
            };
            match (key.as_str(), parse_bool(&value)) {
                ("pretty", Some(flag)) => params.pretty = Some(flag),
                (_, Some(flag)) => {
                    if let Some(slot) = slot {
                        *slot = flag;
                    }
                }
                (name, None) if slot.is_some() || name == "pretty" => {
                    tracing::warn!("Ignoring non-boolean value '{}' for '{}'", value, name);
                }
                _ => {}
            }

            params.raw.insert(key, value);
        }
        params
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            ner_model: if self.uncased {
                NerModel::Uncased
            } else {
                NerModel::Cased
            },
        }
    }

    /// `parameters` block of a signed view.
    pub fn raw_json(&self) -> Map<String, Value> {
        self.raw
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }

    /// `appConfiguration` block of a signed view: every parameter with
    /// its resolved value.
    pub fn resolved_json(&self, default_pretty: bool) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("pretokenized".into(), Value::Bool(self.pretokenized));
        map.insert("uncased".into(), Value::Bool(self.uncased));
        map.insert("link".into(), Value::Bool(self.link));
        map.insert("overwrite".into(), Value::Bool(self.overwrite));
        map.insert("pretty".into(), Value::Bool(self.pretty.unwrap_or(default_pretty)));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        for yes in ["true", "TRUE", "1", "yes", "Yes", ""] {
            assert_eq!(parse_bool(yes), Some(true), "{yes}");
        }
        for no in ["false", "False", "0", "no", "NO"] {
            assert_eq!(parse_bool(no), Some(false), "{no}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_from_pairs() {
        let params = RuntimeParams::from_pairs([
            ("pretokenized", "true"),
            ("uncased", "1"),
            ("pretty", "no"),
            ("extra", "value"),
        ]);
        assert!(params.pretokenized);
        assert!(params.uncased);
        assert!(!params.link);
        assert_eq!(params.pretty, Some(false));
        assert_eq!(params.raw.get("extra").map(String::as_str), Some("value"));
        assert_eq!(params.pipeline_options().ner_model, NerModel::Uncased);
    }

    #[test]
    fn test_bad_boolean_keeps_default() {
        let params = RuntimeParams::from_pairs([("link", "sure")]);
        assert!(!params.link);
        assert_eq!(params.raw.get("link").map(String::as_str), Some("sure"));
    }

    #[test]
    fn test_json_blocks() {
        let params = RuntimeParams::from_pairs([("link", "yes")]);
        assert_eq!(params.raw_json()["link"], "yes");
        let resolved = params.resolved_json(true);
        assert_eq!(resolved["link"], true);
        assert_eq!(resolved["overwrite"], false);
        assert_eq!(resolved["pretty"], true);
    }
}
