//! Annotation type URIs understood and produced by the service.

/// MMIF specification version stamped on documents that carry none.
pub const MMIF_VERSION: &str = "1.0.0";

/// Prefix of the MMIF specification URI (`metadata.mmif`).
pub const MMIF_SPEC_PREFIX: &str = "http://mmif.clams.ai/";

pub const TEXT_DOCUMENT: &str = "http://mmif.clams.ai/vocabulary/TextDocument/v1";

pub const TOKEN: &str = "http://vocab.lappsgrid.org/Token";
pub const POS: &str = "http://vocab.lappsgrid.org/Token#pos";
pub const LEMMA: &str = "http://vocab.lappsgrid.org/Token#lemma";
pub const NOUN_CHUNK: &str = "http://vocab.lappsgrid.org/NounChunk";
pub const SENTENCE: &str = "http://vocab.lappsgrid.org/Sentence";
pub const NAMED_ENTITY: &str = "http://vocab.lappsgrid.org/NamedEntity";

/// Every type a processed view declares in its `contains` block, in order.
pub const OUTPUT_TYPES: [&str; 6] = [TOKEN, POS, LEMMA, NOUN_CHUNK, SENTENCE, NAMED_ENTITY];

/// Full MMIF spec URI for the current version.
pub fn mmif_spec_uri() -> String {
    format!("{}{}", MMIF_SPEC_PREFIX, MMIF_VERSION)
}

/// Strip a trailing `/vN` version segment, if any.
fn unversioned(uri: &str) -> &str {
    match uri.rsplit_once('/') {
        Some((base, last))
            if last.len() > 1
                && last.starts_with('v')
                && last[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            base
        }
        _ => uri,
    }
}

/// Compare two type URIs, ignoring vocabulary version suffixes.
pub fn same_type(a: &str, b: &str) -> bool {
    unversioned(a) == unversioned(b)
}

/// Last path segment of a type URI without its version (`NounChunk`).
pub fn short_name(uri: &str) -> &str {
    let base = unversioned(uri);
    let tail = base.rsplit('/').next().unwrap_or(base);
    tail.rsplit('#').next().unwrap_or(tail)
}

/// Prefix used for annotation ids of a type: the lower-cased capitals of
/// its short name (`NamedEntity` -> `ne`).
pub fn id_prefix(uri: &str) -> String {
    let caps: String = short_name(uri)
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect::<String>()
        .to_lowercase();
    if caps.is_empty() {
        short_name(uri).to_lowercase()
    } else {
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_type_ignores_version() {
        assert!(same_type(
            "http://mmif.clams.ai/vocabulary/TextDocument/v1",
            "http://mmif.clams.ai/vocabulary/TextDocument/v2"
        ));
        assert!(same_type(TOKEN, "http://vocab.lappsgrid.org/Token"));
        assert!(!same_type(TOKEN, SENTENCE));
    }

    #[test]
    fn test_short_names() {
        assert_eq!(short_name(TEXT_DOCUMENT), "TextDocument");
        assert_eq!(short_name(NOUN_CHUNK), "NounChunk");
        assert_eq!(short_name(POS), "pos");
    }

    #[test]
    fn test_id_prefixes() {
        assert_eq!(id_prefix(TOKEN), "t");
        assert_eq!(id_prefix(NOUN_CHUNK), "nc");
        assert_eq!(id_prefix(SENTENCE), "s");
        assert_eq!(id_prefix(NAMED_ENTITY), "ne");
        assert_eq!(id_prefix(TEXT_DOCUMENT), "td");
    }

    #[test]
    fn test_spec_uri() {
        assert_eq!(mmif_spec_uri(), "http://mmif.clams.ai/1.0.0");
    }
}
