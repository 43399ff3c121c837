//! Resolve the text of a TextDocument: inline, local file, or URL.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{Result, WrapperError};
use crate::models::TextDocumentRef;

/// Where a document's text lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Http(Url),
}

impl Location {
    /// Classify a `location` property: `file://` URIs and bare paths are
    /// local, `http(s)://` URLs are fetched.
    pub fn parse(location: &str) -> Result<Self> {
        match Url::parse(location) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Location::File)
                .map_err(|_| WrapperError::source_unavailable(location, "not a valid file URI")),
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Location::Http(url)),
            // Windows drive letters parse as a one-letter scheme.
            Ok(url) if url.scheme().len() > 1 => Err(WrapperError::source_unavailable(
                location,
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            _ => Ok(Location::File(PathBuf::from(location))),
        }
    }
}

/// Reads document text from wherever it lives.
#[derive(Debug, Clone)]
pub struct TextSource {
    client: reqwest::Client,
}

impl TextSource {
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mmif-nlp/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Text of a document. Inline text wins over a location.
    pub async fn read(&self, document: &TextDocumentRef) -> Result<String> {
        if let Some(text) = &document.text {
            return Ok(text.clone());
        }
        let Some(location) = &document.location else {
            return Err(WrapperError::NoText(document.qualified_id()));
        };

        debug!("Reading text for {} from {}", document.qualified_id(), location);
        match Location::parse(location)? {
            Location::File(path) => {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| WrapperError::source_unavailable(location.as_str(), e))?;
                String::from_utf8(bytes)
                    .map_err(|e| WrapperError::source_unavailable(location.as_str(), e))
            }
            Location::Http(url) => self.fetch(location, url).await,
        }
    }

    async fn fetch(&self, location: &str, url: Url) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WrapperError::source_unavailable(location, e))?;

        if !resp.status().is_success() {
            return Err(WrapperError::source_unavailable(
                location,
                format!("HTTP {}", resp.status()),
            ));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| WrapperError::source_unavailable(location, e))?;
        String::from_utf8(bytes.to_vec()).map_err(|e| WrapperError::source_unavailable(location, e))
    }
}

impl Default for TextSource {
    fn default() -> Self {
        Self::new(30)
    }
}
