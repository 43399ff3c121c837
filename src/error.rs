//! Error types for the annotation service.

use thiserror::Error;

/// Errors raised while turning an input MMIF into an annotated one.
#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("Invalid MMIF: {0}")]
    InvalidMmif(String),

    #[error("Document {0} has neither text nor a location")]
    NoText(String),

    #[error("Text source unavailable ({location}): {reason}")]
    SourceUnavailable { location: String, reason: String },

    #[error("Token index has no entry for position {0}")]
    IncompleteIndex(usize),

    #[error("Pipeline failed: {0}")]
    Pipeline(String),

    #[error("Entity linking failed: {0}")]
    Linking(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WrapperError {
    pub fn source_unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        WrapperError::SourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the caller supplied something unusable, as opposed to a
    /// failure inside the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, WrapperError::InvalidMmif(_) | WrapperError::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, WrapperError>;
