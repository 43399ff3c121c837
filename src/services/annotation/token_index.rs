//! Token position -> annotation id lookup used while building a view.

use crate::error::{Result, WrapperError};
use crate::nlp::Span;

/// How a token is referred to from other annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef {
    /// Annotation id, view-qualified (`v_0:t_3`) when the token lives in
    /// another view.
    pub id: String,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl TokenRef {
    pub fn new(id: impl Into<String>, start: Option<usize>, end: Option<usize>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }
}

/// A span translated into MMIF terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    pub targets: Vec<String>,
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// Maps pipeline token positions to token references.
///
/// Filled while token annotations are emitted; spans are resolved only
/// afterwards, and a hole is an error rather than a silent skip.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    refs: Vec<Option<TokenRef>>,
}

impl TokenIndex {
    pub fn with_len(len: usize) -> Self {
        Self {
            refs: vec![None; len],
        }
    }

    pub fn insert(&mut self, position: usize, token: TokenRef) {
        if position >= self.refs.len() {
            self.refs.resize(position + 1, None);
        }
        self.refs[position] = Some(token);
    }

    pub fn get(&self, position: usize) -> Option<&TokenRef> {
        self.refs.get(position).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Target ids of a span, plus its character extent when both boundary
    /// tokens carry offsets.
    pub fn resolve(&self, span: &Span) -> Result<ResolvedSpan> {
        let mut targets = Vec::with_capacity(span.len());
        for position in span.start..span.end {
            let token = self
                .get(position)
                .ok_or(WrapperError::IncompleteIndex(position))?;
            targets.push(token.id.clone());
        }

        let last = span.end.checked_sub(1);
        let offsets = match (self.get(span.start), last.and_then(|l| self.get(l))) {
            (Some(first), Some(last)) if !span.is_empty() => first.start.zip(last.end),
            _ => None,
        };

        Ok(ResolvedSpan {
            targets,
            start: offsets.map(|(start, _)| start),
            end: offsets.map(|(_, end)| end),
        })
    }
}
