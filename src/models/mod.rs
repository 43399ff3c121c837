//! Data models for mmif-nlp.

pub mod metadata;
pub mod mmif;
pub mod vocabulary;

pub use metadata::{AppMetadata, IoSpec, ParameterSpec};
pub use mmif::{Annotation, Mmif, MmifMetadata, TextDocumentRef, View, ViewMetadata};
