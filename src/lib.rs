//! mmif-nlp: an MMIF annotation service wrapping an English NLP pipeline.
//!
//! Each text document in an input MMIF gets one view holding tokens (with
//! part-of-speech tags and lemmas), noun chunks, sentences and named
//! entities. Entities can optionally be linked to DBpedia.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod nlp;
pub mod server;
pub mod services;
pub mod utils;

pub use error::{Result, WrapperError};
