//! Service layer for the annotation app.
//!
//! Domain logic lives here so the HTTP server and the CLI share it.

pub mod annotation;
pub mod linking;
pub mod text_source;

pub use annotation::{Annotator, ProcessingFailure, RuntimeParams};
pub use linking::{EntityLinker, LinkMap, LinkedEntity, SpotlightLinker};
pub use text_source::{Location, TextSource};
