//! MMIF annotation: runtime parameters, token bookkeeping and the adapter
//! that writes pipeline output into views.

pub mod annotator;
pub mod params;
pub mod token_index;

pub use annotator::{Annotator, ProcessingFailure};
pub use params::{parse_bool, RuntimeParams};
pub use token_index::{ResolvedSpan, TokenIndex, TokenRef};
