//! Utility modules.

pub mod offsets;

pub use offsets::{char_slice, CharIndex, Utf16Index};

#[cfg(test)]
pub mod test_server;
