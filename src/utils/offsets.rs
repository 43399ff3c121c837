//! Byte/character offset conversion.
//!
//! Rust string slicing works on UTF-8 byte offsets, while MMIF annotations
//! count Unicode scalar values. Everything the pipeline reports is converted
//! to character offsets once, at the boundary.

/// Precomputed byte -> char offset table for one text.
#[derive(Debug, Clone)]
pub struct CharIndex {
    /// Byte offset of each char boundary, plus a final entry for `len()`.
    boundaries: Vec<usize>,
}

impl CharIndex {
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Number of chars in the indexed text.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Char offset of a byte offset. Offsets inside a multi-byte char map to
    /// that char.
    pub fn byte_to_char(&self, byte: usize) -> usize {
        match self.boundaries.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    /// Byte offset of a char offset, clamped to the end of the text.
    pub fn char_to_byte(&self, ch: usize) -> usize {
        let i = ch.min(self.boundaries.len() - 1);
        self.boundaries[i]
    }
}

/// UTF-16 code unit -> char offset table, for services that count in
/// UTF-16 (Java and JavaScript string indices).
#[derive(Debug, Clone)]
pub struct Utf16Index {
    /// UTF-16 offset of each char boundary, plus a final entry for the end.
    boundaries: Vec<usize>,
}

impl Utf16Index {
    pub fn new(text: &str) -> Self {
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut unit = 0;
        for c in text.chars() {
            boundaries.push(unit);
            unit += c.len_utf16();
        }
        boundaries.push(unit);
        Self { boundaries }
    }

    /// Char offset of a UTF-16 offset. `None` past the end or inside a
    /// surrogate pair.
    pub fn to_char(&self, unit: usize) -> Option<usize> {
        self.boundaries.binary_search(&unit).ok()
    }
}

/// Slice `text` by char offsets, clamping out-of-range ends.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let index = CharIndex::new(text);
    &text[index.char_to_byte(start)..index.char_to_byte(end)]
}
