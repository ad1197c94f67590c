//! Emoji record model.
//!
//! # Invariants
//! - `sequence` holds decoded text, never `U+XXXX` tokens.
//! - `skin_tone_variants` keeps modifier-chart row order.
//! - Under a deduplicating keyword policy, `keywords` is sorted and unique.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

/// One emoji with its rendering variants and search keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiRecord {
    /// Decoded character sequence.
    pub sequence: String,
    /// Fully toned sequences, light to dark.
    pub skin_tone_variants: Vec<String>,
    /// Normalized keywords.
    pub keywords: Vec<String>,
}

impl EmojiRecord {
    /// Creates a record with no variants.
    pub fn new(sequence: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            sequence: sequence.into(),
            skin_tone_variants: Vec::new(),
            keywords,
        }
    }

    /// Adds one keyword.
    ///
    /// With `dedup`, the keyword is placed at its sorted position and ignored
    /// when already present; otherwise it is appended.
    pub fn add_keyword(&mut self, keyword: impl Into<String>, dedup: bool) {
        let keyword = keyword.into();
        if !dedup {
            self.keywords.push(keyword);
            return;
        }
        if let Err(position) = self.keywords.binary_search(&keyword) {
            self.keywords.insert(position, keyword);
        }
    }

    /// Returns whether the record carries `keyword`.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|existing| existing == keyword)
    }
}

// Serialized as a `[sequence, variants, keywords]` triple.
impl Serialize for EmojiRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.sequence)?;
        tuple.serialize_element(&self.skin_tone_variants)?;
        tuple.serialize_element(&self.keywords)?;
        tuple.end()
    }
}
