//! JSON rendering of the emoji index.
//!
//! # Invariants
//! - Category and record order follow insertion order.
//! - Emoji text is written as raw UTF-8, never `\u` escaped.
//! - Pretty and compact output carry identical content.

use crate::model::index::EmojiIndex;
use std::io::Write;

/// Output indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Compact,
    Pretty,
}

/// Renders the index to a JSON string.
pub fn to_json(index: &EmojiIndex, indent: Indent) -> serde_json::Result<String> {
    match indent {
        Indent::Compact => serde_json::to_string(index),
        Indent::Pretty => serde_json::to_string_pretty(index),
    }
}

/// Writes the index as JSON followed by a newline.
pub fn write_json<W: Write>(
    writer: &mut W,
    index: &EmojiIndex,
    indent: Indent,
) -> serde_json::Result<()> {
    match indent {
        Indent::Compact => serde_json::to_writer(&mut *writer, index)?,
        Indent::Pretty => serde_json::to_writer_pretty(&mut *writer, index)?,
    }
    writer.write_all(b"\n").map_err(serde_json::Error::io)
}
