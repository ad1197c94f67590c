//! Skin-tone variant join table.
//!
//! # Responsibility
//! - Read the modifier chart and map base glyphs to their toned renderings.
//!
//! # Invariants
//! - Only rows with exactly one skin-tone modifier contribute entries.
//! - Each contributing row adds its full sequence under both the bare base
//!   and the variation-selector form of the base.
//! - Variant lists keep chart row order.

use crate::codepoint::{decode_token, is_skin_tone_modifier, CodepointError, VARIATION_SELECTOR};
use crate::html::{data_cells, element_text, parse_document, table_rows, ChartError, ChartResult};
use log::info;
use std::collections::HashMap;

const MIN_MODIFIER_ROW_CELLS: usize = 4;

/// Base sequence -> toned sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkinToneVariantIndex {
    variants: HashMap<String, Vec<String>>,
}

impl SkinToneVariantIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from the modifier chart document.
    ///
    /// Rows with fewer than four cells are not data rows and are skipped.
    pub fn from_html(html: &str) -> ChartResult<Self> {
        let document = parse_document(html);
        let mut index = Self::new();
        let mut rows_seen = 0usize;

        for (row_number, row) in table_rows(&document).enumerate() {
            let cells = data_cells(&row);
            if cells.len() < MIN_MODIFIER_ROW_CELLS {
                continue;
            }
            rows_seen += 1;
            let codepoints = element_text(&cells[1]);
            index
                .insert_row(&codepoints)
                .map_err(|source| ChartError::Codepoint {
                    row: row_number,
                    source,
                })?;
        }

        info!(
            "event=skintone_indexed module=skintone status=ok rows={} bases={}",
            rows_seen,
            index.variants.len()
        );
        Ok(index)
    }

    /// Adds one modifier-chart row given as `U+XXXX` tokens.
    ///
    /// Returns `true` when the row carried exactly one modifier and was added.
    pub fn insert_row(&mut self, codepoints: &str) -> Result<bool, CodepointError> {
        let chars = codepoints
            .split_whitespace()
            .map(decode_token)
            .collect::<Result<Vec<char>, _>>()?;

        let mut modifiers = chars
            .iter()
            .enumerate()
            .filter(|(_, c)| is_skin_tone_modifier(**c));
        let position = match (modifiers.next(), modifiers.next()) {
            (Some((position, _)), None) => position,
            _ => return Ok(false),
        };

        let value: String = chars.iter().collect();
        let key: String = chars
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, c)| *c)
            .collect();
        let substitute_key: String = chars
            .iter()
            .enumerate()
            .map(|(i, c)| if i == position { VARIATION_SELECTOR } else { *c })
            .collect();

        self.variants.entry(key).or_default().push(value.clone());
        self.variants.entry(substitute_key).or_default().push(value);
        Ok(true)
    }

    /// Toned variants for an exact base sequence; empty when none.
    pub fn variants_for(&self, base: &str) -> &[String] {
        self.variants
            .get(base)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct keys (bare and substituted).
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
