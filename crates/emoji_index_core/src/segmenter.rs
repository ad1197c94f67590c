//! Primary chart segmentation.
//!
//! # Responsibility
//! - Walk chart rows while tracking category and subcategory context.
//! - Yield one raw record per five-cell data row.
//!
//! # Invariants
//! - A category header clears the subcategory.
//! - Rows under an ignored category, or before any category, yield nothing.
//! - Unknown category labels abort segmentation.

use crate::codepoint::decode_sequence;
use crate::html::{data_cells, element_text, parse_document, table_rows, ChartError, ChartResult};
use crate::model::category::{CategoryId, CategorySlot};
use log::{debug, info};
use once_cell::sync::Lazy;
use scraper::Selector;

/// Marker glyph the chart prefixes to names new in the current version.
pub const NEW_EMOJI_MARKER: char = '\u{229B}';

const DATA_ROW_CELLS: usize = 5;

static BIGHEAD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th.bighead").expect("valid bighead selector"));
static MEDIUMHEAD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th.mediumhead").expect("valid mediumhead selector"));

/// One data row before keyword normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEmojiRow {
    pub category: CategoryId,
    /// Raw subcategory label, e.g. `face-smiling`.
    pub subcategory: Option<String>,
    /// Decoded character sequence.
    pub sequence: String,
    pub short_name: String,
    /// Pipe-delimited keyword cell text.
    pub keyword_text: String,
}

/// Segments the primary chart document into raw rows.
///
/// `new_marker` is stripped from short names.
pub fn segment_chart(html: &str, new_marker: char) -> ChartResult<Vec<RawEmojiRow>> {
    let document = parse_document(html);
    let mut rows = Vec::new();
    let mut category: Option<CategorySlot> = None;
    let mut subcategory: Option<String> = None;

    for (row_number, row) in table_rows(&document).enumerate() {
        if let Some(header) = row.select(&BIGHEAD_SELECTOR).next() {
            let label = element_text(&header);
            let slot = CategorySlot::from_label(&label)
                .ok_or_else(|| ChartError::UnknownCategory(label.clone()))?;
            debug!("event=chart_category module=segmenter label={label:?} slot={slot:?}");
            category = Some(slot);
            subcategory = None;
            continue;
        }

        if let Some(header) = row.select(&MEDIUMHEAD_SELECTOR).next() {
            subcategory = Some(element_text(&header)).filter(|label| !label.is_empty());
            continue;
        }

        let cells = data_cells(&row);
        if cells.len() != DATA_ROW_CELLS {
            continue;
        }

        let current = match category {
            Some(CategorySlot::Category(current)) => current,
            Some(CategorySlot::Ignored) => continue,
            None => {
                debug!(
                    "event=chart_row_skipped module=segmenter row={row_number} reason=no_category"
                );
                continue;
            }
        };

        let sequence = decode_sequence(&element_text(&cells[1])).map_err(|source| {
            ChartError::Codepoint {
                row: row_number,
                source,
            }
        })?;
        let short_name = element_text(&cells[3])
            .replace(new_marker, "")
            .trim()
            .to_string();

        rows.push(RawEmojiRow {
            category: current,
            subcategory: subcategory.clone(),
            sequence,
            short_name,
            keyword_text: element_text(&cells[4]),
        });
    }

    info!(
        "event=chart_parsed module=segmenter status=ok rows={}",
        rows.len()
    );
    Ok(rows)
}
