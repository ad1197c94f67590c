//! Shared HTML chart helpers.
//!
//! # Responsibility
//! - Parse chart documents and walk table rows in document order.
//! - Define the chart-level error type shared by both chart readers.

use crate::codepoint::CodepointError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::fmt::{Display, Formatter};

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table tr").expect("valid row selector"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("valid cell selector"));

/// Result type for chart parsing.
pub type ChartResult<T> = Result<T, ChartError>;

/// Fatal chart-shape or content error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// A codepoint cell holds a malformed token.
    Codepoint {
        row: usize,
        source: CodepointError,
    },
    /// A category header is not part of the known enumeration.
    UnknownCategory(String),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codepoint { row, source } => write!(f, "chart row {row}: {source}"),
            Self::UnknownCategory(label) => write!(f, "unknown chart category `{label}`"),
        }
    }
}

impl Error for ChartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codepoint { source, .. } => Some(source),
            Self::UnknownCategory(_) => None,
        }
    }
}

/// Parses an HTML document leniently.
pub(crate) fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Returns every table row of the document in document order.
pub(crate) fn table_rows(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.select(&ROW_SELECTOR)
}

/// Returns the `td` cells of one row.
pub(crate) fn data_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.select(&CELL_SELECTOR).collect()
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
