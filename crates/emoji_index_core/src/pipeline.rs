//! End-to-end index construction.
//!
//! # Responsibility
//! - Join segmented chart rows with skin-tone variants and keywords.
//! - Apply corrections and hand back a ready-to-serialize index.
//! - Load correction files and write the finished index.
//!
//! # Invariants
//! - Stages run strictly in order; category and insertion order are kept.
//! - Chart, correction-file and output errors abort; missing correction
//!   targets do not.

use crate::html::ChartError;
use crate::keywords::{KeywordNormalizer, KeywordPolicy, KeywordSource};
use crate::model::index::EmojiIndex;
use crate::model::record::EmojiRecord;
use crate::overlay::{CorrectionError, Corrections, OverlayReport};
use crate::segmenter::{segment_chart, RawEmojiRow, NEW_EMOJI_MARKER};
use crate::serialize::{write_json, Indent};
use crate::skintone::SkinToneVariantIndex;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::Path;

/// Result type for pipeline APIs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fatal pipeline failure.
#[derive(Debug)]
pub enum PipelineError {
    /// The primary chart violated its expected shape.
    Chart(ChartError),
    /// The modifier chart violated its expected shape.
    SkinToneChart(ChartError),
    /// A correction file could not be read or parsed.
    Correction(CorrectionError),
    /// The index could not be serialized or written.
    Serialize(serde_json::Error),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chart(err) => write!(f, "emoji chart: {err}"),
            Self::SkinToneChart(err) => write!(f, "skin-tone chart: {err}"),
            Self::Correction(err) => write!(f, "corrections: {err}"),
            Self::Serialize(err) => write!(f, "writing index: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Chart(err) | Self::SkinToneChart(err) => Some(err),
            Self::Correction(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<CorrectionError> for PipelineError {
    fn from(value: CorrectionError) -> Self {
        Self::Correction(value)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Pipeline behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub keyword_policy: KeywordPolicy,
    /// Glyph stripped from short names.
    pub new_marker: char,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            keyword_policy: KeywordPolicy::default(),
            new_marker: NEW_EMOJI_MARKER,
        }
    }
}

/// Parsed index plus what the correction pass did.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub index: EmojiIndex,
    pub report: OverlayReport,
}

/// Optional correction file locations, one per pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrectionFiles<'a> {
    pub force_variation_selector: Option<&'a Path>,
    pub extra_keywords: Option<&'a Path>,
    pub exclude: Option<&'a Path>,
}

impl CorrectionFiles<'_> {
    /// Loads every given file; absent paths leave their pass empty.
    pub fn load(&self) -> PipelineResult<Corrections> {
        let corrections =
            Corrections::load(self.force_variation_selector, self.extra_keywords, self.exclude)?;
        Ok(corrections)
    }
}

/// Builds the uncorrected index from both chart documents.
pub fn build_index(
    chart_html: &str,
    modifiers_html: &str,
    config: &PipelineConfig,
) -> PipelineResult<EmojiIndex> {
    let variants =
        SkinToneVariantIndex::from_html(modifiers_html).map_err(PipelineError::SkinToneChart)?;
    let rows = segment_chart(chart_html, config.new_marker).map_err(PipelineError::Chart)?;
    Ok(assemble(rows, &variants, KeywordNormalizer::new(config.keyword_policy)))
}

/// Builds the index and applies `corrections`.
pub fn run(
    chart_html: &str,
    modifiers_html: &str,
    corrections: &Corrections,
    config: &PipelineConfig,
) -> PipelineResult<PipelineOutput> {
    let mut index = build_index(chart_html, modifiers_html, config)?;
    let report = corrections.apply(&mut index, config.keyword_policy);
    info!(
        "event=index_built module=pipeline status=ok records={}",
        index.len()
    );
    Ok(PipelineOutput { index, report })
}

/// Writes the index as JSON and flushes `writer`.
pub fn write_output<W: Write>(
    writer: &mut W,
    output: &PipelineOutput,
    indent: Indent,
) -> PipelineResult<()> {
    write_json(writer, &output.index, indent)?;
    writer.flush().map_err(serde_json::Error::io)?;
    Ok(())
}

/// Joins raw rows with variants and normalized keywords.
pub fn assemble(
    rows: Vec<RawEmojiRow>,
    variants: &SkinToneVariantIndex,
    normalizer: KeywordNormalizer,
) -> EmojiIndex {
    let mut index = EmojiIndex::new();
    for row in rows {
        let keywords = normalizer.normalize(&KeywordSource {
            short_name: &row.short_name,
            keyword_text: &row.keyword_text,
            subcategory: row.subcategory.as_deref(),
        });
        let mut record = EmojiRecord::new(row.sequence, keywords);
        record.skin_tone_variants = variants.variants_for(&record.sequence).to_vec();

        let sequence = record.sequence.clone();
        if !index.push(row.category, record) {
            debug!(
                "event=duplicate_skipped module=pipeline category={} sequence={sequence}",
                row.category.name()
            );
        }
    }
    index
}
