//! Emoji keyword index pipeline.
//!
//! Turns the Unicode emoji chart and its skin-tone modifier chart into a
//! category-grouped keyword index ready for JSON output.

pub mod codepoint;
pub mod html;
pub mod keywords;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod pipeline;
pub mod segmenter;
pub mod serialize;
pub mod skintone;

pub use codepoint::{decode_sequence, encode_tokens, CodepointError, VARIATION_SELECTOR};
pub use html::{ChartError, ChartResult};
pub use keywords::{KeywordMode, KeywordNormalizer, KeywordPolicy, KeywordSource};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{CategoryId, CategorySlot};
pub use model::index::EmojiIndex;
pub use model::record::EmojiRecord;
pub use overlay::{CorrectionError, Corrections, ExtraKeyword, OverlayReport};
pub use pipeline::{
    build_index, run, write_output, CorrectionFiles, PipelineConfig, PipelineError,
    PipelineOutput, PipelineResult,
};
pub use segmenter::{segment_chart, RawEmojiRow};
pub use serialize::{to_json, write_json, Indent};
pub use skintone::SkinToneVariantIndex;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
