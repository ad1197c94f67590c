//! Post-hoc corrections applied to an assembled index.
//!
//! # Responsibility
//! - Load correction lists from CSV files.
//! - Apply force-selector, extra-keyword and exclusion passes in that order.
//!
//! # Invariants
//! - Missing correction targets are logged and never abort the run.
//! - Extra keywords and exclusions match the post-selector sequence.

use crate::codepoint::{decode_sequence, looks_like_tokens, CodepointError, VARIATION_SELECTOR};
use crate::keywords::{normalize_term, KeywordPolicy};
use crate::model::index::EmojiIndex;
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Result type for correction loading.
pub type CorrectionResult<T> = Result<T, CorrectionError>;

/// Failure while loading a correction file.
#[derive(Debug)]
pub enum CorrectionError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not well-formed CSV.
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    /// Sequence field holds malformed `U+XXXX` tokens.
    Codepoint {
        path: PathBuf,
        line: usize,
        source: CodepointError,
    },
    /// A required column is absent or blank.
    MissingField {
        path: PathBuf,
        line: usize,
        field: &'static str,
    },
}

impl Display for CorrectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read correction file `{}`: {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "malformed correction file `{}`: {source}", path.display())
            }
            Self::Codepoint { path, line, source } => {
                write!(f, "{}:{line}: {source}", path.display())
            }
            Self::MissingField { path, line, field } => {
                write!(f, "{}:{line}: missing `{field}` field", path.display())
            }
        }
    }
}

impl Error for CorrectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Codepoint { source, .. } => Some(source),
            Self::MissingField { .. } => None,
        }
    }
}

/// One extra keyword for one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraKeyword {
    pub sequence: String,
    pub keyword: String,
}

/// Correction lists for the three overlay passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corrections {
    /// Sequences that get U+FE0F appended.
    pub force_variation_selector: Vec<String>,
    pub extra_keywords: Vec<ExtraKeyword>,
    /// Sequences removed from the index.
    pub exclude: Vec<String>,
}

/// Counts of what the overlay changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayReport {
    pub selectors_forced: usize,
    pub keywords_added: usize,
    pub records_excluded: usize,
    pub targets_missing: usize,
}

impl Corrections {
    /// Loads every correction file that is given; `None` skips that pass.
    ///
    /// A given path that cannot be read is an error.
    pub fn load(
        force_variation_selector: Option<&Path>,
        extra_keywords: Option<&Path>,
        exclude: Option<&Path>,
    ) -> CorrectionResult<Self> {
        let mut corrections = Self::default();
        if let Some(path) = force_variation_selector {
            corrections.force_variation_selector = load_sequence_list(path)?;
        }
        if let Some(path) = extra_keywords {
            corrections.extra_keywords = load_extra_keywords(path)?;
        }
        if let Some(path) = exclude {
            corrections.exclude = load_sequence_list(path)?;
        }
        Ok(corrections)
    }

    pub fn is_empty(&self) -> bool {
        self.force_variation_selector.is_empty()
            && self.extra_keywords.is_empty()
            && self.exclude.is_empty()
    }

    /// Applies all passes to `index` in the fixed order.
    pub fn apply(&self, index: &mut EmojiIndex, policy: KeywordPolicy) -> OverlayReport {
        let mut report = OverlayReport::default();
        self.force_selectors(index, &mut report);
        self.add_extra_keywords(index, policy, &mut report);
        self.exclude_records(index, &mut report);
        info!(
            "event=corrections_applied module=overlay selectors_forced={} keywords_added={} records_excluded={} targets_missing={}",
            report.selectors_forced,
            report.keywords_added,
            report.records_excluded,
            report.targets_missing
        );
        report
    }

    fn force_selectors(&self, index: &mut EmojiIndex, report: &mut OverlayReport) {
        for sequence in &self.force_variation_selector {
            let mut matched = false;
            for record in index.records_mut() {
                if record.sequence != *sequence {
                    continue;
                }
                matched = true;
                if !record.sequence.ends_with(VARIATION_SELECTOR) {
                    record.sequence.push(VARIATION_SELECTOR);
                    report.selectors_forced += 1;
                }
            }
            if !matched {
                report.targets_missing += 1;
                warn!(
                    "event=correction_missing module=overlay pass=force_vs sequence={sequence}"
                );
            }
        }
    }

    fn add_extra_keywords(
        &self,
        index: &mut EmojiIndex,
        policy: KeywordPolicy,
        report: &mut OverlayReport,
    ) {
        for extra in &self.extra_keywords {
            let Some(record) = index.find_mut(&extra.sequence) else {
                report.targets_missing += 1;
                warn!(
                    "event=correction_missing module=overlay pass=extra_keywords sequence={} keyword={}",
                    extra.sequence, extra.keyword
                );
                continue;
            };
            record.add_keyword(extra.keyword.clone(), policy.dedup);
            report.keywords_added += 1;
        }
    }

    fn exclude_records(&self, index: &mut EmojiIndex, report: &mut OverlayReport) {
        for sequence in &self.exclude {
            let removed_from = index.remove(sequence);
            if removed_from.is_empty() {
                report.targets_missing += 1;
                warn!("event=correction_missing module=overlay pass=exclude sequence={sequence}");
                continue;
            }
            for category in removed_from {
                report.records_excluded += 1;
                info!(
                    "event=correction_excluded module=overlay sequence={sequence} category={}",
                    category.name()
                );
            }
        }
    }
}

/// Reads a one-column sequence list; extra columns are ignored.
pub fn load_sequence_list(path: &Path) -> CorrectionResult<Vec<String>> {
    read_rows(path)?
        .into_iter()
        .map(|(line, fields)| parse_sequence_field(path, line, fields.first().map(String::as_str)))
        .collect()
}

/// Reads `sequence,keyword` pairs.
pub fn load_extra_keywords(path: &Path) -> CorrectionResult<Vec<ExtraKeyword>> {
    read_rows(path)?
        .into_iter()
        .map(|(line, fields)| {
            let sequence = parse_sequence_field(path, line, fields.first().map(String::as_str))?;
            let keyword = fields
                .get(1)
                .map(|raw| normalize_term(raw))
                .filter(|keyword| !keyword.is_empty())
                .ok_or_else(|| CorrectionError::MissingField {
                    path: path.to_path_buf(),
                    line,
                    field: "keyword",
                })?;
            Ok(ExtraKeyword { sequence, keyword })
        })
        .collect()
}

/// Parses correction CSV into `(line number, trimmed fields)` rows.
///
/// One record per line. Quoted fields are unquoted and may contain commas.
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_rows(text: &str) -> Result<Vec<(usize, Vec<String>)>, csv::Error> {
    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(trimmed.as_bytes());
        if let Some(record) = reader.records().next() {
            let fields = record?.iter().map(str::to_string).collect();
            rows.push((index + 1, fields));
        }
    }
    Ok(rows)
}

fn read_rows(path: &Path) -> CorrectionResult<Vec<(usize, Vec<String>)>> {
    let text = std::fs::read_to_string(path).map_err(|source| CorrectionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(&text).map_err(|source| CorrectionError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_sequence_field(path: &Path, line: usize, field: Option<&str>) -> CorrectionResult<String> {
    let raw = field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CorrectionError::MissingField {
            path: path.to_path_buf(),
            line,
            field: "sequence",
        })?;
    if !looks_like_tokens(raw) {
        return Ok(raw.to_string());
    }
    decode_sequence(raw).map_err(|source| CorrectionError::Codepoint {
        path: path.to_path_buf(),
        line,
        source,
    })
}
