//! Keyword normalization.
//!
//! # Responsibility
//! - Merge short name, keyword phrases and subcategory into search keywords.
//! - Apply lowercase, filter-character stripping and stopword removal.
//!
//! # Invariants
//! - Normalization is idempotent: normalizing normalized output is a no-op.
//! - Filter characters are deleted, never treated as split points.
//! - With `dedup`, output is sorted and unique.

use std::collections::BTreeSet;

/// Characters deleted from every keyword.
pub const FILTER_CHARS: &[char] = &[
    '(', ')', '-', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '.', ',', ':',
];

/// Keywords dropped after filtering.
pub const STOPWORDS: &[&str] = &[
    "with", "without", "the", "on", "in", "of", "a", "&", "other", "partial",
];

/// Granularity of produced keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordMode {
    /// Every whitespace-separated word is one keyword.
    #[default]
    Words,
    /// Every trimmed phrase is one keyword.
    Phrases,
}

/// Keyword shaping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordPolicy {
    pub mode: KeywordMode,
    /// Sort and deduplicate; otherwise keep source order with duplicates.
    pub dedup: bool,
}

impl Default for KeywordPolicy {
    fn default() -> Self {
        Self {
            mode: KeywordMode::Words,
            dedup: true,
        }
    }
}

/// Raw keyword sources of one chart row.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSource<'a> {
    pub short_name: &'a str,
    /// Pipe-delimited keyword cell text.
    pub keyword_text: &'a str,
    /// Hyphen-joined subcategory label, e.g. `face-smiling`.
    pub subcategory: Option<&'a str>,
}

/// Stateless normalizer parameterized by policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordNormalizer {
    policy: KeywordPolicy,
}

impl KeywordNormalizer {
    pub fn new(policy: KeywordPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> KeywordPolicy {
        self.policy
    }

    /// Produces the keyword list for one row.
    pub fn normalize(&self, source: &KeywordSource<'_>) -> Vec<String> {
        // Short name first so non-dedup output reads naturally.
        let mut phrases: Vec<String> = vec![source.short_name.to_string()];
        phrases.extend(source.keyword_text.split('|').map(str::to_string));
        if let Some(subcategory) = source.subcategory {
            phrases.push(subcategory.replace('-', " "));
        }

        let candidates: Vec<String> = match self.policy.mode {
            KeywordMode::Words => phrases
                .iter()
                .flat_map(|phrase| phrase.split_whitespace())
                .map(normalize_term)
                .collect(),
            KeywordMode::Phrases => phrases
                .iter()
                .map(|phrase| {
                    phrase
                        .split_whitespace()
                        .map(normalize_term)
                        .filter(|word| !word.is_empty())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect(),
        };

        self.finish(candidates)
    }

    /// Normalizes an externally supplied keyword list under this policy.
    pub fn normalize_terms<I, S>(&self, terms: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = terms
            .into_iter()
            .map(|term| normalize_term(term.as_ref()))
            .collect();
        self.finish(candidates)
    }

    fn finish(&self, candidates: Vec<String>) -> Vec<String> {
        let kept = candidates
            .into_iter()
            .filter(|term| !term.is_empty() && !is_stopword(term));
        if self.policy.dedup {
            kept.collect::<BTreeSet<_>>().into_iter().collect()
        } else {
            kept.collect()
        }
    }
}

/// Lowercases `term` and deletes filter characters.
pub fn normalize_term(term: &str) -> String {
    term.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !FILTER_CHARS.contains(c))
        .collect()
}

/// Returns whether `term` is a stopword.
pub fn is_stopword(term: &str) -> bool {
    STOPWORDS.contains(&term)
}
