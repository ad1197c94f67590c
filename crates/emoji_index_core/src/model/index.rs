//! Category-grouped emoji index.
//!
//! # Responsibility
//! - Hold records per category in chart insertion order.
//! - Locate and remove records by exact sequence across all categories.
//!
//! # Invariants
//! - Category order is the order in which categories were first pushed.
//! - A sequence appears at most once per category when built via `push`.

use crate::model::category::CategoryId;
use crate::model::record::EmojiRecord;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Mapping from category to its ordered record list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiIndex {
    categories: IndexMap<CategoryId, Vec<EmojiRecord>>,
}

impl EmojiIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to `category`.
    ///
    /// Returns `false` without inserting when the category already holds the
    /// same sequence.
    pub fn push(&mut self, category: CategoryId, record: EmojiRecord) -> bool {
        let records = self.categories.entry(category).or_default();
        if records.iter().any(|existing| existing.sequence == record.sequence) {
            return false;
        }
        records.push(record);
        true
    }

    /// Returns the records of one category.
    pub fn records(&self, category: CategoryId) -> &[EmojiRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &[EmojiRecord])> {
        self.categories
            .iter()
            .map(|(category, records)| (*category, records.as_slice()))
    }

    /// Iterates every record mutably, in serialization order.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut EmojiRecord> {
        self.categories.values_mut().flat_map(|records| records.iter_mut())
    }

    /// Finds the first record with exactly `sequence`.
    pub fn find(&self, sequence: &str) -> Option<(CategoryId, &EmojiRecord)> {
        self.categories.iter().find_map(|(category, records)| {
            records
                .iter()
                .find(|record| record.sequence == sequence)
                .map(|record| (*category, record))
        })
    }

    /// Finds the first record with exactly `sequence`, mutably.
    pub fn find_mut(&mut self, sequence: &str) -> Option<&mut EmojiRecord> {
        self.records_mut().find(|record| record.sequence == sequence)
    }

    /// Removes every record with exactly `sequence`.
    ///
    /// Returns the categories the sequence was removed from.
    pub fn remove(&mut self, sequence: &str) -> Vec<CategoryId> {
        let mut removed_from = Vec::new();
        for (category, records) in self.categories.iter_mut() {
            let before = records.len();
            records.retain(|record| record.sequence != sequence);
            if records.len() != before {
                removed_from.push(*category);
            }
        }
        removed_from
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Returns whether no records are present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for EmojiIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.categories.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::EmojiIndex;
    use crate::model::category::CategoryId;
    use crate::model::record::EmojiRecord;

    fn record(sequence: &str) -> EmojiRecord {
        EmojiRecord::new(sequence, Vec::new())
    }

    #[test]
    fn push_rejects_duplicate_sequence_in_same_category() {
        let mut index = EmojiIndex::new();
        assert!(index.push(CategoryId::Symbols, record("\u{2764}")));
        assert!(!index.push(CategoryId::Symbols, record("\u{2764}")));
        assert!(index.push(CategoryId::Objects, record("\u{2764}")));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn iteration_preserves_category_insertion_order() {
        let mut index = EmojiIndex::new();
        index.push(CategoryId::Flags, record("a"));
        index.push(CategoryId::SmileysPeople, record("b"));
        index.push(CategoryId::Flags, record("c"));

        let order: Vec<CategoryId> = index.iter().map(|(category, _)| category).collect();
        assert_eq!(order, vec![CategoryId::Flags, CategoryId::SmileysPeople]);
        let flags: Vec<&str> = index
            .records(CategoryId::Flags)
            .iter()
            .map(|r| r.sequence.as_str())
            .collect();
        assert_eq!(flags, vec!["a", "c"]);
    }

    #[test]
    fn remove_reports_categories() {
        let mut index = EmojiIndex::new();
        index.push(CategoryId::Objects, record("x"));
        index.push(CategoryId::Symbols, record("x"));
        index.push(CategoryId::Symbols, record("y"));

        assert_eq!(
            index.remove("x"),
            vec![CategoryId::Objects, CategoryId::Symbols]
        );
        assert!(index.find("x").is_none());
        assert!(index.remove("x").is_empty());
        assert_eq!(index.len(), 1);
    }
}
