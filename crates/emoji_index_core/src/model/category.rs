//! Output category enumeration and chart label mapping.
//!
//! # Invariants
//! - "Smileys & Emotion" and "People & Body" consolidate into one id.
//! - "Component" is recognized but contributes no records.
//! - Any other label is a table-shape violation.

use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Output category of an emoji record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryId {
    SmileysPeople,
    AnimalsNature,
    FoodDrink,
    Activities,
    TravelPlaces,
    Objects,
    Symbols,
    Flags,
}

/// Outcome of mapping one chart category header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySlot {
    /// Rows below this header belong to the given category.
    Category(CategoryId),
    /// Rows below this header are skipped until the next header.
    Ignored,
}

const CATEGORY_LABELS: &[(&str, CategorySlot)] = &[
    ("Smileys & Emotion", CategorySlot::Category(CategoryId::SmileysPeople)),
    ("People & Body", CategorySlot::Category(CategoryId::SmileysPeople)),
    ("Component", CategorySlot::Ignored),
    ("Animals & Nature", CategorySlot::Category(CategoryId::AnimalsNature)),
    ("Food & Drink", CategorySlot::Category(CategoryId::FoodDrink)),
    ("Activities", CategorySlot::Category(CategoryId::Activities)),
    ("Travel & Places", CategorySlot::Category(CategoryId::TravelPlaces)),
    ("Objects", CategorySlot::Category(CategoryId::Objects)),
    ("Symbols", CategorySlot::Category(CategoryId::Symbols)),
    ("Flags", CategorySlot::Category(CategoryId::Flags)),
];

impl CategorySlot {
    /// Maps a chart header label; `None` for labels outside the enumeration.
    ///
    /// Surrounding and repeated inner whitespace is ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ");
        CATEGORY_LABELS
            .iter()
            .find(|(known, _)| *known == normalized)
            .map(|(_, slot)| *slot)
    }
}

impl CategoryId {
    /// All categories in output-id order.
    pub const ALL: [CategoryId; 8] = [
        Self::SmileysPeople,
        Self::AnimalsNature,
        Self::FoodDrink,
        Self::Activities,
        Self::TravelPlaces,
        Self::Objects,
        Self::Symbols,
        Self::Flags,
    ];

    /// Stable numeric id used as the serialized key.
    pub fn id(self) -> u8 {
        match self {
            Self::SmileysPeople => 0,
            Self::AnimalsNature => 1,
            Self::FoodDrink => 2,
            Self::Activities => 3,
            Self::TravelPlaces => 4,
            Self::Objects => 5,
            Self::Symbols => 6,
            Self::Flags => 7,
        }
    }

    /// Looks up a category by numeric id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::SmileysPeople => "smileys_people",
            Self::AnimalsNature => "animals_nature",
            Self::FoodDrink => "food_drink",
            Self::Activities => "activities",
            Self::TravelPlaces => "travel_places",
            Self::Objects => "objects",
            Self::Symbols => "symbols",
            Self::Flags => "flags",
        }
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// JSON object keys must be strings, so the id goes out as its decimal text.
impl Serialize for CategoryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryId, CategorySlot};

    #[test]
    fn smileys_and_people_consolidate() {
        let smileys = CategorySlot::from_label("Smileys & Emotion");
        let people = CategorySlot::from_label("People & Body");
        assert_eq!(smileys, people);
        assert_eq!(smileys, Some(CategorySlot::Category(CategoryId::SmileysPeople)));
    }

    #[test]
    fn component_is_ignored() {
        assert_eq!(
            CategorySlot::from_label("Component"),
            Some(CategorySlot::Ignored)
        );
    }

    #[test]
    fn label_whitespace_is_normalized() {
        assert_eq!(
            CategorySlot::from_label("  Food  &\nDrink "),
            Some(CategorySlot::Category(CategoryId::FoodDrink))
        );
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(CategorySlot::from_label("Miscellaneous"), None);
    }

    #[test]
    fn ids_round_trip() {
        for category in CategoryId::ALL {
            assert_eq!(CategoryId::from_id(category.id()), Some(category));
        }
        assert_eq!(CategoryId::from_id(8), None);
    }
}
