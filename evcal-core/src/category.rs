//! Event categories, their palette, and the active-category set.
//!
//! The palette lives in one exhaustive `match` so that month, week, list and
//! legend all read the same label and color for a category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed event tags used for filtering and color-coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Concerts,
    Family,
    Cultural,
    Nightlife,
    Dining,
    Sports,
    Cinema,
}

/// Display attributes for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub id: &'static str,
    pub label: &'static str,
    /// Named color token shared with the stylesheet
    pub token: &'static str,
    pub rgb: (u8, u8, u8),
}

impl CategoryStyle {
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Category {
    /// Every category, in legend order.
    pub const ALL: [Category; 7] = [
        Category::Concerts,
        Category::Family,
        Category::Cultural,
        Category::Nightlife,
        Category::Dining,
        Category::Sports,
        Category::Cinema,
    ];

    pub fn style(self) -> CategoryStyle {
        match self {
            Category::Concerts => CategoryStyle {
                id: "concerts",
                label: "Concerts",
                token: "purple",
                rgb: (0x8b, 0x5c, 0xf6),
            },
            Category::Family => CategoryStyle {
                id: "family",
                label: "Family",
                token: "green",
                rgb: (0x22, 0xc5, 0x5e),
            },
            Category::Cultural => CategoryStyle {
                id: "cultural",
                label: "Cultural",
                token: "amber",
                rgb: (0xf5, 0x9e, 0x0b),
            },
            Category::Nightlife => CategoryStyle {
                id: "nightlife",
                label: "Nightlife",
                token: "pink",
                rgb: (0xec, 0x48, 0x99),
            },
            Category::Dining => CategoryStyle {
                id: "dining",
                label: "Dining",
                token: "orange",
                rgb: (0xf9, 0x73, 0x16),
            },
            Category::Sports => CategoryStyle {
                id: "sports",
                label: "Sports",
                token: "blue",
                rgb: (0x3b, 0x82, 0xf6),
            },
            Category::Cinema => CategoryStyle {
                id: "cinema",
                label: "Cinema",
                token: "red",
                rgb: (0xef, 0x44, 0x44),
            },
        }
    }

    pub fn id(self) -> &'static str {
        self.style().id
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }

    /// Exact lookup by wire id, as sent in an event's `category` field.
    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.id() == id)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A category tag outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let known: Vec<_> = Category::ALL.iter().map(|c| c.id()).collect();
        write!(
            f,
            "unknown category '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownCategory {}

/// Lenient parse for typed input: surrounding whitespace and case are ignored.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// An immutable set of active categories.
///
/// Every transition returns a new set; nothing is mutated in place. The
/// default set has every category active.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategorySet {
    bits: u8,
}

impl CategorySet {
    const ALL_BITS: u8 = (1 << Category::ALL.len()) - 1;

    pub fn all() -> Self {
        CategorySet {
            bits: Self::ALL_BITS,
        }
    }

    pub fn none() -> Self {
        CategorySet { bits: 0 }
    }

    /// Flip one category on or off.
    pub fn toggle(self, category: Category) -> Self {
        CategorySet {
            bits: self.bits ^ category.bit(),
        }
    }

    /// Add a category (no-op if already active).
    pub fn with(self, category: Category) -> Self {
        CategorySet {
            bits: self.bits | category.bit(),
        }
    }

    pub fn select_all(self) -> Self {
        Self::all()
    }

    pub fn clear_all(self) -> Self {
        Self::none()
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.bits & category.bit() != 0
    }

    /// Whether a raw event tag passes the filter. Unknown tags never do.
    pub fn is_active_tag(&self, tag: &str) -> bool {
        Category::from_id(tag).is_some_and(|c| self.is_active(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.is_active(*c))
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn is_all(&self) -> bool {
        self.bits == Self::ALL_BITS
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter().fold(CategorySet::none(), CategorySet::with)
    }
}

impl From<Vec<Category>> for CategorySet {
    fn from(categories: Vec<Category>) -> Self {
        categories.into_iter().collect()
    }
}

impl From<CategorySet> for Vec<Category> {
    fn from(set: CategorySet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_all_active() {
        let set = CategorySet::default();
        assert!(set.is_all());
        assert_eq!(set.len(), Category::ALL.len());
        for c in Category::ALL {
            assert!(set.is_active(c), "{c} should start active");
        }
    }

    #[test]
    fn toggle_returns_new_set() {
        let all = CategorySet::all();
        let without_dining = all.toggle(Category::Dining);

        assert!(all.is_active(Category::Dining));
        assert!(!without_dining.is_active(Category::Dining));
        assert_eq!(without_dining.len(), 6);
        assert_eq!(without_dining.toggle(Category::Dining), all);
    }

    #[test]
    fn clear_all_then_select_all() {
        let cleared = CategorySet::all().toggle(Category::Sports).clear_all();
        assert!(cleared.is_empty());
        assert!(Category::ALL.iter().all(|c| !cleared.is_active(*c)));

        let restored = cleared.select_all();
        assert!(restored.is_all());
        assert_eq!(restored.select_all(), restored);
    }

    #[test]
    fn unknown_tags_are_never_active() {
        let set = CategorySet::all();
        assert!(set.is_active_tag("dining"));
        assert!(!set.is_active_tag("DINING"));
        assert!(!set.is_active_tag(" dining"));
        assert!(!set.is_active_tag("theatre"));
        assert!(!set.is_active_tag(""));
    }

    #[test]
    fn parse_category_ids() {
        assert_eq!("concerts".parse::<Category>().unwrap(), Category::Concerts);
        assert_eq!(" CINEMA ".parse::<Category>().unwrap(), Category::Cinema);
        let err = "opera".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("opera"));
    }

    #[test]
    fn palette_is_unique() {
        let mut ids: Vec<_> = Category::ALL.iter().map(|c| c.id()).collect();
        let mut tokens: Vec<_> = Category::ALL.iter().map(|c| c.style().token).collect();
        ids.sort();
        ids.dedup();
        tokens.sort();
        tokens.dedup();
        assert_eq!(ids.len(), 7);
        assert_eq!(tokens.len(), 7);
        assert_eq!(Category::Dining.style().hex(), "#f97316");
    }

    #[test]
    fn set_serializes_as_id_list() {
        let set: CategorySet = [Category::Dining, Category::Concerts].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["concerts","dining"]"#);

        let back: CategorySet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
