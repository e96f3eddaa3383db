//! # Item Index
//!
//! The index is the only state shared across apply cycles. It is built once
//! from the [`PageMarkup`] item list and never mutated; when the markup
//! changes, the session rebuilds it from scratch.
//!
//! ## Field Extraction
//!
//! For every item, each field marker beneath it declares one or more
//! categories (comma-separated). The marker's text is canonicalized (trim +
//! lowercase) and appended to every declared category, so one item can hold
//! several values per category:
//!
//! ```text
//! <div custom-filter-item>
//!   <span custom-filter-field="color">Red</span>       color -> ["red", "blue"]
//!   <span custom-filter-field="color, tone">Blue</span> tone  -> ["blue"]
//! </div>
//! ```
//!
//! Items without any marker are kept; they fail every active filter.

use crate::filter::value::leading_number;
use crate::model::{split_categories, Item};
use crate::snapshot::{ItemMarkup, PageMarkup};
use std::collections::BTreeSet;

/// Categories compared by equality instead of substring containment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExactCategories(BTreeSet<String>);

impl ExactCategories {
    /// Collect exact-match opt-ins from auto-populated groups and field markers.
    pub fn from_page(page: &PageMarkup) -> Self {
        let groups = page
            .groups
            .iter()
            .filter(|g| g.exact)
            .map(|g| g.category.trim().to_string());
        let markers = page.exact_fields.iter().flat_map(|f| split_categories(f));
        groups.chain(markers).collect()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ExactCategories {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Lowest and highest numeric value observed for a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemIndex {
    items: Vec<Item>,
}

impl ItemIndex {
    pub fn build(markup: &[ItemMarkup]) -> Self {
        let items = markup
            .iter()
            .map(|m| {
                let mut item = Item::new(m.handle.clone());
                for marker in &m.fields {
                    for category in split_categories(&marker.field) {
                        item.fields.push(&category, &marker.text);
                    }
                }
                item
            })
            .collect();
        Self { items }
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Items in markup order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct values of a category across all items, sorted.
    pub fn distinct_values(&self, category: &str) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| item.fields.values(category).iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Min/max over each item's first value that parses as a number.
    pub fn numeric_extent(&self, category: &str) -> Option<Extent> {
        self.items
            .iter()
            .filter_map(|item| item.fields.first(category).and_then(leading_number))
            .fold(None, |acc: Option<Extent>, n| {
                Some(match acc {
                    None => Extent { min: n, max: n },
                    Some(e) => Extent {
                        min: e.min.min(n),
                        max: e.max.max(n),
                    },
                })
            })
    }
}
