//! Predicate evaluation.
//!
//! An item matches a [`FilterSet`] when it satisfies every category in it;
//! there is no cross-category OR.

use super::set::{CategoryFilter, FilterSet, Logic, TextFilter};
use super::value::{leading_number, parse_instant};
use crate::index::ExactCategories;
use crate::model::FieldMap;

impl FilterSet {
    /// Check whether an item's fields satisfy every active category.
    pub fn matches(&self, fields: &FieldMap, exact: &ExactCategories) -> bool {
        self.iter().all(|(category, filter)| {
            matches_category(self, category, filter, fields, exact)
        })
    }
}

fn matches_category(
    set: &FilterSet,
    category: &str,
    filter: &CategoryFilter,
    fields: &FieldMap,
    exact: &ExactCategories,
) -> bool {
    match filter {
        CategoryFilter::Text(text) if set.is_wildcard(category) => matches_wildcard(text, fields),
        CategoryFilter::Text(text) => {
            matches_text(text, fields.values(category), exact.contains(category))
        }
        CategoryFilter::Range(bounds) => match fields.first(category).and_then(leading_number) {
            Some(n) => bounds.contains(&n),
            None => false,
        },
        CategoryFilter::Date(bounds) => match fields.first(category).and_then(parse_instant) {
            Some(when) => bounds.contains(&when),
            None => false,
        },
    }
}

/// Every wildcard term must appear somewhere in the item's fields.
fn matches_wildcard(text: &TextFilter, fields: &FieldMap) -> bool {
    let haystack = fields.haystack();
    text.values.iter().all(|term| haystack.contains(term.as_str()))
}

fn matches_text(text: &TextFilter, item_values: &[String], exact: bool) -> bool {
    let satisfied = |term: &String| {
        item_values.iter().any(|value| {
            if exact {
                value == term
            } else {
                value.contains(term.as_str())
            }
        })
    };
    match text.logic {
        Logic::And => text.values.iter().all(satisfied),
        Logic::Or => text.values.iter().any(satisfied),
    }
}
