//! The per-cycle filter set.

use crate::model::Handle;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How multiple values of one text category combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Logic {
    /// Item must satisfy every value.
    And,
    /// Item must satisfy at least one value.
    #[default]
    Or,
}

impl Logic {
    /// Parse a checkbox-logic marker: `all` (any case) is AND, everything else OR.
    pub fn from_marker(marker: &str) -> Self {
        if marker.trim().eq_ignore_ascii_case("all") {
            Logic::And
        } else {
            Logic::Or
        }
    }
}

/// Text terms for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextFilter {
    pub values: Vec<String>,
    pub logic: Logic,
    /// Parallel to `values`: the toggle that contributed each value, if any.
    pub sources: Vec<Option<Handle>>,
}

impl TextFilter {
    pub fn push(&mut self, value: String, source: Option<Handle>) {
        self.values.push(value);
        self.sources.push(source);
    }
}

/// Inclusive lower/upper bounds; either may be unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds<T> {
    pub from: Option<T>,
    pub to: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self { from: None, to: None }
    }
}

impl<T: PartialOrd> Bounds<T> {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, value: &T) -> bool {
        if let Some(from) = &self.from {
            if value < from {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if value > to {
                return false;
            }
        }
        true
    }
}

/// The constraint on one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CategoryFilter {
    Text(TextFilter),
    Range(Bounds<f64>),
    Date(Bounds<DateTime<Utc>>),
}

impl CategoryFilter {
    /// No value, no endpoint: such a filter never makes it into a [`FilterSet`].
    pub fn is_empty(&self) -> bool {
        match self {
            CategoryFilter::Text(text) => text.values.is_empty(),
            CategoryFilter::Range(bounds) => bounds.is_unbounded(),
            CategoryFilter::Date(bounds) => bounds.is_unbounded(),
        }
    }
}

/// Active constraints, keyed by category in the order they were first read.
///
/// A category that is absent imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSet {
    entries: Vec<(String, CategoryFilter)>,
    wildcard: String,
}

impl FilterSet {
    pub fn new(wildcard: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            wildcard: wildcard.into(),
        }
    }

    /// The category token that searches every field.
    pub fn wildcard(&self) -> &str {
        &self.wildcard
    }

    pub fn is_wildcard(&self, category: &str) -> bool {
        category == self.wildcard
    }

    /// Insert or replace a category's filter. Empty filters are not stored.
    pub fn insert(&mut self, category: impl Into<String>, filter: CategoryFilter) {
        let category = category.into();
        if filter.is_empty() {
            self.remove(&category);
            return;
        }
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => *existing = filter,
            None => self.entries.push((category, filter)),
        }
    }

    pub fn remove(&mut self, category: &str) -> Option<CategoryFilter> {
        let pos = self.entries.iter().position(|(c, _)| c == category)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, category: &str) -> Option<&CategoryFilter> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, f)| f)
    }

    pub fn get_mut(&mut self, category: &str) -> Option<&mut CategoryFilter> {
        self.entries
            .iter_mut()
            .find(|(c, _)| c == category)
            .map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryFilter)> {
        self.entries.iter().map(|(c, f)| (c.as_str(), f))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> CategoryFilter {
        let mut filter = TextFilter::default();
        for v in values {
            filter.push(v.to_string(), None);
        }
        CategoryFilter::Text(filter)
    }

    #[test]
    fn test_logic_from_marker() {
        assert_eq!(Logic::from_marker("all"), Logic::And);
        assert_eq!(Logic::from_marker(" ALL "), Logic::And);
        assert_eq!(Logic::from_marker("any"), Logic::Or);
        assert_eq!(Logic::default(), Logic::Or);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = Bounds {
            from: Some(10.0),
            to: Some(20.0),
        };
        assert!(bounds.contains(&10.0));
        assert!(bounds.contains(&20.0));
        assert!(!bounds.contains(&9.0));
        assert!(!bounds.contains(&21.0));
        assert!(Bounds::<f64>::default().contains(&-1.0));
    }

    #[test]
    fn test_insert_skips_empty_filters() {
        let mut set = FilterSet::new("*");
        set.insert("color", text(&[]));
        set.insert("price", CategoryFilter::Range(Bounds::default()));
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert_preserves_first_seen_order() {
        let mut set = FilterSet::new("*");
        set.insert("color", text(&["red"]));
        set.insert("size", text(&["xl"]));
        set.insert("color", text(&["blue"]));

        assert_eq!(set.categories().collect::<Vec<_>>(), vec!["color", "size"]);
        assert_eq!(set.get("color"), Some(&text(&["blue"])));
    }

    #[test]
    fn test_inserting_empty_removes_existing() {
        let mut set = FilterSet::new("*");
        set.insert("color", text(&["red"]));
        set.insert("color", text(&[]));
        assert!(set.get("color").is_none());
    }

    #[test]
    fn test_wildcard_token() {
        let set = FilterSet::new("any");
        assert!(set.is_wildcard("any"));
        assert!(!set.is_wildcard("*"));
    }
}
