//! Core data types: element handles, items and their field maps.
//!
//! Every value stored in a [`FieldMap`] has gone through [`canonicalize`]
//! exactly once, at index build time. Comparisons downstream assume it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque reference to an element owned by the presentation surface.
///
/// The core never creates or destroys elements; it only hands handles back to
/// the surface (to show, hide, reorder, uncheck or clear them).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handle(pub String);

impl Handle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category name -> canonical values, in markup order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    fields: BTreeMap<String, Vec<String>>,
    /// Category names in first-seen order, so the wildcard haystack follows markup order.
    order: Vec<String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw value under `category`, canonicalizing it.
    pub fn push(&mut self, category: &str, raw: &str) {
        if !self.fields.contains_key(category) {
            self.order.push(category.to_string());
        }
        self.fields
            .entry(category.to_string())
            .or_default()
            .push(canonicalize(raw));
    }

    pub fn values(&self, category: &str) -> &[String] {
        self.fields.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first value of a category; ranges, dates and sorting only look at this one.
    pub fn first(&self, category: &str) -> Option<&str> {
        self.values(category).first().map(String::as_str)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every value of every category, joined by a space.
    pub fn haystack(&self) -> String {
        self.order
            .iter()
            .flat_map(|cat| self.values(cat).iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One filterable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub handle: Handle,
    pub fields: FieldMap,
}

impl Item {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            fields: FieldMap::new(),
        }
    }

    /// Builder-style field insertion, mostly for tests.
    pub fn with_field(mut self, category: &str, raw: &str) -> Self {
        self.fields.push(category, raw);
        self
    }
}

/// Trim and lowercase. The only normalization item and filter values receive.
pub fn canonicalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split a comma-separated category attribute into trimmed names.
///
/// Empty segments are dropped, so `"color, ,size"` yields `["color", "size"]`.
pub fn split_categories(attr: &str) -> Vec<String> {
    attr.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_trims_and_lowercases() {
        assert_eq!(canonicalize("  Red Wine \n"), "red wine");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_split_categories() {
        assert_eq!(split_categories("color"), vec!["color"]);
        assert_eq!(split_categories(" color , size"), vec!["color", "size"]);
        assert_eq!(split_categories("color, ,size,"), vec!["color", "size"]);
        assert!(split_categories("  ").is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("red"), "Red");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_field_map_accumulates_in_order() {
        let mut fields = FieldMap::new();
        fields.push("tag", " Rust ");
        fields.push("color", "Red");
        fields.push("tag", "CLI");

        assert_eq!(fields.values("tag"), &["rust".to_string(), "cli".to_string()]);
        assert_eq!(fields.first("color"), Some("red"));
        assert_eq!(fields.first("missing"), None);
        assert_eq!(fields.categories().collect::<Vec<_>>(), vec!["tag", "color"]);
        assert_eq!(fields.haystack(), "rust cli red");
    }
}
