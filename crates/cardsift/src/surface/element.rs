//! A minimal element tree.
//!
//! [`Element`] is the page as [`DocumentSurface`](super::document::DocumentSurface)
//! sees it: tag, attributes, own text, form state and children. Hosts that
//! render elsewhere can serialize their markup into it (it round-trips through
//! JSON) and let the document surface do the attribute work.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name, however it was written.
    #[serde(deserialize_with = "lowercase_tag")]
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Text directly inside this element (children's text is separate).
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub children: Vec<Element>,
}

fn lowercase_tag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.to_ascii_lowercase())
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.to_string(), value.to_string());
        self
    }

    /// Boolean attribute (present, empty value).
    pub fn flag(self, key: &str) -> Self {
        self.attr(key, "")
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Attribute `key` is present and equals `value`.
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.attrs.insert(key.to_string(), value.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(list) = self.attrs.get_mut("class") {
            *list = list
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    /// `type` of an `<input>`, lowercased, defaulting to `text`.
    pub fn input_type(&self) -> String {
        self.get("type")
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "text".to_string())
    }

    /// Own text followed by every descendant's text, in document order.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// First element in document order (self included) matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pred))
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Every descendant (self excluded) matching `pred`, in document order.
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect(pred, &mut out);
        }
        out
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.collect(pred, out);
        }
    }

    /// Visit every element (self included) mutably, in document order.
    pub fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }

    /// Visit every descendant with the chain of its ancestors (outermost first).
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a Element, &[&'a Element])) {
        let mut ancestors = vec![self];
        for child in &self.children {
            child.walk_inner(&mut ancestors, f);
        }
    }

    fn walk_inner<'a>(
        &'a self,
        ancestors: &mut Vec<&'a Element>,
        f: &mut dyn FnMut(&'a Element, &[&'a Element]),
    ) {
        f(self, ancestors);
        ancestors.push(self);
        for child in &self.children {
            child.walk_inner(ancestors, f);
        }
        ancestors.pop();
    }

    /// Detach and return the first descendant matching `pred`.
    pub fn take(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<Element> {
        if let Some(pos) = self.children.iter().position(|c| pred(c)) {
            return Some(self.children.remove(pos));
        }
        for child in &mut self.children {
            if let Some(taken) = child.take(pred) {
                return Some(taken);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Element {
        Element::new("div").attr("id", "card").with_children([
            Element::new("h3").with_text("Oak ").with_child(Element::new("em").with_text("Chair")),
            Element::new("span").attr("class", "price tag").with_text("20"),
        ])
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        assert_eq!(card().text_content(), "Oak Chair20");
    }

    #[test]
    fn test_find_and_find_all() {
        let card = card();
        assert_eq!(card.find(&|e| e.tag == "em").map(|e| e.text.as_str()), Some("Chair"));
        assert!(card.find(&|e| e.is("id", "card")).is_some());
        assert_eq!(card.find_all(&|e| e.is("id", "card")).len(), 0);
        assert_eq!(card.find_all(&|e| !e.text.is_empty()).len(), 3);
    }

    #[test]
    fn test_has_class() {
        let card = card();
        let span = card.find(&|e| e.tag == "span").unwrap();
        assert!(span.has_class("price"));
        assert!(span.has_class("tag"));
        assert!(!span.has_class("pri"));

        let mut span = span.clone();
        span.remove_class("price");
        assert_eq!(span.get("class"), Some("tag"));
    }

    #[test]
    fn test_walk_reports_ancestors() {
        let card = card();
        let mut seen = Vec::new();
        card.walk(&mut |el, ancestors| {
            seen.push((el.tag.clone(), ancestors.iter().map(|a| a.tag.clone()).collect::<Vec<_>>()));
        });
        assert_eq!(seen[1], ("em".to_string(), vec!["div".to_string(), "h3".to_string()]));
    }

    #[test]
    fn test_take_detaches_nested_element() {
        let mut card = card();
        let em = card.take(&|e| e.tag == "em").unwrap();
        assert_eq!(em.text, "Chair");
        assert_eq!(card.text_content(), "Oak 20");
    }

    #[test]
    fn test_json_round_trip_with_defaults() {
        let el = Element::from_json(r#"{"tag": "input", "attrs": {"type": "Checkbox"}}"#).unwrap();
        assert_eq!(el.input_type(), "checkbox");
        assert!(!el.checked);
        assert!(el.children.is_empty());
        assert!(Element::from_json("{").is_err());
    }

    #[test]
    fn test_json_tags_are_lowercased() {
        let el = Element::from_json(r#"{"tag": "DIV", "children": [{"tag": "Input"}]}"#).unwrap();
        assert_eq!(el.tag, "div");
        assert_eq!(el.children[0].tag, "input");
        assert_eq!(el, Element::new("div").with_child(Element::new("input")));
    }
}
