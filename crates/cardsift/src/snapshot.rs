//! Plain-data views of the page.
//!
//! A [`Surface`](crate::surface::Surface) turns whatever presentation layer it
//! wraps into these types; everything past the surface (reader, evaluator,
//! tags) only ever sees them. Two snapshots exist:
//!
//! - [`PageMarkup`]: read once at setup (items, auto-populate groups, sliders).
//! - [`ControlSnapshot`]: read at the start of every apply cycle.
//!
//! Attribute values are carried raw (e.g. the unsplit `"color, size"` field
//! list); splitting and canonicalization happen in the core.

use crate::model::Handle;
use serde::{Deserialize, Serialize};

/// A descendant element declaring one or more categories, with its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMarker {
    /// Raw comma-separated category list.
    pub field: String,
    /// Text content of the marker element.
    pub text: String,
}

impl FieldMarker {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
        }
    }
}

/// An item element and the field markers found beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMarkup {
    pub handle: Handle,
    pub fields: Vec<FieldMarker>,
}

/// Which end of a range or date pair a control feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    From,
    To,
}

impl Endpoint {
    /// Parse an endpoint marker value. Anything but `from`/`to` is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "from" => Some(Endpoint::From),
            "to" => Some(Endpoint::To),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Checkbox,
    Radio,
    Input,
    Select,
    TextArea,
}

impl ControlKind {
    /// Checkboxes and radios: state lives in `checked`, not `value`.
    pub fn is_toggle(self) -> bool {
        matches!(self, ControlKind::Checkbox | ControlKind::Radio)
    }
}

/// Current state of one form control inside the filter root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub handle: Handle,
    pub kind: ControlKind,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub value: String,
    /// The control's own field attribute (value controls).
    #[serde(default)]
    pub field: Option<String>,
    /// The field marker inside the control's label (toggles).
    #[serde(default)]
    pub marker: Option<FieldMarker>,
    #[serde(default)]
    pub range: Option<Endpoint>,
    #[serde(default)]
    pub date: Option<Endpoint>,
}

impl Control {
    /// Categories this control is bound to: the label marker's for toggles,
    /// the control's own field attribute otherwise.
    pub fn categories(&self) -> Vec<String> {
        let attr = if self.kind.is_toggle() {
            self.marker.as_ref().map(|m| m.field.as_str())
        } else {
            self.field.as_deref()
        };
        attr.map(crate::model::split_categories).unwrap_or_default()
    }

    pub fn is_bound_to(&self, category: &str) -> bool {
        self.categories().iter().any(|c| c == category)
    }

    /// A range or date endpoint control.
    pub fn is_endpoint(&self) -> bool {
        self.range.is_some() || self.date.is_some()
    }
}

/// Every control plus the sort selector, read fresh each cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSnapshot {
    pub controls: Vec<Control>,
    /// Value of the sort control (e.g. `"price-asc"`), if one exists.
    #[serde(default)]
    pub sort: Option<String>,
}

impl ControlSnapshot {
    pub fn find(&self, handle: &Handle) -> Option<&Control> {
        self.controls.iter().find(|c| &c.handle == handle)
    }
}

/// A block marked for auto-population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoGroup {
    pub handle: Handle,
    pub category: String,
    /// Raw auto-type attribute; `None` means select.
    #[serde(default)]
    pub auto_type: Option<String>,
    #[serde(default)]
    pub templated: bool,
    #[serde(default)]
    pub has_template_item: bool,
    /// The group element itself is a `<select>`.
    #[serde(default)]
    pub is_select: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub exact: bool,
    /// Raw checkbox-logic attribute (`all` means AND).
    #[serde(default)]
    pub logic: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderMode {
    #[default]
    Range,
    MinOnly,
}

impl SliderMode {
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some("minonly") => SliderMode::MinOnly,
            _ => SliderMode::Range,
        }
    }
}

/// A range-slider placeholder element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderMarkup {
    pub category: String,
    #[serde(default)]
    pub mode: SliderMode,
    /// Display name override used in tag labels.
    #[serde(default)]
    pub tag_name: Option<String>,
    /// Unit appended to tooltip values.
    #[serde(default)]
    pub tooltip_unit: Option<String>,
}

impl SliderMarkup {
    pub fn label(&self) -> &str {
        self.tag_name.as_deref().unwrap_or(&self.category)
    }
}

/// Setup-time view of the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMarkup {
    pub items: Vec<ItemMarkup>,
    #[serde(default)]
    pub groups: Vec<AutoGroup>,
    /// Auto groups anywhere on the page, not only under the filter root.
    /// Only their logic markers are read.
    #[serde(default)]
    pub logic_groups: Vec<AutoGroup>,
    /// Raw field attributes of markers flagged for exact matching.
    #[serde(default)]
    pub exact_fields: Vec<String>,
    #[serde(default)]
    pub sliders: Vec<SliderMarkup>,
    /// The filter root carries a submit marker: only submits trigger cycles.
    #[serde(default)]
    pub submit_only: bool,
}

impl PageMarkup {
    pub fn slider(&self, category: &str) -> Option<&SliderMarkup> {
        self.sliders.iter().find(|s| s.category == category)
    }
}

/// A change the core asks the surface to make to its controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlMutation {
    Uncheck(Handle),
    ClearValue(Handle),
    SetValue(Handle, String),
    /// Move a slider's handles (one for min-only, two for range).
    ResetSlider { category: String, handles: Vec<f64> },
}
