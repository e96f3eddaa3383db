//! Auto-populate: turn an [`AutoGroup`] and the index into a [`PopulatePlan`].
//!
//! The plan is pure data; the surface builds the elements. Values are the
//! category's distinct canonical values, sorted. Blank values are skipped but
//! still consume an id index, so ids stay stable when a blank shows up.

use crate::config::SiftConfig;
use crate::index::ItemIndex;
use crate::model::{capitalize, Handle};
use crate::snapshot::AutoGroup;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleKind {
    Checkbox,
    Radio,
}

impl ToggleKind {
    /// The `type` attribute of the generated inputs.
    pub fn as_str(self) -> &'static str {
        match self {
            ToggleKind::Checkbox => "checkbox",
            ToggleKind::Radio => "radio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AutoKind {
    Select,
    Toggle(ToggleKind),
}

impl AutoKind {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some("select") => Some(AutoKind::Select),
            Some("checkbox") => Some(AutoKind::Toggle(ToggleKind::Checkbox)),
            Some("radio") => Some(AutoKind::Toggle(ToggleKind::Radio)),
            Some(_) => None,
        }
    }
}

/// One generated option or toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// `<prefix>-<category>-<idx>`; unused by selects.
    pub id: String,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlanContent {
    /// Replace the select's options with a disabled placeholder plus one option per value.
    Select {
        placeholder: String,
        options: Vec<Choice>,
    },
    /// Replace the group's content with one toggle per value, or with clones
    /// of its template item when `templated`.
    Toggles {
        kind: ToggleKind,
        choices: Vec<Choice>,
        templated: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulatePlan {
    pub group: Handle,
    pub category: String,
    pub content: PlanContent,
}

/// Plan a group's content. `None` leaves the group as authored.
pub fn plan(group: &AutoGroup, index: &ItemIndex, config: &SiftConfig) -> Option<PopulatePlan> {
    let category = group.category.trim();
    let Some(kind) = AutoKind::parse(group.auto_type.as_deref()) else {
        debug!(
            target: "cardsift",
            category,
            auto_type = ?group.auto_type,
            "unknown auto-populate type, skipping"
        );
        return None;
    };

    let values = index.distinct_values(category);
    if values.iter().all(|v| v.trim().is_empty()) {
        debug!(target: "cardsift", category, "no values, skipping auto-population");
        return None;
    }

    let choices: Vec<Choice> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(idx, v)| Choice {
            id: format!("{}-{}-{}", config.toggle_id_prefix, category, idx),
            value: v.clone(),
            label: capitalize(v),
        })
        .collect();

    let content = match (kind, group.templated) {
        (AutoKind::Select, true) => {
            warn!(target: "cardsift", category, "template groups need a checkbox or radio type");
            return None;
        }
        (AutoKind::Select, false) => {
            if !group.is_select {
                warn!(target: "cardsift", category, "auto type is select but the element is not a <select>");
                return None;
            }
            let placeholder = group
                .placeholder
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} {}", config.placeholder_prefix, capitalize(category)));
            PlanContent::Select {
                placeholder,
                options: choices,
            }
        }
        (AutoKind::Toggle(kind), templated) => {
            if templated && !group.has_template_item {
                warn!(target: "cardsift", category, "no template item found");
                return None;
            }
            PlanContent::Toggles {
                kind,
                choices,
                templated,
            }
        }
    };

    Some(PopulatePlan {
        group: group.handle.clone(),
        category: category.to_string(),
        content,
    })
}
