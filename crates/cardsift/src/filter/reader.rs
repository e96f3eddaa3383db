//! Control reader: control snapshot -> [`FilterSet`].
//!
//! Reading runs in a fixed order:
//!
//! 1. Checked toggles contribute their label marker's text (with the toggle's handle).
//! 2. The first wildcard value control contributes its trimmed, lowercased value.
//! 3. Other value controls contribute a date endpoint, a range endpoint, or a
//!    text value, in that order of precedence.
//! 4. Auto-populated groups with a logic marker switch their category to AND/OR.
//! 5. Categories left without a constraint are dropped.
//!
//! A category that received any date endpoint becomes a date filter, even if
//! other controls gave it range endpoints or text. Failing that, any range
//! endpoint makes it a range filter. Text values are only used when neither
//! kind of endpoint is present.

use super::set::{Bounds, CategoryFilter, FilterSet, Logic, TextFilter};
use super::value::{leading_number, parse_instant};
use crate::model::{canonicalize, split_categories};
use crate::snapshot::{AutoGroup, Control, ControlSnapshot, Endpoint};
use chrono::{DateTime, Utc};

#[derive(Default)]
struct Draft {
    text: TextFilter,
    range: Bounds<f64>,
    date: Bounds<DateTime<Utc>>,
    saw_range: bool,
    saw_date: bool,
}

impl Draft {
    fn finish(self) -> CategoryFilter {
        if self.saw_date {
            CategoryFilter::Date(self.date)
        } else if self.saw_range {
            CategoryFilter::Range(self.range)
        } else {
            CategoryFilter::Text(self.text)
        }
    }
}

/// Per-category drafts, in first-contribution order.
#[derive(Default)]
struct Drafts(Vec<(String, Draft)>);

impl Drafts {
    fn entry(&mut self, category: &str) -> &mut Draft {
        let pos = match self.0.iter().position(|(c, _)| c == category) {
            Some(pos) => pos,
            None => {
                self.0.push((category.to_string(), Draft::default()));
                self.0.len() - 1
            }
        };
        &mut self.0[pos].1
    }
}

fn set_endpoint<T>(bounds: &mut Bounds<T>, endpoint: Endpoint, value: Option<T>) {
    match endpoint {
        Endpoint::From => bounds.from = value,
        Endpoint::To => bounds.to = value,
    }
}

fn is_wildcard_control(control: &Control, wildcard: &str) -> bool {
    !control.kind.is_toggle() && control.field.as_deref().map(str::trim) == Some(wildcard)
}

/// Read the current control state into a filter set.
pub fn read(snapshot: &ControlSnapshot, groups: &[AutoGroup], wildcard: &str) -> FilterSet {
    let mut drafts = Drafts::default();

    for control in snapshot.controls.iter().filter(|c| c.kind.is_toggle() && c.checked) {
        let Some(marker) = &control.marker else {
            continue;
        };
        let value = canonicalize(&marker.text);
        for category in split_categories(&marker.field) {
            drafts
                .entry(&category)
                .text
                .push(value.clone(), Some(control.handle.clone()));
        }
    }

    if let Some(control) = snapshot
        .controls
        .iter()
        .find(|c| is_wildcard_control(c, wildcard))
    {
        let typed = canonicalize(&control.value);
        if !typed.is_empty() {
            drafts.entry(wildcard).text.push(typed, None);
        }
    }

    for control in snapshot
        .controls
        .iter()
        .filter(|c| !c.kind.is_toggle() && !is_wildcard_control(c, wildcard))
    {
        let Some(field) = &control.field else {
            continue;
        };
        let value = control.value.trim();
        if value.is_empty() {
            continue;
        }
        for category in split_categories(field) {
            read_value_control(drafts.entry(&category), control, value);
        }
    }

    for group in groups {
        let Some(marker) = &group.logic else {
            continue;
        };
        if let Some((_, draft)) = drafts.0.iter_mut().find(|(c, _)| *c == group.category) {
            draft.text.logic = Logic::from_marker(marker);
        }
    }

    let mut set = FilterSet::new(wildcard);
    for (category, draft) in drafts.0 {
        set.insert(category, draft.finish());
    }
    set
}

fn read_value_control(draft: &mut Draft, control: &Control, value: &str) {
    if let Some(endpoint) = control.date {
        draft.saw_date = true;
        set_endpoint(&mut draft.date, endpoint, parse_instant(value));
    } else if let Some(endpoint) = control.range {
        draft.saw_range = true;
        set_endpoint(&mut draft.range, endpoint, leading_number(value));
    } else {
        draft.text.push(value.to_lowercase(), None);
    }
}
