//! Tag removal: tag -> control mutations.
//!
//! | Tag | Mutations |
//! |-----|-----------|
//! | value, source resolvable | uncheck (or clear) that one control |
//! | value, no usable source | sweep: uncheck toggles / clear inputs of the category whose value equals the label |
//! | bounds | clear every range/date endpoint of the category, reset its live slider |

use super::{Tag, TagKind};
use crate::config::SiftConfig;
use crate::index::ItemIndex;
use crate::model::canonicalize;
use crate::sliders::{self, Sliders};
use crate::snapshot::{Control, ControlMutation, ControlSnapshot};

/// Mutations that retract the constraint a tag represents.
pub fn removal_mutations(
    tag: &Tag,
    snapshot: &ControlSnapshot,
    sliders: &Sliders,
    index: &ItemIndex,
    config: &SiftConfig,
) -> Vec<ControlMutation> {
    match &tag.kind {
        TagKind::Value { value, source } => {
            if let Some(control) = source.as_ref().and_then(|h| snapshot.find(h)) {
                return vec![deactivate(control)];
            }
            sweep_value(&tag.category, value, snapshot)
        }
        TagKind::Bounds => clear_bounds(&tag.category, snapshot, sliders, index, config),
    }
}

fn deactivate(control: &Control) -> ControlMutation {
    if control.kind.is_toggle() {
        ControlMutation::Uncheck(control.handle.clone())
    } else {
        ControlMutation::ClearValue(control.handle.clone())
    }
}

/// Deactivate every control of `category` currently showing `value`.
fn sweep_value(category: &str, value: &str, snapshot: &ControlSnapshot) -> Vec<ControlMutation> {
    let value = canonicalize(value);
    snapshot
        .controls
        .iter()
        .filter(|c| c.is_bound_to(category))
        .filter(|c| {
            if c.kind.is_toggle() {
                c.checked
                    && c.marker
                        .as_ref()
                        .is_some_and(|m| canonicalize(&m.text) == value)
            } else {
                !c.is_endpoint() && canonicalize(&c.value) == value
            }
        })
        .map(deactivate)
        .collect()
}

fn clear_bounds(
    category: &str,
    snapshot: &ControlSnapshot,
    sliders: &Sliders,
    index: &ItemIndex,
    config: &SiftConfig,
) -> Vec<ControlMutation> {
    let mut mutations: Vec<_> = snapshot
        .controls
        .iter()
        .filter(|c| c.is_endpoint() && c.is_bound_to(category))
        .map(|c| ControlMutation::ClearValue(c.handle.clone()))
        .collect();

    if let Some(slider) = sliders.live(category) {
        let domain = sliders::domain(index, category, config);
        mutations.push(ControlMutation::ResetSlider {
            category: category.to_string(),
            handles: sliders::reset_handles(slider, domain),
        });
    }
    mutations
}
