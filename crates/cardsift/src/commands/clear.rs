//! Reset controls, for every category or for one.
//!
//! Checked toggles are unchecked, value controls carrying a field marker are
//! emptied, and live sliders move back to their full extent. Controls already
//! at rest produce no mutation. The caller runs a cycle afterwards.

use crate::config::SiftConfig;
use crate::index::ItemIndex;
use crate::sliders::{self, Sliders};
use crate::snapshot::{Control, ControlMutation, ControlSnapshot, SliderMarkup};

pub fn clear_all_mutations(
    snapshot: &ControlSnapshot,
    sliders: &Sliders,
    index: &ItemIndex,
    config: &SiftConfig,
) -> Vec<ControlMutation> {
    let mut mutations = reset_controls(snapshot, |c| {
        c.kind.is_toggle() || c.field.is_some()
    });
    mutations.extend(sliders.iter_live().map(|s| reset_slider(s, index, config)));
    mutations
}

pub fn clear_category_mutations(
    category: &str,
    snapshot: &ControlSnapshot,
    sliders: &Sliders,
    index: &ItemIndex,
    config: &SiftConfig,
) -> Vec<ControlMutation> {
    let mut mutations = reset_controls(snapshot, |c| c.is_bound_to(category));
    mutations.extend(sliders.live(category).map(|s| reset_slider(s, index, config)));
    mutations
}

fn reset_controls(snapshot: &ControlSnapshot, selected: impl Fn(&Control) -> bool) -> Vec<ControlMutation> {
    snapshot
        .controls
        .iter()
        .filter(|c| selected(c))
        .filter_map(|c| {
            if c.kind.is_toggle() {
                c.checked.then(|| ControlMutation::Uncheck(c.handle.clone()))
            } else {
                (!c.value.is_empty()).then(|| ControlMutation::ClearValue(c.handle.clone()))
            }
        })
        .collect()
}

fn reset_slider(slider: &SliderMarkup, index: &ItemIndex, config: &SiftConfig) -> ControlMutation {
    let domain = sliders::domain(index, &slider.category, config);
    ControlMutation::ResetSlider {
        category: slider.category.clone(),
        handles: sliders::reset_handles(slider, domain),
    }
}
