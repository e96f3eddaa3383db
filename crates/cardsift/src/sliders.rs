//! Range-slider bindings.
//!
//! The slider widget itself is external. Cardsift only decides how a widget
//! is configured ([`SliderSetup`]), where its handles go when it is reset,
//! and which endpoint controls receive its values when the user drags it.
//! A widget that cannot be created leaves its endpoint controls editable by
//! hand; everything else keeps working.

use crate::config::SiftConfig;
use crate::filter::value::format_number;
use crate::index::{Extent, ItemIndex};
use crate::snapshot::{ControlMutation, ControlSnapshot, Endpoint, SliderMarkup, SliderMode};
use serde::Serialize;

/// Everything a widget needs to be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSetup {
    pub category: String,
    pub mode: SliderMode,
    /// Initial handle positions: `[min]` for min-only, `[min, max]` for range.
    pub start: Vec<f64>,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub tooltip_unit: Option<String>,
}

impl SliderSetup {
    /// Tooltip text for a handle value: rounded, with the unit appended.
    pub fn tooltip(&self, value: f64) -> String {
        let rounded = format_number(value.round());
        match self.tooltip_unit.as_deref().filter(|u| !u.is_empty()) {
            Some(unit) => format!("{} {}", rounded, unit),
            None => rounded,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Binding {
    markup: SliderMarkup,
    live: bool,
}

/// Slider declarations on the page and whether their widget exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sliders {
    bindings: Vec<Binding>,
}

impl Sliders {
    pub fn new(markup: &[SliderMarkup]) -> Self {
        Self {
            bindings: markup
                .iter()
                .map(|m| Binding {
                    markup: m.clone(),
                    live: false,
                })
                .collect(),
        }
    }

    /// The declaration for a category, whether or not a widget was created.
    pub fn get(&self, category: &str) -> Option<&SliderMarkup> {
        self.bindings
            .iter()
            .find(|b| b.markup.category == category)
            .map(|b| &b.markup)
    }

    /// The declaration for a category, only if its widget exists.
    pub fn live(&self, category: &str) -> Option<&SliderMarkup> {
        self.bindings
            .iter()
            .find(|b| b.live && b.markup.category == category)
            .map(|b| &b.markup)
    }

    pub fn set_live(&mut self, category: &str, live: bool) {
        for binding in self.bindings.iter_mut().filter(|b| b.markup.category == category) {
            binding.live = live;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SliderMarkup> {
        self.bindings.iter().map(|b| &b.markup)
    }

    pub fn iter_live(&self) -> impl Iterator<Item = &SliderMarkup> {
        self.bindings.iter().filter(|b| b.live).map(|b| &b.markup)
    }
}

/// Observed extent of a category, or the configured fallback domain.
pub fn domain(index: &ItemIndex, category: &str, config: &SiftConfig) -> Extent {
    index.numeric_extent(category).unwrap_or(Extent {
        min: config.slider_min,
        max: config.slider_max,
    })
}

/// Handle positions covering the whole domain.
pub fn reset_handles(slider: &SliderMarkup, domain: Extent) -> Vec<f64> {
    match slider.mode {
        SliderMode::MinOnly => vec![domain.min],
        SliderMode::Range => vec![domain.min, domain.max],
    }
}

pub fn setup(slider: &SliderMarkup, index: &ItemIndex, config: &SiftConfig) -> SliderSetup {
    let domain = domain(index, &slider.category, config);
    SliderSetup {
        category: slider.category.clone(),
        mode: slider.mode,
        start: reset_handles(slider, domain),
        min: domain.min,
        max: domain.max,
        step: config.slider_step,
        tooltip_unit: slider.tooltip_unit.clone(),
    }
}

/// Mutations that copy a widget's handle values into its endpoint controls.
///
/// Min-only widgets write their single value into `from` and the configured
/// upper sentinel into `to`. Missing or non-finite handle values are written
/// as `0`.
pub fn handle_writes(
    slider: &SliderMarkup,
    values: &[f64],
    snapshot: &ControlSnapshot,
    config: &SiftConfig,
) -> Vec<ControlMutation> {
    let handle = |i: usize| values.get(i).copied().filter(|v| v.is_finite()).unwrap_or(0.0);
    let (from, to) = match slider.mode {
        SliderMode::MinOnly => (handle(0), config.min_only_upper),
        SliderMode::Range => (handle(0), handle(1)),
    };

    let endpoint_control = |endpoint: Endpoint| {
        snapshot
            .controls
            .iter()
            .find(|c| c.range == Some(endpoint) && c.is_bound_to(&slider.category))
    };

    [(Endpoint::From, from), (Endpoint::To, to)]
        .into_iter()
        .filter_map(|(endpoint, value)| {
            endpoint_control(endpoint)
                .map(|c| ControlMutation::SetValue(c.handle.clone(), format_number(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Handle;
    use crate::snapshot::{Control, ControlKind, ItemMarkup, FieldMarker};

    fn slider(mode: SliderMode) -> SliderMarkup {
        SliderMarkup {
            category: "price".into(),
            mode,
            tag_name: None,
            tooltip_unit: Some("EUR".into()),
        }
    }

    fn index(prices: &[&str]) -> ItemIndex {
        let markup: Vec<_> = prices
            .iter()
            .enumerate()
            .map(|(i, p)| ItemMarkup {
                handle: Handle::new(format!("i{i}")),
                fields: vec![FieldMarker::new("price", *p)],
            })
            .collect();
        ItemIndex::build(&markup)
    }

    fn endpoint(handle: &str, endpoint: Endpoint) -> Control {
        Control {
            handle: Handle::new(handle),
            kind: ControlKind::Input,
            checked: false,
            value: String::new(),
            field: Some("price".into()),
            marker: None,
            range: Some(endpoint),
            date: None,
        }
    }

    #[test]
    fn test_setup_uses_observed_extent() {
        let config = SiftConfig::default();
        let setup = setup(&slider(SliderMode::Range), &index(&["10", "30", "20"]), &config);
        assert_eq!(setup.start, vec![10.0, 30.0]);
        assert_eq!((setup.min, setup.max, setup.step), (10.0, 30.0, 1.0));

        let setup = super::setup(&slider(SliderMode::MinOnly), &index(&["10", "30"]), &config);
        assert_eq!(setup.start, vec![10.0]);
    }

    #[test]
    fn test_setup_falls_back_without_numbers() {
        let setup = setup(
            &slider(SliderMode::Range),
            &index(&["n/a"]),
            &SiftConfig::default(),
        );
        assert_eq!(setup.start, vec![0.0, 100.0]);
    }

    #[test]
    fn test_tooltip_rounds_and_appends_unit() {
        let setup = setup(&slider(SliderMode::Range), &index(&["1"]), &SiftConfig::default());
        assert_eq!(setup.tooltip(12.6), "13 EUR");

        let bare = SliderSetup {
            tooltip_unit: None,
            ..setup
        };
        assert_eq!(bare.tooltip(12.4), "12");
    }

    #[test]
    fn test_live_tracking() {
        let mut sliders = Sliders::new(&[slider(SliderMode::Range)]);
        assert!(sliders.get("price").is_some());
        assert!(sliders.live("price").is_none());

        sliders.set_live("price", true);
        assert!(sliders.live("price").is_some());
        assert_eq!(sliders.iter_live().count(), 1);
    }

    #[test]
    fn test_handle_writes_range() {
        let snapshot = ControlSnapshot {
            controls: vec![endpoint("f", Endpoint::From), endpoint("t", Endpoint::To)],
            sort: None,
        };
        let writes = handle_writes(
            &slider(SliderMode::Range),
            &[15.0, 25.5],
            &snapshot,
            &SiftConfig::default(),
        );
        assert_eq!(
            writes,
            vec![
                ControlMutation::SetValue(Handle::new("f"), "15".into()),
                ControlMutation::SetValue(Handle::new("t"), "25.5".into()),
            ]
        );
    }

    #[test]
    fn test_handle_writes_min_only_uses_upper_sentinel() {
        let snapshot = ControlSnapshot {
            controls: vec![endpoint("f", Endpoint::From), endpoint("t", Endpoint::To)],
            sort: None,
        };
        let writes = handle_writes(
            &slider(SliderMode::MinOnly),
            &[40.0],
            &snapshot,
            &SiftConfig::default(),
        );
        assert_eq!(
            writes[1],
            ControlMutation::SetValue(Handle::new("t"), "9007199254740991".into())
        );
    }

    #[test]
    fn test_handle_writes_zero_for_non_finite_values() {
        let snapshot = ControlSnapshot {
            controls: vec![endpoint("f", Endpoint::From), endpoint("t", Endpoint::To)],
            sort: None,
        };
        let writes = handle_writes(
            &slider(SliderMode::Range),
            &[f64::NAN, f64::INFINITY],
            &snapshot,
            &SiftConfig::default(),
        );
        assert_eq!(
            writes,
            vec![
                ControlMutation::SetValue(Handle::new("f"), "0".into()),
                ControlMutation::SetValue(Handle::new("t"), "0".into()),
            ]
        );

        let writes = handle_writes(&slider(SliderMode::Range), &[20.0], &snapshot, &SiftConfig::default());
        assert_eq!(writes[1], ControlMutation::SetValue(Handle::new("t"), "0".into()));
    }

    #[test]
    fn test_handle_writes_skip_missing_controls() {
        let snapshot = ControlSnapshot {
            controls: vec![endpoint("f", Endpoint::From)],
            sort: None,
        };
        let writes = handle_writes(
            &slider(SliderMode::Range),
            &[1.0, 2.0],
            &snapshot,
            &SiftConfig::default(),
        );
        assert_eq!(writes.len(), 1);
    }
}
