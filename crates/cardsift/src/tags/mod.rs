//! Active-filter tags.
//!
//! Every apply cycle renders the filter set as a list of [`Tag`]s, one per
//! thing the user can retract:
//!
//! - **Text categories**: one tag per distinct value (wildcard terms included).
//! - **Range/date categories**: one tag for the whole category.
//!
//! ## Labels
//!
//! Text tags show the canonical value. Range and date tags use the slider's
//! tag-name override (or the raw category) and depend on the slider mode:
//!
//! ```text
//! range   -> "Price: 15 - 40"      "Price: 15 - …"
//! minonly -> "Min Price: 15"
//! ```
//!
//! ## Removal
//!
//! Removing a tag does not touch the filter set (it is rebuilt every cycle);
//! it produces [`ControlMutation`](crate::snapshot::ControlMutation)s that
//! retract the originating control state. See [`removal`].

pub mod removal;

use crate::config::SiftConfig;
use crate::filter::value::format_number;
use crate::filter::{Bounds, CategoryFilter, FilterSet};
use crate::model::Handle;
use crate::sliders::Sliders;
use crate::snapshot::SliderMode;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use removal::removal_mutations;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TagKind {
    /// One value of a text category. `source` is the single toggle that
    /// produced it; `None` means removal sweeps by value instead.
    Value { value: String, source: Option<Handle> },
    /// A range or date category as a whole.
    Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub category: String,
    pub label: String,
    pub kind: TagKind,
}

/// Render the filter set as tags, in filter-set order.
pub fn render(set: &FilterSet, sliders: &Sliders, config: &SiftConfig) -> Vec<Tag> {
    let mut tags = Vec::new();
    for (category, filter) in set.iter() {
        match filter {
            CategoryFilter::Text(text) => {
                let mut distinct: Vec<(&str, Option<&Handle>)> = Vec::new();
                for (value, source) in text.values.iter().zip(&text.sources) {
                    match distinct.iter_mut().find(|(v, _)| *v == value.as_str()) {
                        // Several controls produced this value; removal has to sweep.
                        Some(entry) => entry.1 = None,
                        None => distinct.push((value.as_str(), source.as_ref())),
                    }
                }
                tags.extend(distinct.into_iter().map(|(value, source)| Tag {
                    category: category.to_string(),
                    label: value.to_string(),
                    kind: TagKind::Value {
                        value: value.to_string(),
                        source: source.cloned(),
                    },
                }));
            }
            CategoryFilter::Range(bounds) => {
                tags.push(bounds_tag(category, sliders, config, bounds, |n| {
                    format_number(*n)
                }));
            }
            CategoryFilter::Date(bounds) => {
                tags.push(bounds_tag(category, sliders, config, bounds, format_date));
            }
        }
    }
    tags
}

fn format_date(when: &DateTime<Utc>) -> String {
    when.format("%Y-%m-%d").to_string()
}

fn bounds_tag<T>(
    category: &str,
    sliders: &Sliders,
    config: &SiftConfig,
    bounds: &Bounds<T>,
    fmt: impl Fn(&T) -> String,
) -> Tag {
    let slider = sliders.get(category);
    let label = slider.map(|s| s.label()).unwrap_or(category);
    let mode = slider.map(|s| s.mode).unwrap_or_default();
    let show = |bound: &Option<T>| {
        bound
            .as_ref()
            .map(&fmt)
            .unwrap_or_else(|| config.empty_bound.clone())
    };

    let text = match mode {
        SliderMode::MinOnly => format!("Min {}: {}", label, show(&bounds.from)),
        SliderMode::Range => format!("{}: {} - {}", label, show(&bounds.from), show(&bounds.to)),
    };

    Tag {
        category: category.to_string(),
        label: text,
        kind: TagKind::Bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Logic, TextFilter};
    use crate::snapshot::SliderMarkup;
    use chrono::TimeZone;

    fn text(entries: &[(&str, Option<&str>)]) -> CategoryFilter {
        let mut filter = TextFilter {
            logic: Logic::Or,
            ..Default::default()
        };
        for (value, source) in entries {
            filter.push(value.to_string(), source.map(Handle::new));
        }
        CategoryFilter::Text(filter)
    }

    fn slider(mode: SliderMode, tag_name: Option<&str>) -> Sliders {
        Sliders::new(&[SliderMarkup {
            category: "price".into(),
            mode,
            tag_name: tag_name.map(str::to_string),
            tooltip_unit: None,
        }])
    }

    #[test]
    fn test_one_tag_per_text_value() {
        let mut set = FilterSet::new("*");
        set.insert("color", text(&[("red", Some("c1")), ("blue", Some("c2"))]));
        set.insert("*", text(&[("oak", None)]));

        let tags = render(&set, &Sliders::default(), &SiftConfig::default());
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].label, "red");
        assert_eq!(
            tags[0].kind,
            TagKind::Value {
                value: "red".into(),
                source: Some(Handle::new("c1"))
            }
        );
        assert_eq!(tags[2].category, "*");
        assert_eq!(
            tags[2].kind,
            TagKind::Value {
                value: "oak".into(),
                source: None
            }
        );
    }

    #[test]
    fn test_duplicate_values_collapse_and_lose_source() {
        let mut set = FilterSet::new("*");
        set.insert("color", text(&[("red", Some("c1")), ("red", Some("c9"))]));

        let tags = render(&set, &Sliders::default(), &SiftConfig::default());
        assert_eq!(tags.len(), 1);
        assert_eq!(
            tags[0].kind,
            TagKind::Value {
                value: "red".into(),
                source: None
            }
        );
    }

    #[test]
    fn test_range_tag_label_uses_raw_category_without_slider() {
        let mut set = FilterSet::new("*");
        set.insert(
            "price",
            CategoryFilter::Range(Bounds {
                from: Some(15.0),
                to: None,
            }),
        );
        let tags = render(&set, &Sliders::default(), &SiftConfig::default());
        assert_eq!(tags[0].label, "price: 15 - …");
        assert_eq!(tags[0].kind, TagKind::Bounds);
    }

    #[test]
    fn test_range_tag_label_with_override() {
        let mut set = FilterSet::new("*");
        set.insert(
            "price",
            CategoryFilter::Range(Bounds {
                from: Some(0.0),
                to: Some(40.5),
            }),
        );
        let tags = render(&set, &slider(SliderMode::Range, Some("Price")), &SiftConfig::default());
        assert_eq!(tags[0].label, "Price: 0 - 40.5");
    }

    #[test]
    fn test_min_only_tag_label() {
        let mut set = FilterSet::new("*");
        set.insert(
            "price",
            CategoryFilter::Range(Bounds {
                from: Some(15.0),
                to: Some(9007199254740991.0),
            }),
        );
        let tags = render(&set, &slider(SliderMode::MinOnly, Some("Price")), &SiftConfig::default());
        assert_eq!(tags[0].label, "Min Price: 15");
    }

    #[test]
    fn test_date_tag_label() {
        let mut set = FilterSet::new("*");
        set.insert(
            "published",
            CategoryFilter::Date(Bounds {
                from: None,
                to: Some(Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap()),
            }),
        );
        let config = SiftConfig {
            empty_bound: "any".into(),
            ..Default::default()
        };
        let tags = render(&set, &Sliders::default(), &config);
        assert_eq!(tags[0].label, "published: any - 2024-03-09");
    }
}
