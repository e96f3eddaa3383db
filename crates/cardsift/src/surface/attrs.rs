//! Markup attribute contract.
//!
//! Keys and values are matched byte for byte; pages written for the
//! attribute-driven filter script work unchanged.

/// `custom-filter="filters"` marks the filter root, `custom-filter="list"` the list root.
pub const ROOT: &str = "custom-filter";
pub const ROOT_FILTERS: &str = "filters";
pub const ROOT_LIST: &str = "list";

pub const ITEM: &str = "custom-filter-item";
/// Comma-separated category list on item markers and value controls.
pub const FIELD: &str = "custom-filter-field";
/// `from` | `to`.
pub const RANGE: &str = "custom-filter-range";
/// `from` | `to`.
pub const DATE: &str = "custom-filter-date";
/// `"true"` opts a category into exact matching.
pub const EXACT: &str = "data-exact-match";

pub const AUTO: &str = "custom-filter-auto";
/// `select` (default) | `checkbox` | `radio`.
pub const AUTO_TYPE: &str = "data-auto-type";
pub const AUTO_TEMPLATE: &str = "data-auto-template";
pub const AUTO_TEMPLATE_ITEM: &str = "data-auto-template-item";
pub const PLACEHOLDER: &str = "data-placeholder";
/// `all` switches a group's category to AND.
pub const LOGIC: &str = "data-checkbox-logic";

/// `all` or a category.
pub const CLEAR: &str = "custom-filter-clear";
pub const CLEAR_ALL: &str = "all";
pub const SUBMIT: &str = "custom-filter-submit";
pub const SORT: &str = "custom-filter-sort";
/// `results` (visible count) | `all` (total count).
pub const TOTAL: &str = "custom-filter-total";
pub const TOTAL_RESULTS: &str = "results";
pub const TOTAL_ALL: &str = "all";
pub const EMPTY: &str = "custom-filter-empty";

pub const TAGS: &str = "custom-filter-tags";
pub const TAGS_WRAPPER: &str = "wrapper";
/// `template` | `active`.
pub const TAG: &str = "custom-filter-tag";
pub const TAG_TEMPLATE: &str = "template";
pub const TAG_ACTIVE: &str = "active";
pub const TAG_TEXT: &str = "custom-filter-tag-text";
pub const TAG_REMOVE: &str = "custom-filter-tag-remove";
/// Set on a rendered tag to the source control it retracts.
pub const CHECKBOX_ID: &str = "data-checkbox-id";

pub const SLIDER_CLASS: &str = "my-range-slider";
pub const SLIDER_CATEGORY: &str = "data-slider-category";
/// `range` (default) | `minonly`.
pub const SLIDER_MODE: &str = "data-slider-mode";
pub const SLIDER_TAGNAME: &str = "data-slider-tagname";
pub const TOOLTIP: &str = "data-tooltip";

pub const TRUE: &str = "true";

/// Stable element key stamped by [`DocumentSurface`](super::DocumentSurface).
pub const KEY: &str = "data-sift-key";
/// Position of a rendered tag in its frame, on the tag's remove button.
pub const TAG_INDEX: &str = "data-sift-tag";

/// Visual checkbox of styled toggles, and the class marking it checked.
pub const CHECKBOX_VISUAL: &str = "w-checkbox-input";
pub const CHECKBOX_VISUAL_CUSTOM: &str = "w-checkbox-input--inputType-custom";
pub const CHECKBOX_VISUAL_CHECKED: &str = "w--redirected-checked";
