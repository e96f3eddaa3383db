//! # Filtering
//!
//! This module turns control state into a [`FilterSet`] and decides which
//! items pass it. Each category maps to exactly one [`CategoryFilter`]:
//!
//! | Variant | Produced by | Item passes when |
//! |---------|-------------|------------------|
//! | `Text` | checked toggles, text inputs, selects | a value equals (exact) or contains (partial) the terms, per AND/OR logic |
//! | `Range` | `custom-filter-range` endpoints | its first value is numeric and within the inclusive bounds |
//! | `Date` | `custom-filter-date` endpoints | its first value parses as a date within the inclusive bounds |
//!
//! The wildcard category is a `Text` filter that matches against all of an
//! item's fields, always by substring.
//!
//! ## Usage
//!
//! ```ignore
//! let set = reader::read(&snapshot, &page.logic_groups, config.wildcard());
//! let visible: Vec<_> = index.items().iter().filter(|i| set.matches(&i.fields, &exact)).collect();
//! ```

mod eval;
pub mod reader;
mod set;
pub mod value;

pub use set::{Bounds, CategoryFilter, FilterSet, Logic, TextFilter};
