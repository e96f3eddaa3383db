//! Secondary ordering of the items that passed the filter set.
//!
//! The sort control's value is a `field-direction` token such as
//! `price-asc` or `release-date-desc` (split at the last `-`). Items are
//! compared on the first value of `field`: numerically when both parse as
//! numbers, otherwise as locale-aware strings. The sort is stable.

use crate::filter::value::leading_number;
use crate::model::Item;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: Direction,
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (field, dir) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("Invalid sort token (expected field-direction): {}", s))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("Invalid sort token (missing field): {}", s));
        }
        let direction = match dir.trim().to_ascii_lowercase().as_str() {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            other => return Err(format!("Invalid sort direction: {}", other)),
        };
        Ok(SortSpec {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{}-{}", self.field, dir)
    }
}

/// Locale-aware string comparison.
///
/// With the `collation` feature this is an ICU collator for the configured
/// locale (falling back to `en-US`, then to code-point order); without it,
/// plain code-point order.
pub struct Collation {
    #[cfg(feature = "collation")]
    collator: Option<icu::collator::CollatorBorrowed<'static>>,
}

impl Collation {
    #[cfg(feature = "collation")]
    pub fn new(locale: &str) -> Self {
        use icu::collator::options::CollatorOptions;
        use icu::collator::Collator;
        use icu::locale::Locale;

        let build = |tag: &str| {
            let locale: Locale = tag.parse().ok()?;
            Collator::try_new(locale.into(), CollatorOptions::default()).ok()
        };
        let collator = build(locale).or_else(|| {
            tracing::debug!(target: "cardsift", locale, "unknown collation locale, using en-US");
            build("en-US")
        });
        Self { collator }
    }

    #[cfg(not(feature = "collation"))]
    pub fn new(_locale: &str) -> Self {
        Self {}
    }

    #[cfg(feature = "collation")]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }

    #[cfg(not(feature = "collation"))]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::new("en-US")
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation").finish_non_exhaustive()
    }
}

/// Compare two items on the first value of `field`.
fn compare(a: &Item, b: &Item, field: &str, collation: &Collation) -> Ordering {
    let a_val = a.fields.first(field).unwrap_or("");
    let b_val = b.fields.first(field).unwrap_or("");
    match (leading_number(a_val), leading_number(b_val)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => collation.compare(a_val, b_val),
    }
}

/// Stable in-place sort of the passing items.
pub fn sort_items(items: &mut [&Item], spec: &SortSpec, collation: &Collation) {
    items.sort_by(|a, b| {
        let ord = compare(a, b, &spec.field, collation);
        match spec.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
}
