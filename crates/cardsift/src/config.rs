//! # Configuration
//!
//! Cardsift configuration is a [`confique`] struct. Hosts either take
//! [`SiftConfig::default()`] or layer a TOML file and environment variables
//! through [`SiftConfig::load`].
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `CARDSIFT_WILDCARD`, `CARDSIFT_LOCALE`, etc.
//! 2. **Config file**: the TOML path handed to [`SiftConfig::load`], if any.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `wildcard` | `*` | Category token that searches every field |
//! | `locale` | `en-US` | Locale used for string sorting |
//! | `empty_bound` | `…` | Placeholder for an unset range bound in tag labels |
//! | `placeholder_prefix` | `Choose` | Prefix of generated select placeholders |
//! | `toggle_id_prefix` | `checkbox` | Prefix of generated checkbox/radio ids |
//! | `slider_min` / `slider_max` | `0` / `100` | Slider domain when no item has a number |
//! | `slider_step` | `1` | Slider step |
//! | `min_only_upper` | `9007199254740991` | Upper bound written by min-only sliders |

use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a filter session.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiftConfig {
    /// Reserved category that matches against all of an item's fields.
    #[config(default = "*", env = "CARDSIFT_WILDCARD")]
    pub wildcard: String,

    /// BCP 47 locale for string sorting (e.g. "en-US", "de-DE").
    #[config(default = "en-US", env = "CARDSIFT_LOCALE")]
    pub locale: String,

    /// Rendered in range tags in place of a bound that is not set.
    #[config(default = "…")]
    pub empty_bound: String,

    /// Generated select placeholders read "<prefix> <Category>".
    #[config(default = "Choose")]
    pub placeholder_prefix: String,

    /// Generated toggles get ids "<prefix>-<category>-<idx>".
    #[config(default = "checkbox")]
    pub toggle_id_prefix: String,

    #[config(default = 0.0)]
    pub slider_min: f64,

    #[config(default = 100.0)]
    pub slider_max: f64,

    #[config(default = 1.0)]
    pub slider_step: f64,

    /// Written into the `to` endpoint by min-only sliders.
    #[config(default = 9007199254740991.0)]
    pub min_only_upper: f64,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            wildcard: "*".to_string(),
            locale: "en-US".to_string(),
            empty_bound: "…".to_string(),
            placeholder_prefix: "Choose".to_string(),
            toggle_id_prefix: "checkbox".to_string(),
            slider_min: 0.0,
            slider_max: 100.0,
            slider_step: 1.0,
            min_only_upper: 9007199254740991.0,
        }
    }
}

impl SiftConfig {
    /// Load configuration from the environment and an optional TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// The wildcard token, trimmed. An empty token falls back to `*`.
    pub fn wildcard(&self) -> &str {
        match self.wildcard.trim() {
            "" => "*",
            token => token,
        }
    }
}
