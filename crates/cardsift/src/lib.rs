//! # Cardsift Architecture
//!
//! Cardsift is an **attribute-driven list filter**. A page author marks up
//! item cards and filter controls with attributes; cardsift indexes the
//! items once, reads the controls on every interaction, and tells the page
//! which items to show, in which order, with which active-filter tags.
//!
//! The core never touches markup. Everything it knows about the page comes
//! through a [`Surface`](surface::Surface) as plain data, and everything it
//! wants changed goes back as plain data.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (api.rs)                                           │
//! │  - Setup: scan, index, auto-populate, sliders               │
//! │  - Trigger gating, user intents -> mutations -> cycle       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Apply cycle: read -> evaluate -> sort -> render frame    │
//! │  - Populate plans, clear mutations                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (index, filter/, sort, tags/, sliders)                │
//! │  - Pure functions over snapshots and the item index         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Surface Layer (surface/)                                   │
//! │  - Surface trait                                            │
//! │  - DocumentSurface (in-memory element tree)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State
//!
//! The [`ItemIndex`](index::ItemIndex) is the only state that outlives a
//! cycle, and it is rebuilt rather than patched. The
//! [`FilterSet`](filter::FilterSet) is recomputed from a fresh
//! [`ControlSnapshot`](snapshot::ControlSnapshot) every cycle, so control
//! state on the page is always the source of truth.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests beside each module, on plain data.
//! 2. **Surface**: `DocumentSurface` tests against the attribute contract.
//! 3. **Session**: integration tests under `tests/` drive
//!    `FilterSession<DocumentSurface>` the way a page would.
//!
//! ## Module Overview
//!
//! - [`api`]: The session facade, entry point for all operations
//! - [`commands`]: Apply cycle, auto-populate, clears
//! - [`filter`]: Filter set, control reader, predicate evaluation
//! - [`index`]: Item index and exact-match categories
//! - [`sort`]: Sort tokens and locale-aware ordering
//! - [`tags`]: Active-filter tags and their removal
//! - [`sliders`]: Range-slider setup and handle writes
//! - [`snapshot`]: Plain-data views of the page
//! - [`surface`]: The presentation seam and the in-memory document
//! - [`model`]: Items, field maps, canonicalization
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod sliders;
pub mod snapshot;
pub mod sort;
pub mod surface;
pub mod tags;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use api::FilterSession;
pub use config::SiftConfig;
pub use error::{Result, SiftError};
