//! # Command Layer
//!
//! The commands hold the engine's logic. Each one works on plain data (the
//! [`ItemIndex`](crate::index::ItemIndex), snapshots, the [`FilterSet`]) and
//! either drives a [`Surface`](crate::surface::Surface) through one cycle or
//! hands back structured output for the caller to apply.
//!
//! ## What Commands Do NOT Do
//!
//! - **Own state**: the session owns the index, config and sliders and lends
//!   them through [`Context`].
//! - **Decide when to run**: trigger gating lives in [`should_apply`] and the
//!   session.
//! - **Touch markup directly**: everything goes through the surface trait, so
//!   commands are tested against the in-memory document.
//!
//! ## Structured Returns
//!
//! An apply cycle returns a [`RenderFrame`]: the ordered visible handles, the
//! hidden ones, counters, the empty flag and the active tags. The surface
//! renders it; callers may inspect it (the tests do).
//!
//! ## Command Modules
//!
//! - [`apply`]: one read -> evaluate -> sort -> render cycle
//! - [`populate`]: build option/toggle lists for auto-populated groups
//! - [`clear`]: reset controls, globally or per category

use crate::config::SiftConfig;
use crate::filter::FilterSet;
use crate::index::{ExactCategories, ItemIndex};
use crate::model::Handle;
use crate::sliders::Sliders;
use crate::snapshot::AutoGroup;
use crate::sort::Collation;
use crate::tags::Tag;
use serde::Serialize;

pub mod apply;
pub mod clear;
pub mod populate;

/// Borrowed session state a command needs.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub index: &'a ItemIndex,
    pub exact: &'a ExactCategories,
    pub groups: &'a [AutoGroup],
    pub sliders: &'a Sliders,
    pub config: &'a SiftConfig,
    pub collation: &'a Collation,
}

/// The outcome of one apply cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub generation: u64,
    /// Passing items, in display order.
    pub visible: Vec<Handle>,
    /// Failing items, in index order.
    pub hidden: Vec<Handle>,
    pub total: usize,
    pub tags: Vec<Tag>,
    /// The constraints this frame was evaluated against.
    pub filters: FilterSet,
}

impl RenderFrame {
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// No item passed: the empty-state element should show.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Host events that may start a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trigger {
    /// A text-like control changed while typing.
    Input,
    /// A toggle, select or committed input changed.
    Change,
    /// The filter form was submitted.
    Submit,
    /// The sort selector changed.
    SortChange,
}

/// Whether a trigger starts a cycle. Submit-only pages ignore live edits.
pub fn should_apply(trigger: Trigger, submit_only: bool) -> bool {
    match trigger {
        Trigger::Submit | Trigger::SortChange => true,
        Trigger::Input | Trigger::Change => !submit_only,
    }
}

/// What a click on a filter-related element asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Trigger(Trigger),
    ClearAll,
    ClearCategory(String),
    /// Remove the tag at this position in the latest frame.
    RemoveTag(usize),
}
