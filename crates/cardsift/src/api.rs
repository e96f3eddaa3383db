//! # Session Facade
//!
//! [`FilterSession`] is the single entry point for hosts. It owns the
//! surface, the item index and the per-page setup, and dispatches every
//! operation to the command layer.
//!
//! ## Role and Responsibilities
//!
//! The session:
//! - **Initializes** a page: scan, index, auto-populate, slider setup, first cycle
//! - **Gates** triggers (submit-only pages ignore live edits)
//! - **Turns user intents into mutations** (tag removal, clears, slider moves)
//!   and always finishes them with an apply cycle
//!
//! ## What the Session Does NOT Do
//!
//! - **Filtering logic**: that lives in [`filter`](crate::filter) and
//!   [`commands`](crate::commands)
//! - **Markup access**: only through the [`Surface`] trait
//! - **Event wiring**: the host listens for events and calls in
//!
//! ## Cycles
//!
//! Every mutating operation takes `&mut self`, so cycles never overlap. Each
//! cycle bumps a generation counter carried by its [`RenderFrame`]; the
//! latest frame is kept so tag positions from the rendered page can be
//! resolved by [`FilterSession::dispatch`].
//!
//! ## Generic Over Surface
//!
//! `FilterSession<S: Surface>` works against any presentation layer:
//! - In-process documents and tests: `FilterSession<DocumentSurface>`
//! - Live pages: a host-provided surface over its own DOM bindings

use crate::commands::{apply, clear, populate, should_apply, Action, Context, RenderFrame, Trigger};
use crate::config::SiftConfig;
use crate::error::Result;
use crate::index::{ExactCategories, ItemIndex};
use crate::sliders::{self, Sliders};
use crate::snapshot::{ControlMutation, PageMarkup};
use crate::sort::Collation;
use crate::surface::Surface;
use crate::tags::{removal_mutations, Tag};
use tracing::{debug, warn};

pub struct FilterSession<S: Surface> {
    surface: S,
    page: PageMarkup,
    index: ItemIndex,
    exact: ExactCategories,
    sliders: Sliders,
    config: SiftConfig,
    collation: Collation,
    generation: u64,
    last_frame: Option<RenderFrame>,
}

impl<S: Surface> FilterSession<S> {
    /// Set up a page and run the first cycle.
    ///
    /// Fails (after logging a warning) when the filter root or list root is
    /// missing; nothing on the page is touched in that case.
    pub fn initialize(surface: S, config: SiftConfig) -> Result<Self> {
        let page = match surface.scan_page() {
            Ok(page) => page,
            Err(err) => {
                warn!(target: "cardsift", %err, "filter setup aborted");
                return Err(err);
            }
        };

        let collation = Collation::new(&config.locale);
        let mut session = Self {
            surface,
            page: PageMarkup::default(),
            index: ItemIndex::default(),
            exact: ExactCategories::default(),
            sliders: Sliders::default(),
            config,
            collation,
            generation: 0,
            last_frame: None,
        };
        session.setup(page);
        session.request_apply();
        Ok(session)
    }

    /// Rescan the page and rebuild the index from scratch, then run a cycle.
    pub fn rebuild(&mut self) -> Result<RenderFrame> {
        let page = self.surface.scan_page()?;
        self.setup(page);
        Ok(self.request_apply())
    }

    fn setup(&mut self, page: PageMarkup) {
        self.index = ItemIndex::build(&page.items);
        self.exact = ExactCategories::from_page(&page);
        debug!(
            target: "cardsift",
            items = self.index.len(),
            exact = ?self.exact.iter().collect::<Vec<_>>(),
            submit_only = page.submit_only,
            "index built"
        );

        for group in &page.groups {
            if let Some(plan) = populate::plan(group, &self.index, &self.config) {
                self.surface.populate(&plan);
            }
        }

        self.sliders = Sliders::new(&page.sliders);
        for slider in &page.sliders {
            let setup = sliders::setup(slider, &self.index, &self.config);
            let live = self.surface.create_slider(&setup);
            if !live {
                debug!(
                    target: "cardsift",
                    category = %slider.category,
                    "no slider widget, range inputs stay manual"
                );
            }
            self.sliders.set_live(&slider.category, live);
        }

        self.page = page;
    }

    /// Run one apply cycle unconditionally.
    pub fn request_apply(&mut self) -> RenderFrame {
        self.generation += 1;
        let ctx = Context {
            index: &self.index,
            exact: &self.exact,
            groups: &self.page.logic_groups,
            sliders: &self.sliders,
            config: &self.config,
            collation: &self.collation,
        };
        let frame = apply::run(&mut self.surface, &ctx, self.generation);
        self.last_frame = Some(frame.clone());
        frame
    }

    /// Run a cycle if the page reacts to this trigger.
    pub fn on_event(&mut self, trigger: Trigger) -> Option<RenderFrame> {
        if !should_apply(trigger, self.page.submit_only) {
            debug!(target: "cardsift", ?trigger, "ignored on a submit-only page");
            return None;
        }
        Some(self.request_apply())
    }

    /// Carry out a click resolved by the surface.
    pub fn dispatch(&mut self, action: Action) -> Option<RenderFrame> {
        match action {
            Action::Trigger(trigger) => self.on_event(trigger),
            Action::ClearAll => Some(self.clear_all()),
            Action::ClearCategory(category) => Some(self.clear_category(&category)),
            Action::RemoveTag(position) => {
                let tag = self
                    .last_frame
                    .as_ref()
                    .and_then(|f| f.tags.get(position))
                    .cloned();
                match tag {
                    Some(tag) => Some(self.remove_tag(&tag)),
                    None => {
                        debug!(target: "cardsift", position, "no tag at this position");
                        None
                    }
                }
            }
        }
    }

    /// Retract the constraint behind a tag, then run a cycle.
    pub fn remove_tag(&mut self, tag: &Tag) -> RenderFrame {
        let snapshot = self.surface.read_controls();
        let mutations = removal_mutations(tag, &snapshot, &self.sliders, &self.index, &self.config);
        self.mutate(&mutations)
    }

    pub fn clear_all(&mut self) -> RenderFrame {
        let snapshot = self.surface.read_controls();
        let mutations = clear::clear_all_mutations(&snapshot, &self.sliders, &self.index, &self.config);
        self.mutate(&mutations)
    }

    pub fn clear_category(&mut self, category: &str) -> RenderFrame {
        let snapshot = self.surface.read_controls();
        let mutations = clear::clear_category_mutations(
            category,
            &snapshot,
            &self.sliders,
            &self.index,
            &self.config,
        );
        self.mutate(&mutations)
    }

    /// A slider widget moved: copy its handles into the endpoint controls and
    /// run a cycle. Slider moves apply even on submit-only pages.
    pub fn slider_moved(&mut self, category: &str, values: &[f64]) -> Option<RenderFrame> {
        let Some(slider) = self.sliders.get(category) else {
            debug!(target: "cardsift", category, "no slider declared for category");
            return None;
        };
        let snapshot = self.surface.read_controls();
        let writes = sliders::handle_writes(slider, values, &snapshot, &self.config);
        Some(self.mutate(&writes))
    }

    fn mutate(&mut self, mutations: &[ControlMutation]) -> RenderFrame {
        debug!(target: "cardsift", count = mutations.len(), "applying control mutations");
        self.surface.apply_mutations(mutations);
        self.request_apply()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for hosts (and tests) that edit controls themselves.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    pub fn page(&self) -> &PageMarkup {
        &self.page
    }

    pub fn sliders(&self) -> &Sliders {
        &self.sliders
    }

    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }
}
