//! # Presentation Surface
//!
//! The engine never touches markup itself. A [`Surface`] is the seam between
//! the core and whatever holds the page:
//!
//! - **Reads**: [`scan_page`](Surface::scan_page) once at setup,
//!   [`read_controls`](Surface::read_controls) at the start of every cycle.
//! - **Writes**: control mutations, populated groups, rendered frames, slider
//!   widgets.
//!
//! ## Implementations
//!
//! - [`DocumentSurface`]: an in-memory element tree that implements the full
//!   attribute contract in [`attrs`]. Tests and server-side hosts use it.
//! - Hosts with a live DOM implement the trait over their own bindings.
//!
//! ## Transitions
//!
//! [`begin_transition`](Surface::begin_transition) and
//! [`end_transition`](Surface::end_transition) bracket every render. They are
//! hints (e.g. a fade on the list root) and default to no-ops.

pub mod attrs;
pub mod document;
pub mod element;

use crate::commands::populate::PopulatePlan;
use crate::commands::RenderFrame;
use crate::error::Result;
use crate::sliders::SliderSetup;
use crate::snapshot::{ControlMutation, ControlSnapshot, PageMarkup};

pub use document::DocumentSurface;
pub use element::Element;

pub trait Surface {
    /// Setup-time scan. Fails with
    /// [`SiftError::MissingMarkup`](crate::error::SiftError::MissingMarkup)
    /// when the filter root or the list root is absent.
    fn scan_page(&self) -> Result<PageMarkup>;

    /// Current state of every control under the filter root, plus the sort value.
    fn read_controls(&self) -> ControlSnapshot;

    /// Apply control mutations in order. Unknown handles are ignored.
    fn apply_mutations(&mut self, mutations: &[ControlMutation]);

    fn populate(&mut self, plan: &PopulatePlan);

    /// Show, hide and reorder items; update counters, empty state and tags.
    fn render(&mut self, frame: &RenderFrame);

    fn begin_transition(&mut self) {}

    fn end_transition(&mut self) {}

    /// Create a slider widget. Returns `false` when no widget is available;
    /// the endpoint controls then stay editable by hand.
    fn create_slider(&mut self, setup: &SliderSetup) -> bool {
        let _ = setup;
        false
    }
}
