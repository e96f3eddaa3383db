use super::{Context, RenderFrame};
use crate::filter::reader;
use crate::model::Item;
use crate::snapshot::ControlSnapshot;
use crate::sort::{sort_items, SortSpec};
use crate::surface::Surface;
use crate::tags;
use tracing::debug;

/// One full cycle against a surface.
pub fn run<S: Surface + ?Sized>(surface: &mut S, ctx: &Context<'_>, generation: u64) -> RenderFrame {
    surface.begin_transition();
    let snapshot = surface.read_controls();
    let frame = evaluate(&snapshot, ctx, generation);
    surface.render(&frame);
    surface.end_transition();
    frame
}

/// Snapshot -> frame, without touching a surface.
pub fn evaluate(snapshot: &ControlSnapshot, ctx: &Context<'_>, generation: u64) -> RenderFrame {
    let filters = reader::read(snapshot, ctx.groups, ctx.config.wildcard());
    debug!(
        target: "cardsift",
        generation,
        categories = ?filters.categories().collect::<Vec<_>>(),
        "active filters"
    );

    let (mut visible, hidden): (Vec<&Item>, Vec<&Item>) = ctx
        .index
        .items()
        .iter()
        .partition(|item| filters.matches(&item.fields, ctx.exact));

    if let Some(spec) = sort_spec(snapshot.sort.as_deref()) {
        sort_items(&mut visible, &spec, ctx.collation);
    }

    let tags = tags::render(&filters, ctx.sliders, ctx.config);
    debug!(
        target: "cardsift",
        generation,
        visible = visible.len(),
        total = ctx.index.len(),
        "cycle complete"
    );

    RenderFrame {
        generation,
        visible: visible.into_iter().map(|i| i.handle.clone()).collect(),
        hidden: hidden.into_iter().map(|i| i.handle.clone()).collect(),
        total: ctx.index.len(),
        tags,
        filters,
    }
}

fn sort_spec(raw: Option<&str>) -> Option<SortSpec> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(spec) => Some(spec),
        Err(err) => {
            debug!(target: "cardsift", %err, "ignoring sort value");
            None
        }
    }
}
