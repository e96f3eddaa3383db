//! Page builders for tests.
//!
//! Every builder returns plain [`Element`]s carrying the markup attributes a
//! real page would. [`shop_page`] is the shared fixture: a filter root with a
//! search box, two exact color checkboxes, an auto-populated material group,
//! a price range with a slider placeholder, a sort select and clear buttons;
//! a tag wrapper, counters and an empty state; three furniture items.

use crate::surface::attrs::*;
use crate::surface::Element;

pub fn filter_root(children: Vec<Element>) -> Element {
    Element::new("form")
        .attr(ROOT, ROOT_FILTERS)
        .with_children(children)
}

pub fn list_root(items: Vec<Element>) -> Element {
    Element::new("div").attr(ROOT, ROOT_LIST).with_children(items)
}

/// An item card with one field marker per `(category, text)` pair.
pub fn item(id: &str, fields: &[(&str, &str)]) -> Element {
    Element::new("div")
        .attr(ITEM, "")
        .attr("id", id)
        .with_children(
            fields
                .iter()
                .map(|(field, text)| Element::new("p").attr(FIELD, field).with_text(text)),
        )
}

fn labelled_toggle(kind: &str, id: &str, field: &str, text: &str) -> Element {
    Element::new("label")
        .with_child(Element::new("div").attr("class", CHECKBOX_VISUAL))
        .with_child(Element::new("input").attr("type", kind).attr("id", id))
        .with_child(Element::new("span").attr(FIELD, field).with_text(text))
}

pub fn checkbox(id: &str, field: &str, text: &str) -> Element {
    labelled_toggle("checkbox", id, field, text)
}

pub fn radio(id: &str, field: &str, text: &str, name: &str) -> Element {
    let mut label = labelled_toggle("radio", id, field, text);
    if let Some(input) = label.find_mut(&|e| e.tag == "input") {
        input.set("name", name);
    }
    label
}

/// Mark the field marker inside `el` for exact matching.
pub fn exact(mut el: Element) -> Element {
    if let Some(marker) = el.find_mut(&|e| e.has(FIELD)) {
        marker.set(EXACT, TRUE);
    }
    el
}

pub fn text_input(id: &str, field: &str) -> Element {
    Element::new("input")
        .attr("type", "text")
        .attr("id", id)
        .attr(FIELD, field)
}

pub fn range_input(id: &str, field: &str, endpoint: &str) -> Element {
    text_input(id, field).attr(RANGE, endpoint)
}

pub fn date_input(id: &str, field: &str, endpoint: &str) -> Element {
    Element::new("input")
        .attr("type", "date")
        .attr("id", id)
        .attr(FIELD, field)
        .attr(DATE, endpoint)
}

pub fn slider(category: &str, mode: &str, tag_name: &str, unit: &str) -> Element {
    Element::new("div")
        .attr("class", SLIDER_CLASS)
        .attr(SLIDER_CATEGORY, category)
        .attr(SLIDER_MODE, mode)
        .attr(SLIDER_TAGNAME, tag_name)
        .attr(TOOLTIP, unit)
}

pub fn sort_select(id: &str, options: &[&str]) -> Element {
    Element::new("select")
        .attr(SORT, TRUE)
        .attr("id", id)
        .with_child(Element::new("option").attr("value", "").with_text("Sort by"))
        .with_children(
            options
                .iter()
                .map(|o| Element::new("option").attr("value", o).with_text(o)),
        )
}

pub fn clear_button(target: &str) -> Element {
    Element::new("button").attr(CLEAR, target).with_text("Clear")
}

pub fn submit_button() -> Element {
    Element::new("button")
        .attr("type", "submit")
        .attr(SUBMIT, TRUE)
        .with_text("Apply")
}

/// Tag wrapper holding a hidden template with a text and a remove target.
pub fn tag_wrapper() -> Element {
    let mut template = Element::new("div")
        .attr(TAG, TAG_TEMPLATE)
        .with_child(Element::new("span").attr(TAG_TEXT, TRUE).with_text("Tag"))
        .with_child(Element::new("button").attr(TAG_REMOVE, TRUE).with_text("x"));
    template.hidden = true;
    Element::new("div").attr(TAGS, TAGS_WRAPPER).with_child(template)
}

pub fn counters() -> Vec<Element> {
    vec![
        Element::new("span").attr(TOTAL, TOTAL_RESULTS).attr("id", "results"),
        Element::new("span").attr(TOTAL, TOTAL_ALL).attr("id", "total"),
        Element::new("div")
            .attr(EMPTY, TRUE)
            .attr("id", "empty")
            .with_text("Nothing matches"),
    ]
}

/// A body with the given filter controls, a tag wrapper, counters and items.
pub fn page(filters: Vec<Element>, items: Vec<Element>) -> Element {
    Element::new("body")
        .with_child(filter_root(filters))
        .with_child(tag_wrapper())
        .with_children(counters())
        .with_child(list_root(items))
}

pub fn shop_items() -> Vec<Element> {
    vec![
        item(
            "oak-chair",
            &[("name", "Oak Chair"), ("color", "Red"), ("price", "10"), ("material", "Oak")],
        ),
        item(
            "pine-desk",
            &[("name", "Pine Desk"), ("color", "Blue"), ("price", "20"), ("material", "Pine")],
        ),
        item(
            "walnut-shelf",
            &[("name", "Walnut Shelf"), ("color", "Red"), ("price", "30"), ("material", "Walnut")],
        ),
    ]
}

pub fn shop_filters() -> Vec<Element> {
    vec![
        text_input("search", "*"),
        exact(checkbox("color-red", "color", "Red")),
        exact(checkbox("color-blue", "color", "Blue")),
        Element::new("div")
            .attr(AUTO, "material")
            .attr(AUTO_TYPE, "checkbox")
            .attr("id", "materials"),
        range_input("price-from", "price", "from"),
        range_input("price-to", "price", "to"),
        slider("price", "range", "Price", "EUR"),
        sort_select("sort", &["price-asc", "price-desc", "name-asc"]),
        clear_button(CLEAR_ALL),
        clear_button("color"),
    ]
}

pub fn shop_page() -> Element {
    page(shop_filters(), shop_items())
}
