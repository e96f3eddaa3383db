//! In-memory document surface.
//!
//! [`DocumentSurface`] owns an [`Element`] tree and implements [`Surface`]
//! over it using the attribute contract in [`attrs`](super::attrs). Every
//! element is stamped with a stable key (`data-sift-key`) on construction;
//! keys are the [`Handle`]s the core sees. Elements created later (populated
//! toggles, cloned tags) get fresh keys.
//!
//! Slider widgets are optional: a document created without them reports
//! every slider as unavailable, like a page without the widget script.

use super::attrs::*;
use super::element::Element;
use super::Surface;
use crate::commands::populate::{Choice, PlanContent, PopulatePlan, ToggleKind};
use crate::commands::{Action, RenderFrame, Trigger};
use crate::error::{Result, SiftError};
use crate::model::Handle;
use crate::sliders::SliderSetup;
use crate::snapshot::{
    AutoGroup, Control, ControlKind, ControlMutation, ControlSnapshot, Endpoint, FieldMarker,
    ItemMarkup, PageMarkup, SliderMarkup, SliderMode,
};
use crate::tags::{Tag, TagKind};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DocumentSurface {
    root: Element,
    next_key: u64,
    slider_widgets: bool,
    /// Handle positions of created slider widgets, by category.
    sliders: BTreeMap<String, Vec<f64>>,
}

fn by_key(handle: &Handle) -> impl Fn(&Element) -> bool + '_ {
    move |e: &Element| e.is(KEY, handle.as_str())
}

fn key_of(el: &Element) -> Handle {
    Handle::new(el.get(KEY).unwrap_or_default())
}

/// Give `el` and its descendants keys. `fresh` replaces existing keys (clones).
fn stamp(el: &mut Element, next_key: &mut u64, fresh: bool) {
    el.for_each_mut(&mut |e| {
        if fresh || !e.has(KEY) {
            *next_key += 1;
            e.set(KEY, &format!("k{}", next_key));
        }
    });
}

fn is_root(e: &Element, kind: &str) -> bool {
    e.is(ROOT, kind)
}

impl DocumentSurface {
    pub fn new(mut root: Element) -> Self {
        let mut next_key = 0;
        stamp(&mut root, &mut next_key, false);
        Self {
            root,
            next_key,
            slider_widgets: false,
            sliders: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(Element::from_json(json)?))
    }

    /// Make slider widgets available to [`Surface::create_slider`].
    pub fn with_slider_widgets(mut self, available: bool) -> Self {
        self.slider_widgets = available;
        self
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Change the markup in place. New elements get keys afterwards; call
    /// `FilterSession::rebuild` for the session to pick the change up.
    pub fn edit(&mut self, f: impl FnOnce(&mut Element)) {
        f(&mut self.root);
        stamp(&mut self.root, &mut self.next_key, false);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    pub fn element(&self, handle: &Handle) -> Option<&Element> {
        self.root.find(&by_key(handle))
    }

    /// Handle of the element with this `id` attribute.
    pub fn by_id(&self, id: &str) -> Option<Handle> {
        self.root.find(&|e| e.is("id", id)).map(key_of)
    }

    /// Handle of the first element matching `pred`.
    pub fn find_handle(&self, pred: &dyn Fn(&Element) -> bool) -> Option<Handle> {
        self.root.find(pred).map(key_of)
    }

    /// Simulate typing or choosing a value.
    pub fn set_value(&mut self, handle: &Handle, value: &str) {
        if let Some(el) = self.root.find_mut(&by_key(handle)) {
            el.value = value.to_string();
        }
    }

    /// Simulate clicking a toggle. Checking a radio unchecks its `name` group.
    pub fn set_checked(&mut self, handle: &Handle, checked: bool) {
        let group = self
            .element(handle)
            .filter(|e| checked && e.input_type() == "radio")
            .and_then(|e| e.get("name"))
            .map(str::to_string);
        if let Some(name) = group {
            self.root.for_each_mut(&mut |e| {
                if e.tag == "input" && e.input_type() == "radio" && e.is("name", &name) {
                    e.checked = false;
                }
            });
        }
        if let Some(el) = self.root.find_mut(&by_key(handle)) {
            el.checked = checked;
        }
    }

    /// Current handle positions of a created slider widget.
    pub fn slider_position(&self, category: &str) -> Option<&[f64]> {
        self.sliders.get(category).map(Vec::as_slice)
    }

    /// Items under the list root that are shown, in display order.
    pub fn visible_items(&self) -> Vec<Handle> {
        self.list_root()
            .map(|list| {
                list.find_all(&|e| e.has(ITEM) && !e.hidden)
                    .into_iter()
                    .map(key_of)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rendered tag elements, in order.
    pub fn active_tags(&self) -> Vec<&Element> {
        self.root.find_all(&|e| e.is(TAG, TAG_ACTIVE))
    }

    /// What a click on this element asks for, if anything.
    pub fn action_at(&self, handle: &Handle) -> Option<Action> {
        let el = self.element(handle)?;
        if let Some(target) = el.get(CLEAR) {
            let target = target.trim();
            return Some(if target == CLEAR_ALL {
                Action::ClearAll
            } else {
                Action::ClearCategory(target.to_string())
            });
        }
        if el.is(TAG_REMOVE, TRUE) {
            return el.get(TAG_INDEX)?.parse().ok().map(Action::RemoveTag);
        }
        if el.is(SUBMIT, TRUE) {
            return Some(Action::Trigger(Trigger::Submit));
        }
        if el.is(SORT, TRUE) {
            return Some(Action::Trigger(Trigger::SortChange));
        }
        None
    }

    fn filter_root(&self) -> Option<&Element> {
        self.root.find(&|e| is_root(e, ROOT_FILTERS))
    }

    fn list_root(&self) -> Option<&Element> {
        self.root.find(&|e| is_root(e, ROOT_LIST))
    }

    fn uncheck(&mut self, handle: &Handle) {
        let is_target = by_key(handle);
        if let Some(label) = self
            .root
            .find_mut(&|e| e.tag == "label" && e.find(&is_target).is_some())
        {
            if let Some(visual) = label.find_mut(&|e| e.has_class(CHECKBOX_VISUAL)) {
                visual.remove_class(CHECKBOX_VISUAL_CHECKED);
            }
        }
        if let Some(input) = self.root.find_mut(&is_target) {
            input.checked = false;
        }
    }

    fn render_tags(&mut self, tags: &[Tag]) {
        let Some(wrapper) = self.root.find_mut(&|e| e.is(TAGS, TAGS_WRAPPER)) else {
            return;
        };
        wrapper.children.retain(|c| !c.is(TAG, TAG_ACTIVE));
        let Some(template) = wrapper.find(&|e| e.is(TAG, TAG_TEMPLATE)).cloned() else {
            debug!(target: "cardsift", "tag wrapper has no template");
            return;
        };

        let mut rendered = Vec::with_capacity(tags.len());
        for (position, tag) in tags.iter().enumerate() {
            let mut el = template.clone();
            el.set(TAG, TAG_ACTIVE);
            el.hidden = false;
            if let TagKind::Value {
                source: Some(source),
                ..
            } = &tag.kind
            {
                el.set(CHECKBOX_ID, source.as_str());
            }
            if let Some(text) = el.find_mut(&|e| e.is(TAG_TEXT, TRUE)) {
                text.text = tag.label.clone();
                text.children.clear();
            }
            if let Some(remove) = el.find_mut(&|e| e.is(TAG_REMOVE, TRUE)) {
                remove.set(TAG_INDEX, &position.to_string());
            }
            stamp(&mut el, &mut self.next_key, true);
            rendered.push(el);
        }

        if let Some(wrapper) = self.root.find_mut(&|e| e.is(TAGS, TAGS_WRAPPER)) {
            wrapper.children.extend(rendered);
        }
    }
}

fn read_control(el: &Element, ancestors: &[&Element]) -> Option<Control> {
    let kind = match el.tag.as_str() {
        "input" => match el.input_type().as_str() {
            "checkbox" => ControlKind::Checkbox,
            "radio" => ControlKind::Radio,
            _ => ControlKind::Input,
        },
        "select" => ControlKind::Select,
        "textarea" => ControlKind::TextArea,
        _ => return None,
    };
    let marker = if kind.is_toggle() {
        ancestors
            .iter()
            .rev()
            .find(|a| a.tag == "label")
            .and_then(|label| label.find_all(&|e| e.has(FIELD)).into_iter().next())
            .map(|m| FieldMarker::new(m.get(FIELD).unwrap_or_default(), m.text_content()))
    } else {
        None
    };
    Some(Control {
        handle: key_of(el),
        kind,
        checked: el.checked,
        value: el.value.clone(),
        field: el.get(FIELD).map(str::to_string),
        marker,
        range: el.get(RANGE).and_then(Endpoint::parse),
        date: el.get(DATE).and_then(Endpoint::parse),
    })
}

fn auto_group(g: &Element) -> AutoGroup {
    AutoGroup {
        handle: key_of(g),
        category: g.get(AUTO).unwrap_or_default().trim().to_string(),
        auto_type: non_empty(g, AUTO_TYPE),
        templated: g.has(AUTO_TEMPLATE),
        has_template_item: !g.find_all(&|e| e.has(AUTO_TEMPLATE_ITEM)).is_empty(),
        is_select: g.tag == "select",
        placeholder: non_empty(g, PLACEHOLDER),
        exact: g.is(EXACT, TRUE),
        logic: non_empty(g, LOGIC),
    }
}

fn field_marker(el: &Element) -> FieldMarker {
    FieldMarker::new(el.get(FIELD).unwrap_or_default(), el.text_content())
}

fn non_empty(el: &Element, key: &str) -> Option<String> {
    el.get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn select_options(placeholder: &str, options: &[Choice]) -> Vec<Element> {
    let placeholder = Element::new("option")
        .attr("value", "")
        .flag("disabled")
        .flag("selected")
        .with_text(placeholder);
    std::iter::once(placeholder)
        .chain(options.iter().map(|o| {
            Element::new("option")
                .attr("value", &o.value)
                .with_value(&o.value)
                .with_text(&o.label)
        }))
        .collect()
}

fn toggle_label(category: &str, kind: ToggleKind, choice: &Choice) -> Element {
    Element::new("label")
        .attr("style", "display: block")
        .with_child(
            Element::new("div").attr("class", &format!("{} {}", CHECKBOX_VISUAL, CHECKBOX_VISUAL_CUSTOM)),
        )
        .with_child(
            Element::new("input")
                .attr("type", kind.as_str())
                .attr("id", &choice.id)
                .with_value(&choice.value),
        )
        .with_child(Element::new("span").attr(FIELD, category).with_text(&choice.label))
}

fn template_clone(template: &Element, category: &str, kind: ToggleKind, choice: &Choice) -> Element {
    let mut el = template.clone();
    el.attrs.remove(AUTO_TEMPLATE_ITEM);
    el.hidden = false;
    if let Some(visual) = el.find_mut(&|e| e.has_class(CHECKBOX_VISUAL)) {
        visual.remove_class(CHECKBOX_VISUAL_CHECKED);
    }
    if let Some(input) = el.find_mut(&|e| {
        e.tag == "input" && matches!(e.input_type().as_str(), "checkbox" | "radio")
    }) {
        input.set("type", kind.as_str());
        input.set("id", &choice.id);
        input.value = choice.value.clone();
        input.checked = false;
    }
    let own_category = |e: &Element| e.is(FIELD, category);
    let span = if el.find(&own_category).is_some() {
        el.find_mut(&own_category)
    } else {
        el.find_mut(&|e| e.has(FIELD))
    };
    if let Some(span) = span {
        span.text = choice.label.clone();
        span.children.clear();
    }
    el
}

impl Surface for DocumentSurface {
    fn scan_page(&self) -> Result<PageMarkup> {
        let filters = self
            .filter_root()
            .ok_or(SiftError::MissingMarkup("filter root [custom-filter=\"filters\"]"))?;
        let list = self
            .list_root()
            .ok_or(SiftError::MissingMarkup("list root [custom-filter=\"list\"]"))?;

        let items = list
            .find_all(&|e| e.has(ITEM))
            .into_iter()
            .map(|item| ItemMarkup {
                handle: key_of(item),
                fields: item
                    .find_all(&|e| e.has(FIELD))
                    .into_iter()
                    .map(field_marker)
                    .collect(),
            })
            .collect();

        let groups = filters
            .find_all(&|e| e.has(AUTO))
            .into_iter()
            .map(auto_group)
            .collect();
        let logic_groups = self
            .root
            .find_all(&|e| e.has(AUTO) && e.has(LOGIC))
            .into_iter()
            .map(auto_group)
            .collect();

        let exact_fields = filters
            .find_all(&|e| e.has(FIELD) && e.is(EXACT, TRUE))
            .into_iter()
            .filter_map(|e| e.get(FIELD).map(str::to_string))
            .collect();

        let sliders = filters
            .find_all(&|e| e.has_class(SLIDER_CLASS))
            .into_iter()
            .map(|s| SliderMarkup {
                category: non_empty(s, SLIDER_CATEGORY).unwrap_or_else(|| "undefined".to_string()),
                mode: SliderMode::parse(s.get(SLIDER_MODE)),
                tag_name: non_empty(s, SLIDER_TAGNAME),
                tooltip_unit: non_empty(s, TOOLTIP),
            })
            .collect();

        let submit_only = !filters.find_all(&|e| e.is(SUBMIT, TRUE)).is_empty();

        Ok(PageMarkup {
            items,
            groups,
            logic_groups,
            exact_fields,
            sliders,
            submit_only,
        })
    }

    fn read_controls(&self) -> ControlSnapshot {
        let mut controls = Vec::new();
        if let Some(filters) = self.filter_root() {
            filters.walk(&mut |el, ancestors| {
                if let Some(control) = read_control(el, ancestors) {
                    controls.push(control);
                }
            });
        }
        let sort = self
            .root
            .find(&|e| e.is(SORT, TRUE))
            .map(|e| e.value.trim().to_string())
            .filter(|v| !v.is_empty());
        ControlSnapshot { controls, sort }
    }

    fn apply_mutations(&mut self, mutations: &[ControlMutation]) {
        for mutation in mutations {
            match mutation {
                ControlMutation::Uncheck(handle) => self.uncheck(handle),
                ControlMutation::ClearValue(handle) => self.set_value(handle, ""),
                ControlMutation::SetValue(handle, value) => self.set_value(handle, value),
                ControlMutation::ResetSlider { category, handles } => {
                    if let Some(position) = self.sliders.get_mut(category) {
                        *position = handles.clone();
                    }
                }
            }
        }
    }

    fn populate(&mut self, plan: &PopulatePlan) {
        let Some(group) = self.root.find(&by_key(&plan.group)) else {
            debug!(target: "cardsift", group = %plan.group, "populate target is gone");
            return;
        };
        let category = plan.category.as_str();

        let mut built: Vec<Element> = match &plan.content {
            PlanContent::Select {
                placeholder,
                options,
            } => select_options(placeholder, options),
            PlanContent::Toggles {
                kind,
                choices,
                templated: false,
            } => choices
                .iter()
                .map(|c| toggle_label(category, *kind, c))
                .collect(),
            PlanContent::Toggles {
                kind,
                choices,
                templated: true,
            } => {
                let Some(template) = group.find_all(&|e| e.has(AUTO_TEMPLATE_ITEM)).into_iter().next()
                else {
                    return;
                };
                choices
                    .iter()
                    .map(|c| template_clone(template, category, *kind, c))
                    .collect()
            }
        };
        for el in &mut built {
            stamp(el, &mut self.next_key, true);
        }

        let Some(group) = self.root.find_mut(&by_key(&plan.group)) else {
            return;
        };
        match &plan.content {
            PlanContent::Select { .. } => {
                group.children = built;
                group.value.clear();
                if !group.has(FIELD) {
                    group.set(FIELD, category);
                }
            }
            PlanContent::Toggles {
                templated: false, ..
            } => group.children = built,
            PlanContent::Toggles { templated: true, .. } => {
                group
                    .children
                    .retain(|c| c.find(&|e| e.has(AUTO_TEMPLATE_ITEM)).is_some());
                if let Some(template) = group.find_mut(&|e| e.has(AUTO_TEMPLATE_ITEM)) {
                    template.hidden = true;
                }
                group.children.extend(built);
            }
        }
    }

    fn render(&mut self, frame: &RenderFrame) {
        if self.list_root().is_none() {
            return;
        }

        let mut shown = Vec::with_capacity(frame.visible.len());
        for handle in &frame.visible {
            if let Some(mut item) = self.root.take(&by_key(handle)) {
                item.hidden = false;
                shown.push(item);
            }
        }
        if let Some(list) = self.root.find_mut(&|e| is_root(e, ROOT_LIST)) {
            list.children.extend(shown);
        }
        for handle in &frame.hidden {
            if let Some(item) = self.root.find_mut(&by_key(handle)) {
                item.hidden = true;
            }
        }

        let visible = frame.visible_count().to_string();
        let total = frame.total.to_string();
        let empty = frame.is_empty();
        self.root.for_each_mut(&mut |e| {
            let count = if e.is(TOTAL, TOTAL_RESULTS) {
                Some(&visible)
            } else if e.is(TOTAL, TOTAL_ALL) {
                Some(&total)
            } else {
                None
            };
            if let Some(count) = count {
                e.text = count.clone();
                e.children.clear();
            }
            if e.is(EMPTY, TRUE) {
                e.hidden = !empty;
            }
        });

        self.render_tags(&frame.tags);
    }

    fn begin_transition(&mut self) {
        if let Some(list) = self.root.find_mut(&|e| is_root(e, ROOT_LIST)) {
            list.set("style", "opacity: 0");
        }
    }

    fn end_transition(&mut self) {
        if let Some(list) = self.root.find_mut(&|e| is_root(e, ROOT_LIST)) {
            list.set("style", "opacity: 1");
        }
    }

    fn create_slider(&mut self, setup: &SliderSetup) -> bool {
        if !self.slider_widgets {
            return false;
        }
        self.sliders.insert(setup.category.clone(), setup.start.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_every_element_gets_a_unique_key() {
        let surface = DocumentSurface::new(shop_page());
        let mut keys = Vec::new();
        surface.root().walk(&mut |e, _| keys.push(e.get(KEY).map(str::to_string)));
        assert!(keys.iter().all(Option::is_some));
        let count = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), count);
    }

    #[test]
    fn test_scan_requires_both_roots() {
        let no_list = DocumentSurface::new(Element::new("body").with_child(filter_root(vec![])));
        assert!(matches!(no_list.scan_page(), Err(SiftError::MissingMarkup(_))));

        let no_filters = DocumentSurface::new(Element::new("body").with_child(list_root(vec![])));
        assert!(matches!(no_filters.scan_page(), Err(SiftError::MissingMarkup(_))));
    }

    #[test]
    fn test_scan_page_reads_items_groups_and_sliders() {
        let surface = DocumentSurface::new(shop_page());
        let page = surface.scan_page().unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(
            page.items[0].fields,
            vec![
                FieldMarker::new("name", "Oak Chair"),
                FieldMarker::new("color", "Red"),
                FieldMarker::new("price", "10"),
                FieldMarker::new("material", "Oak"),
            ]
        );
        assert_eq!(page.groups.len(), 1);
        assert_eq!(page.groups[0].category, "material");
        assert_eq!(page.groups[0].auto_type.as_deref(), Some("checkbox"));
        assert_eq!(page.exact_fields, vec!["color", "color"]);
        assert_eq!(page.sliders.len(), 1);
        assert_eq!(page.sliders[0].tag_name.as_deref(), Some("Price"));
        assert_eq!(page.sliders[0].tooltip_unit.as_deref(), Some("EUR"));
        assert!(!page.submit_only);
    }

    #[test]
    fn test_read_controls_finds_label_markers_and_sort() {
        let mut surface = DocumentSurface::new(shop_page());
        let red = surface.by_id("color-red").unwrap();
        surface.set_checked(&red, true);
        let sort = surface.by_id("sort").unwrap();
        surface.set_value(&sort, "price-desc");

        let snapshot = surface.read_controls();
        let control = snapshot.find(&red).unwrap();
        assert_eq!(control.kind, ControlKind::Checkbox);
        assert!(control.checked);
        assert_eq!(control.marker, Some(FieldMarker::new("color", "Red")));
        assert_eq!(snapshot.sort.as_deref(), Some("price-desc"));

        let from = surface.by_id("price-from").unwrap();
        assert_eq!(snapshot.find(&from).unwrap().range, Some(Endpoint::From));
    }

    #[test]
    fn test_radio_group_is_exclusive() {
        let mut surface = DocumentSurface::new(page(
            vec![radio("size-s", "size", "S", "size"), radio("size-m", "size", "M", "size")],
            vec![],
        ));
        let s = surface.by_id("size-s").unwrap();
        let m = surface.by_id("size-m").unwrap();
        surface.set_checked(&s, true);
        surface.set_checked(&m, true);
        assert!(!surface.element(&s).unwrap().checked);
        assert!(surface.element(&m).unwrap().checked);
    }

    #[test]
    fn test_uncheck_clears_visual_state() {
        let styled = Element::new("label")
            .with_child(
                Element::new("div")
                    .attr("class", &format!("{} {}", CHECKBOX_VISUAL, CHECKBOX_VISUAL_CHECKED)),
            )
            .with_child(
                Element::new("input")
                    .attr("type", "checkbox")
                    .attr("id", "red")
                    .with_checked(true),
            )
            .with_child(Element::new("span").attr(FIELD, "color").with_text("Red"));
        let mut surface = DocumentSurface::new(page(vec![styled], vec![]));
        let red = surface.by_id("red").unwrap();

        surface.apply_mutations(&[ControlMutation::Uncheck(red.clone())]);
        assert!(!surface.element(&red).unwrap().checked);
        assert!(surface
            .root()
            .find(&|e| e.has_class(CHECKBOX_VISUAL_CHECKED))
            .is_none());
        assert!(surface.root().find(&|e| e.has_class(CHECKBOX_VISUAL)).is_some());
    }

    #[test]
    fn test_populate_toggles_replaces_group_content() {
        let mut surface = DocumentSurface::new(shop_page());
        let page = surface.scan_page().unwrap();
        let plan = PopulatePlan {
            group: page.groups[0].handle.clone(),
            category: "material".into(),
            content: PlanContent::Toggles {
                kind: ToggleKind::Checkbox,
                choices: vec![Choice {
                    id: "checkbox-material-0".into(),
                    value: "oak".into(),
                    label: "Oak".into(),
                }],
                templated: false,
            },
        };
        surface.populate(&plan);

        let input = surface.by_id("checkbox-material-0").unwrap();
        let snapshot = surface.read_controls();
        let control = snapshot.find(&input).unwrap();
        assert_eq!(control.marker, Some(FieldMarker::new("material", "Oak")));
        assert_eq!(control.value, "oak");
    }

    #[test]
    fn test_populate_select_adds_placeholder_and_field() {
        let mut surface = DocumentSurface::new(page(
            vec![Element::new("select").attr(AUTO, "color").attr("id", "colors")],
            vec![],
        ));
        let group = surface.by_id("colors").unwrap();
        surface.populate(&PopulatePlan {
            group: group.clone(),
            category: "color".into(),
            content: PlanContent::Select {
                placeholder: "Choose Color".into(),
                options: vec![Choice {
                    id: "checkbox-color-0".into(),
                    value: "red".into(),
                    label: "Red".into(),
                }],
            },
        });
        let select = surface.element(&group).unwrap();
        assert_eq!(select.get(FIELD), Some("color"));
        assert_eq!(select.children.len(), 2);
        assert!(select.children[0].has("disabled"));
        assert_eq!(select.children[1].text, "Red");
    }

    #[test]
    fn test_populate_template_clones_and_hides_template() {
        let template = Element::new("label")
            .attr(AUTO_TEMPLATE_ITEM, "")
            .with_child(Element::new("input").attr("type", "checkbox"))
            .with_child(Element::new("span").attr(FIELD, "color").with_text("Sample"));
        let mut surface = DocumentSurface::new(page(
            vec![Element::new("div")
                .attr(AUTO, "color")
                .attr(AUTO_TEMPLATE, "")
                .attr("id", "g")
                .with_child(template)],
            vec![],
        ));
        let group = surface.by_id("g").unwrap();
        let plan = PopulatePlan {
            group: group.clone(),
            category: "color".into(),
            content: PlanContent::Toggles {
                kind: ToggleKind::Radio,
                choices: vec![
                    Choice {
                        id: "checkbox-color-0".into(),
                        value: "blue".into(),
                        label: "Blue".into(),
                    },
                    Choice {
                        id: "checkbox-color-1".into(),
                        value: "red".into(),
                        label: "Red".into(),
                    },
                ],
                templated: true,
            },
        };
        surface.populate(&plan);
        surface.populate(&plan);

        let el = surface.element(&group).unwrap();
        assert_eq!(el.children.len(), 3);
        assert!(el.children[0].hidden);
        assert_eq!(el.children[2].text_content(), "Red");
        let input = surface.by_id("checkbox-color-1").unwrap();
        assert_eq!(surface.element(&input).unwrap().input_type(), "radio");
    }

    #[test]
    fn test_create_slider_depends_on_widgets() {
        let setup = SliderSetup {
            category: "price".into(),
            mode: SliderMode::Range,
            start: vec![1.0, 9.0],
            min: 1.0,
            max: 9.0,
            step: 1.0,
            tooltip_unit: None,
        };
        let mut bare = DocumentSurface::new(shop_page());
        assert!(!bare.create_slider(&setup));

        let mut live = DocumentSurface::new(shop_page()).with_slider_widgets(true);
        assert!(live.create_slider(&setup));
        live.apply_mutations(&[ControlMutation::ResetSlider {
            category: "price".into(),
            handles: vec![2.0, 8.0],
        }]);
        assert_eq!(live.slider_position("price"), Some(&[2.0, 8.0][..]));
    }

    #[test]
    fn test_actions_from_markup() {
        let surface = DocumentSurface::new(shop_page());
        let clear_all = surface.find_handle(&|e| e.is(CLEAR, CLEAR_ALL)).unwrap();
        assert_eq!(surface.action_at(&clear_all), Some(Action::ClearAll));
        let clear_color = surface.find_handle(&|e| e.is(CLEAR, "color")).unwrap();
        assert_eq!(
            surface.action_at(&clear_color),
            Some(Action::ClearCategory("color".into()))
        );
        let sort = surface.by_id("sort").unwrap();
        assert_eq!(
            surface.action_at(&sort),
            Some(Action::Trigger(Trigger::SortChange))
        );
        let item = surface.find_handle(&|e| e.has(ITEM)).unwrap();
        assert_eq!(surface.action_at(&item), None);
    }

    fn frame(tags: Vec<Tag>) -> RenderFrame {
        RenderFrame {
            generation: 1,
            visible: vec![],
            hidden: vec![],
            total: 0,
            tags,
            filters: crate::filter::FilterSet::new("*"),
        }
    }

    #[test]
    fn test_stale_tags_removed_without_template() {
        let mut stale = Element::new("div").attr(TAG, TAG_ACTIVE);
        stale.text = "red".into();
        let wrapper = Element::new("div").attr(TAGS, TAGS_WRAPPER).with_child(stale);
        let mut surface = DocumentSurface::new(
            Element::new("body")
                .with_child(filter_root(vec![]))
                .with_child(wrapper)
                .with_child(list_root(vec![])),
        );
        assert_eq!(surface.active_tags().len(), 1);

        surface.render(&frame(vec![Tag {
            category: "color".into(),
            label: "blue".into(),
            kind: TagKind::Bounds,
        }]));
        assert!(surface.active_tags().is_empty());
    }

    #[test]
    fn test_uppercase_json_tags_are_read_as_controls() {
        let json = r#"{"tag": "BODY", "children": [
            {"tag": "FORM", "attrs": {"custom-filter": "filters"}, "children": [
                {"tag": "INPUT", "attrs": {"id": "q", "custom-filter-field": "*"}},
                {"tag": "SELECT", "attrs": {"custom-filter-auto": "color"}}
            ]},
            {"tag": "DIV", "attrs": {"custom-filter": "list"}}
        ]}"#;
        let surface = DocumentSurface::from_json(json).unwrap();
        let snapshot = surface.read_controls();
        assert_eq!(snapshot.controls.len(), 2);
        assert_eq!(snapshot.controls[0].kind, ControlKind::Input);
        assert!(surface.scan_page().unwrap().groups[0].is_select);
    }

    #[test]
    fn test_logic_groups_are_read_from_the_whole_page() {
        let outside = Element::new("div")
            .attr(AUTO, "feature")
            .attr(LOGIC, "all");
        let root = shop_page().with_child(outside);
        let page = DocumentSurface::new(root).scan_page().unwrap();

        assert_eq!(page.groups.len(), 1);
        assert_eq!(page.logic_groups.len(), 1);
        assert_eq!(page.logic_groups[0].category, "feature");
        assert_eq!(page.logic_groups[0].logic.as_deref(), Some("all"));
    }

    #[test]
    fn test_edit_stamps_new_elements() {
        let mut surface = DocumentSurface::new(shop_page());
        surface.edit(|root| {
            if let Some(list) = root.find_mut(&|e| e.is(ROOT, ROOT_LIST)) {
                list.children.push(item("teak-bench", &[("name", "Teak Bench")]));
            }
        });
        let handle = surface.by_id("teak-bench").unwrap();
        assert!(!handle.as_str().is_empty());
        assert_eq!(surface.scan_page().unwrap().items.len(), 4);
    }

    #[test]
    fn test_json_round_trip_keeps_keys() {
        let surface = DocumentSurface::new(shop_page());
        let json = surface.to_json().unwrap();
        let restored = DocumentSurface::from_json(&json).unwrap();
        assert_eq!(restored.root(), surface.root());
    }
}
