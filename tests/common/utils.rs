#![allow(dead_code)]

use change_tracker::{
    dom::{
        document::Document,
        dom_model::NodeId,
        event::{DomEvent, EventListener},
        loader::load_form,
    },
    tracker::tracker::ChangeTracker,
};

pub fn fixture(name: &str) -> String {
    let base = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    base.join("tests").join("fixtures").join(name).display().to_string()
}

/// The contact form with fifteen trackable controls under `#container`.
pub fn container() -> Document {
    load_form(&fixture("container.yaml")).unwrap()
}

pub fn node(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id)
        .unwrap_or_else(|| panic!("fixture has no element '{}'", id))
}

pub fn fire(doc: &Document, tracker: &mut ChangeTracker, event: DomEvent) {
    let listener: &mut dyn EventListener = tracker;
    doc.dispatch(&event, &mut [listener]);
}

/// Focus, assign a value, commit: what a user typing into a field does.
pub fn change_value(doc: &mut Document, tracker: &mut ChangeTracker, id: &str, value: &str) {
    let n = node(doc, id);
    fire(doc, tracker, DomEvent::focus(n));
    doc.set_value(n, value).unwrap();
    fire(doc, tracker, DomEvent::change(n));
}

/// Focus, assign the checked flag, commit.
pub fn change_checked(doc: &mut Document, tracker: &mut ChangeTracker, id: &str, checked: bool) {
    let n = node(doc, id);
    fire(doc, tracker, DomEvent::focus(n));
    doc.set_checked(n, checked).unwrap();
    fire(doc, tracker, DomEvent::change(n));
}

pub fn value_of(doc: &Document, id: &str) -> String {
    doc.control(node(doc, id)).unwrap().value.clone()
}

pub fn checked_of(doc: &Document, id: &str) -> bool {
    doc.control(node(doc, id)).unwrap().checked
}

pub fn initialized(doc: &Document) -> ChangeTracker {
    let mut tracker = ChangeTracker::new();
    tracker.initialize(doc, "container").unwrap();
    tracker
}
