use change_tracker::dom::{
    document::Document,
    dom_model::{Control, Element, NodeId, SelectOption},
    error::DomError,
    event::{DomEvent, EventListener, EventType},
    loader::{FormSpec, load_form},
};

use crate::common::utils::{container, fixture, node};

mod common;

// =========================================================================
// Tree building and lookups
// =========================================================================

#[test]
fn build_and_query_tree() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let form = doc.append_element(root, Element::new("form").with_id("f")).unwrap();
    let a = doc
        .append_element(form, Element::new("input").with_id("a").with_control(Control::new("text")))
        .unwrap();
    let label = doc.append_text(form, "Alpha").unwrap();
    let b = doc
        .append_element(form, Element::new("input").with_name("grp").with_control(Control::new("radio")))
        .unwrap();

    assert_eq!(doc.element_by_id("a"), Some(a));
    assert_eq!(doc.elements_by_name("grp"), vec![b]);
    assert!(doc.elements_by_name("missing").is_empty());

    assert_eq!(doc.children(form), vec![a, b], "Text nodes are not element children");
    assert!(doc.has_child_nodes(form));
    assert!(!doc.has_child_nodes(a));

    assert_eq!(doc.next_sibling(a), Some(label));
    assert_eq!(doc.text(label), Some("Alpha"));
    assert_eq!(doc.next_sibling(b), None);

    assert!(doc.is_inclusive_ancestor(form, b));
    assert!(doc.is_inclusive_ancestor(b, b));
    assert!(!doc.is_inclusive_ancestor(a, b));
}

#[test]
fn append_to_unknown_parent_fails() {
    let mut doc = Document::new("body");
    let stray = NodeId(42);
    assert!(matches!(
        doc.append_text(stray, "x"),
        Err(DomError::UnknownNode(42))
    ));
}

// =========================================================================
// Live mutation
// =========================================================================

#[test]
fn set_value_on_select_matches_value_then_label() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let sel = doc
        .append_element(
            root,
            Element::new("select").with_id("s").with_control(
                Control::new("select-one").with_options(vec![
                    SelectOption::new("1", "One").default_selected(),
                    SelectOption::new("2", "Two"),
                ]),
            ),
        )
        .unwrap();

    doc.set_value(sel, "2").unwrap();
    assert_eq!(doc.control(sel).unwrap().selected_index(), Some(1));
    assert_eq!(doc.control(sel).unwrap().value, "2");

    doc.set_value(sel, "One").unwrap();
    assert_eq!(doc.control(sel).unwrap().selected_index(), Some(0), "Label fallback");

    doc.set_value(sel, "nope").unwrap();
    assert_eq!(doc.control(sel).unwrap().selected_index(), None);
    assert_eq!(doc.control(sel).unwrap().value, "");
}

#[test]
fn checking_a_radio_unchecks_its_group() {
    let mut doc = container();
    let a = node(&doc, "opt-optiona");
    let b = node(&doc, "opt-option2");
    assert!(doc.control(a).unwrap().checked);

    doc.set_checked(b, true).unwrap();
    assert!(!doc.control(a).unwrap().checked);
    assert!(doc.control(b).unwrap().checked);
}

#[test]
fn mutating_a_non_control_fails() {
    let mut doc = container();
    let root = node(&doc, "container");
    assert!(matches!(doc.set_value(root, "x"), Err(DomError::NotAControl(_))));
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn loader_applies_defaults() {
    let doc = container();

    let num = doc.control(node(&doc, "num-text")).unwrap();
    assert_eq!(num.value, "0", "Value falls back to the default value");
    assert_eq!(num.default_value.as_deref(), Some("0"));

    let title = doc.control(node(&doc, "sel-title")).unwrap();
    assert_eq!(title.kind, "select-one", "select tag implies select-one");
    assert_eq!(title.selected_option().map(|o| o.label.as_str()), Some("Mr."));

    let tags = doc.control(node(&doc, "sel-tags")).unwrap();
    assert_eq!(tags.kind, "select-multiple");

    let chk = doc.control(node(&doc, "chk-check1")).unwrap();
    assert!(chk.checked && chk.default_checked);

    let notes = doc.control(node(&doc, "txt-notes")).unwrap();
    assert_eq!(notes.kind, "textarea");

    let save = doc.control(node(&doc, "btn-save")).unwrap();
    assert_eq!(save.kind, "submit");
}

#[test]
fn load_form_from_json() {
    let spec = FormSpec {
        tag: Some("div".into()),
        id: Some("container".into()),
        children: vec![FormSpec {
            tag: Some("input".into()),
            id: Some("x".into()),
            value: Some("hello".into()),
            ..FormSpec::default()
        }],
        ..FormSpec::default()
    };
    let path = std::env::temp_dir().join("change_tracker_form_test.json");
    std::fs::write(&path, serde_json::to_string(&spec).unwrap()).unwrap();

    let doc = load_form(&path.display().to_string()).unwrap();
    assert_eq!(doc.element_by_id("container"), Some(doc.root()));
    let x = doc.element_by_id("x").unwrap();
    assert_eq!(doc.control(x).unwrap().value, "hello");
    assert_eq!(doc.control(x).unwrap().kind, "text");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_form_reports_missing_file() {
    let err = load_form(&fixture("does-not-exist.yaml")).unwrap_err();
    assert!(matches!(err, DomError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist.yaml"));
}

// =========================================================================
// Event dispatch
// =========================================================================

struct Recorder {
    root: Option<NodeId>,
    only: EventType,
    seen: Vec<DomEvent>,
}

impl EventListener for Recorder {
    fn capture_root(&self, _doc: &Document) -> Option<NodeId> {
        self.root
    }

    fn listens_to(&self, event_type: EventType) -> bool {
        event_type == self.only
    }

    fn handle_event(&mut self, _doc: &Document, event: &DomEvent) {
        self.seen.push(*event);
    }
}

#[test]
fn dispatch_reaches_listeners_capturing_on_an_ancestor() {
    let doc = container();
    let field = node(&doc, "num-age");

    let recorder = |root: Option<NodeId>, only: EventType| Recorder {
        root,
        only,
        seen: vec![],
    };
    let mut on_container = recorder(Some(node(&doc, "container")), EventType::Focus);
    let mut on_other = recorder(Some(node(&doc, "txt-outside")), EventType::Focus);
    let mut wrong_type = recorder(Some(doc.root()), EventType::Change);
    let mut detached = recorder(None, EventType::Focus);

    doc.dispatch(
        &DomEvent::focus(field),
        &mut [
            &mut on_container as &mut dyn EventListener,
            &mut on_other as &mut dyn EventListener,
            &mut wrong_type as &mut dyn EventListener,
            &mut detached as &mut dyn EventListener,
        ],
    );

    assert_eq!(on_container.seen, vec![DomEvent::focus(field)], "Delivered once");
    assert!(on_other.seen.is_empty());
    assert!(wrong_type.seen.is_empty());
    assert!(detached.seen.is_empty());
}
