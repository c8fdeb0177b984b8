use crate::{
    dom::{
        document::Document,
        dom_model::{Control, Element, NodeId},
    },
    tracker::{kind::TrackableKind, value::ControlValue},
};

/// A node that carries a control of a trackable kind.
#[derive(Debug, Clone, Copy)]
pub struct TrackedControl<'a> {
    pub node: NodeId,
    pub element: &'a Element,
    pub control: &'a Control,
    pub kind: TrackableKind,
}

impl<'a> TrackedControl<'a> {
    /// Radio group name, when the radio belongs to one.
    pub fn group(&self) -> Option<&'a str> {
        match self.kind {
            TrackableKind::Radio => non_blank(self.element.name.as_deref()),
            _ => None,
        }
    }
}

pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Element identifier: the id when non-blank, else the name when non-blank.
pub fn element_key(element: &Element) -> Option<String> {
    non_blank(element.id.as_deref())
        .or_else(|| non_blank(element.name.as_deref()))
        .map(str::to_string)
}

pub fn trackable(doc: &Document, node: NodeId) -> Option<TrackedControl<'_>> {
    let element = doc.element(node)?;
    let control = element.control.as_ref()?;
    let kind = TrackableKind::parse(&control.kind)?;
    Some(TrackedControl {
        node,
        element,
        control,
        kind,
    })
}

/// Key a control's values are stored under: the group name for grouped
/// radios, the element identifier otherwise.
pub fn tracking_key(tracked: &TrackedControl<'_>) -> Option<String> {
    // A radio with neither id nor name is untrackable even as a group member
    let key = element_key(tracked.element)?;
    Some(tracked.group().map(str::to_string).unwrap_or(key))
}

/// Label for a radio: trimmed text of the following text node, else its
/// trimmed value, else its id.
pub fn radio_label(doc: &Document, node: NodeId) -> String {
    let sibling_text = doc
        .next_sibling(node)
        .and_then(|s| doc.text(s))
        .filter(|t| !t.trim().is_empty());
    if let Some(text) = sibling_text {
        return text.trim().to_string();
    }

    let Some(element) = doc.element(node) else {
        return String::new();
    };
    let value = element
        .control
        .as_ref()
        .map(|c| c.value.as_str())
        .filter(|v| !v.trim().is_empty());
    if let Some(value) = value {
        return value.trim().to_string();
    }

    element.id.clone().unwrap_or_default()
}

fn radio_members(doc: &Document, group: &str) -> Vec<NodeId> {
    doc.elements_by_name(group)
        .into_iter()
        .filter(|n| matches!(trackable(doc, *n), Some(t) if t.kind == TrackableKind::Radio))
        .collect()
}

/// Original value of a control, read when it first gains focus.
pub fn baseline_value(doc: &Document, tracked: &TrackedControl<'_>) -> ControlValue {
    let control = tracked.control;
    match tracked.kind {
        TrackableKind::SelectOne => {
            let label = control
                .options
                .iter()
                .find(|o| o.default_selected)
                .or_else(|| control.selected_option())
                .map(|o| o.label.clone())
                .unwrap_or_default();
            ControlValue::Text(label)
        }
        TrackableKind::Radio => match tracked.group() {
            Some(group) => {
                let default_member = radio_members(doc, group).into_iter().find(|n| {
                    doc.control(*n).map(|c| c.default_checked).unwrap_or(false)
                });
                ControlValue::Text(
                    default_member
                        .map(|n| radio_label(doc, n))
                        .unwrap_or_default(),
                )
            }
            None => ControlValue::Flag(control.checked),
        },
        TrackableKind::Checkbox => ControlValue::Flag(control.default_checked || control.checked),
        TrackableKind::Text
        | TrackableKind::TextArea
        | TrackableKind::Email
        | TrackableKind::Number
        | TrackableKind::Range
        | TrackableKind::Url
        | TrackableKind::Password => {
            let value = non_blank(control.default_value.as_deref()).unwrap_or(control.value.as_str());
            ControlValue::text(value)
        }
    }
}

/// Value a control holds when it commits a change.
pub fn committed_value(doc: &Document, tracked: &TrackedControl<'_>) -> ControlValue {
    let control = tracked.control;
    match tracked.kind {
        TrackableKind::SelectOne => ControlValue::Text(
            control
                .selected_option()
                .map(|o| o.label.clone())
                .unwrap_or_default(),
        ),
        TrackableKind::Checkbox => ControlValue::Flag(control.checked),
        TrackableKind::Radio => match tracked.group() {
            Some(group) => {
                let checked_member = radio_members(doc, group)
                    .into_iter()
                    .find(|n| doc.control(*n).map(|c| c.checked).unwrap_or(false));
                ControlValue::Text(
                    checked_member
                        .map(|n| radio_label(doc, n))
                        .unwrap_or_default(),
                )
            }
            None => ControlValue::Flag(control.checked),
        },
        TrackableKind::Text
        | TrackableKind::TextArea
        | TrackableKind::Email
        | TrackableKind::Number
        | TrackableKind::Range
        | TrackableKind::Url
        | TrackableKind::Password => ControlValue::text(control.value.as_str()),
    }
}
