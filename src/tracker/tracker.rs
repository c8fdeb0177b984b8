use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    dom::{
        document::Document,
        dom_model::NodeId,
        error::DomError,
        event::{DomEvent, EventListener, EventType},
    },
    trace::{logger::TraceLogger, trace::TraceEvent},
    tracker::{
        changed::{ChangedElement, ChangedElementCollection},
        error::TrackerError,
        kind::TrackableKind,
        resolve::{
            baseline_value, committed_value, element_key, non_blank, trackable, tracking_key,
        },
        session::TrackingSession,
    },
};

/// Tracks whether the controls under one container changed since the
/// session started, and can put the original values back.
///
/// The tracker captures on its root for focus and change events; the host
/// feeds it through `Document::dispatch`.
///
/// ```ignore
/// let mut tracker = ChangeTracker::new();
/// tracker.initialize(&doc, "container")?;
///
/// doc.dispatch(&DomEvent::focus(field), &mut [&mut tracker]);
/// doc.set_value(field, "1")?;
/// doc.dispatch(&DomEvent::change(field), &mut [&mut tracker]);
///
/// assert!(tracker.is_dirty());
/// tracker.reset(&mut doc)?;
/// ```
#[derive(Default)]
pub struct ChangeTracker {
    session: Option<TrackingSession>,
    tracer: Option<Arc<TraceLogger>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self {
            session: None,
            tracer: None,
        }
    }

    pub fn with_tracer(mut self, tracer: Arc<TraceLogger>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn session(&self) -> Option<&TrackingSession> {
        self.session.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn root_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.root_id.as_str())
    }

    /// Start a fresh session on the container with id `root_id`.
    ///
    /// Fails without touching the current session when the id is blank or
    /// names no element of `doc`.
    pub fn initialize(&mut self, doc: &Document, root_id: &str) -> Result<(), TrackerError> {
        if root_id.trim().is_empty() {
            return Err(TrackerError::InvalidArgument(
                "root id must be a non-empty element id".into(),
            ));
        }
        let root = doc.element_by_id(root_id).ok_or_else(|| {
            TrackerError::InvalidArgument(format!("no element with id '{}'", root_id))
        })?;

        self.session = Some(TrackingSession::new(root_id, root));
        self.trace(|step| TraceEvent::now(step, "initialized").with_root(root_id));
        Ok(())
    }

    /// Whether any committed value differs from its baseline.
    pub fn is_dirty(&self) -> bool {
        match &self.session {
            Some(session) => session.differing().next().is_some(),
            None => false,
        }
    }

    /// Fresh list of controls whose committed value differs from the
    /// baseline, in the order they were first committed.
    pub fn changed_elements(&self) -> ChangedElementCollection {
        let mut collection = ChangedElementCollection::new();
        if let Some(session) = &self.session {
            for (key, original, new_value) in session.differing() {
                collection.add(ChangedElement {
                    element_id: key.clone(),
                    original_value: original.clone(),
                    new_value: new_value.clone(),
                });
            }
        }
        collection
    }

    /// Every trackable control under the root, keyed by identifier.
    ///
    /// Walks the live tree in pre-order; a later control with the same
    /// identifier replaces an earlier one.
    pub fn input_elements(&self, doc: &Document) -> Result<IndexMap<String, NodeId>, TrackerError> {
        let session = self.session.as_ref().ok_or(TrackerError::NotInitialized)?;

        let mut inputs = IndexMap::new();
        if let Some(root) = doc.element_by_id(&session.root_id) {
            collect_inputs(doc, root, &mut inputs);
        }
        Ok(inputs)
    }

    /// Write every changed control's original value back onto `doc`, then
    /// start a new session on the same root.
    pub fn reset(&mut self, doc: &mut Document) -> Result<(), TrackerError> {
        let root_id = self
            .session
            .as_ref()
            .map(|s| s.root_id.clone())
            .ok_or(TrackerError::NotInitialized)?;

        // Every entry is attempted and the session restarts even when one
        // fails, so baselines always describe the document as left behind
        let mut first_error = None;
        for changed in self.changed_elements() {
            match restore(doc, &changed) {
                Ok(()) => self.trace(|step| {
                    TraceEvent::now(step, "restored")
                        .with_element(&changed.element_id)
                        .with_value(&changed.original_value)
                }),
                Err(e) => {
                    self.trace(|step| {
                        TraceEvent::now(step, "restore_failed")
                            .with_element(&changed.element_id)
                            .with_detail(&e)
                    });
                    first_error.get_or_insert(e);
                }
            }
        }

        self.initialize(doc, &root_id)?;
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Record the baseline of a control the first time it gains focus.
    pub fn on_focus(&mut self, doc: &Document, node: NodeId) {
        let Some(tracked) = trackable(doc, node) else {
            return;
        };
        let Some(key) = tracking_key(&tracked) else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.has_baseline(&key) {
            return;
        }

        let value = baseline_value(doc, &tracked);
        session.capture_baseline(&key, value.clone());
        self.trace(|step| {
            TraceEvent::now(step, "baseline_captured")
                .with_element(&key)
                .with_kind(tracked.kind)
                .with_value(&value)
        });
    }

    /// Record the committed value of a control.
    pub fn on_change(&mut self, doc: &Document, node: NodeId) {
        let Some(tracked) = trackable(doc, node) else {
            return;
        };
        let Some(key) = tracking_key(&tracked) else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let value = committed_value(doc, &tracked);
        let recorded = session.record(&key, value.clone());
        let event = if recorded { "change_recorded" } else { "change_ignored" };
        self.trace(|step| {
            let ev = TraceEvent::now(step, event)
                .with_element(&key)
                .with_kind(tracked.kind)
                .with_value(&value);
            if recorded {
                ev
            } else {
                ev.with_detail("no baseline captured for this control")
            }
        });
    }

    fn trace(&self, build: impl FnOnce(u64) -> TraceEvent) {
        if let Some(tracer) = &self.tracer {
            if tracer.is_enabled() {
                tracer.log(&build(tracer.next_step()));
            }
        }
    }
}

impl EventListener for ChangeTracker {
    fn capture_root(&self, _doc: &Document) -> Option<NodeId> {
        self.session.as_ref().map(|s| s.root)
    }

    fn listens_to(&self, event_type: EventType) -> bool {
        matches!(event_type, EventType::Focus | EventType::Change)
    }

    fn handle_event(&mut self, doc: &Document, event: &DomEvent) {
        match event.event_type {
            EventType::Focus => self.on_focus(doc, event.target),
            EventType::Change => self.on_change(doc, event.target),
        }
    }
}

fn collect_inputs(doc: &Document, node: NodeId, inputs: &mut IndexMap<String, NodeId>) {
    if let Some(tracked) = trackable(doc, node) {
        if let Some(key) = element_key(tracked.element) {
            inputs.insert(key, node);
        }
    }
    for child in doc.children(node) {
        collect_inputs(doc, child, inputs);
    }
}

/// Put one changed entry's original value back onto the live document.
///
/// An identifier that resolves by name is treated as a group: each member
/// returns to its own default-checked state.
fn restore(doc: &mut Document, changed: &ChangedElement) -> Result<(), TrackerError> {
    let restore_err = |reason: String| TrackerError::Restore {
        element_id: changed.element_id.clone(),
        reason,
    };

    let Some(node) = doc.element_by_id(&changed.element_id) else {
        let members = doc.elements_by_name(&changed.element_id);
        return restore_group(doc, &members).map_err(|e| restore_err(e.to_string()));
    };

    let kind = doc
        .control(node)
        .and_then(|c| TrackableKind::parse(&c.kind));
    let original = &changed.original_value;

    let result = match kind {
        Some(TrackableKind::Checkbox) => doc.set_checked(node, original.truthy()),
        Some(TrackableKind::Radio) => {
            // A grouped radio whose id matches its group name still restores
            // the whole group; only a radio without a group holds a flag
            let group = doc
                .element(node)
                .and_then(|el| non_blank(el.name.as_deref()))
                .map(str::to_string);
            match group {
                Some(group) => {
                    let members = doc.elements_by_name(&group);
                    restore_group(doc, &members)
                }
                None => doc.set_checked(node, original.truthy()),
            }
        }
        Some(
            TrackableKind::Text
            | TrackableKind::TextArea
            | TrackableKind::Email
            | TrackableKind::Number
            | TrackableKind::Range
            | TrackableKind::Url
            | TrackableKind::Password
            | TrackableKind::SelectOne,
        )
        | None => doc.set_value(node, &original.to_value_string()),
    };
    result.map_err(|e| restore_err(e.to_string()))
}

/// Return each member to its own default-checked state.
fn restore_group(doc: &mut Document, members: &[NodeId]) -> Result<(), DomError> {
    for member in members {
        let Some(default_checked) = doc.control(*member).map(|c| c.default_checked) else {
            continue;
        };
        doc.set_checked(*member, default_checked)?;
    }
    Ok(())
}
