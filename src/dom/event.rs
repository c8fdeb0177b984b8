use serde::Serialize;

use crate::dom::{document::Document, dom_model::NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Control gained focus
    Focus,
    /// Control committed a new value
    Change,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: EventType,
    pub target: NodeId,
}

impl DomEvent {
    pub fn focus(target: NodeId) -> Self {
        Self {
            event_type: EventType::Focus,
            target,
        }
    }

    pub fn change(target: NodeId) -> Self {
        Self {
            event_type: EventType::Change,
            target,
        }
    }
}

/// A capturing listener registered on a subtree root.
///
/// `Document::dispatch` delivers an event to the listener when its capture
/// root lies on the path from the document root down to the event target.
pub trait EventListener {
    /// Subtree root this listener captures on, `None` while detached.
    fn capture_root(&self, doc: &Document) -> Option<NodeId>;

    /// Event types this listener subscribed to.
    fn listens_to(&self, event_type: EventType) -> bool;

    fn handle_event(&mut self, doc: &Document, event: &DomEvent);
}
