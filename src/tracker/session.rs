use indexmap::IndexMap;

use crate::{dom::dom_model::NodeId, tracker::value::ControlValue};

/// State of one tracking session, from `initialize` to the next
/// `initialize` or `reset`.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    pub root_id: String,
    pub root: NodeId,

    /// Original value per identifier, written once
    pub baselines: IndexMap<String, ControlValue>,

    /// Latest committed value per identifier, in first-commit order
    pub current: IndexMap<String, ControlValue>,
}

impl TrackingSession {
    pub fn new(root_id: &str, root: NodeId) -> Self {
        Self {
            root_id: root_id.to_string(),
            root,
            baselines: IndexMap::new(),
            current: IndexMap::new(),
        }
    }

    pub fn has_baseline(&self, key: &str) -> bool {
        self.baselines.contains_key(key)
    }

    /// Store a baseline unless one already exists. Returns whether it was stored.
    pub fn capture_baseline(&mut self, key: &str, value: ControlValue) -> bool {
        if self.has_baseline(key) {
            return false;
        }
        self.baselines.insert(key.to_string(), value);
        true
    }

    /// Record a committed value. Keys without a baseline are refused so that
    /// every recorded key has an original to compare against.
    pub fn record(&mut self, key: &str, value: ControlValue) -> bool {
        if !self.has_baseline(key) {
            return false;
        }
        self.current.insert(key.to_string(), value);
        true
    }

    /// Recorded entries that differ from their baseline, in recording order.
    pub fn differing(&self) -> impl Iterator<Item = (&String, &ControlValue, &ControlValue)> {
        self.current.iter().filter_map(|(key, new_value)| {
            let original = self.baselines.get(key)?;
            (!original.loosely_equals(new_value)).then_some((key, original, new_value))
        })
    }
}
