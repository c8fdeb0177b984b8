use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::tracker::value::ControlValue;

/// One line of the JSONL trace written while a tracker runs.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    /// What happened (`initialized`, `baseline_captured`, ...)
    pub event: String,

    pub root_id: Option<String>,
    pub element_id: Option<String>,
    pub kind: Option<String>,

    pub value: Option<String>,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, event: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            step,
            event: event.to_string(),
            root_id: None,
            element_id: None,
            kind: None,
            value: None,
            detail: None,
        }
    }

    pub fn with_root(mut self, root_id: &str) -> Self {
        self.root_id = Some(root_id.to_string());
        self
    }

    pub fn with_element(mut self, element_id: &str) -> Self {
        self.element_id = Some(element_id.to_string());
        self
    }

    pub fn with_kind(mut self, kind: impl ToString) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn with_value(mut self, value: &ControlValue) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
