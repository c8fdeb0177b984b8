use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tracker::{error::TrackerError, value::ControlValue};

/// A control whose committed value differs from its baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedElement {
    pub element_id: String,
    pub original_value: ControlValue,
    pub new_value: ControlValue,
}

impl ChangedElement {
    pub fn new(
        element_id: impl Into<String>,
        original_value: impl Into<ControlValue>,
        new_value: impl Into<ControlValue>,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            original_value: original_value.into(),
            new_value: new_value.into(),
        }
    }
}

impl TryFrom<Value> for ChangedElement {
    type Error = TrackerError;

    /// Accepts only an object carrying `elementId`, `originalValue` and
    /// `newValue`. Numbers are read as their text form.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = &value else {
            return Err(TrackerError::InvalidChangedElement(format!(
                "expected an object, got {}",
                value
            )));
        };

        let field = |name: &str| {
            map.get(name).ok_or_else(|| {
                TrackerError::InvalidChangedElement(format!("missing field '{}'", name))
            })
        };

        let element_id = match field("elementId")? {
            Value::String(s) if !s.trim().is_empty() => s.clone(),
            other => {
                return Err(TrackerError::InvalidChangedElement(format!(
                    "elementId must be a non-empty string, got {}",
                    other
                )));
            }
        };

        Ok(ChangedElement {
            element_id,
            original_value: to_control_value("originalValue", field("originalValue")?)?,
            new_value: to_control_value("newValue", field("newValue")?)?,
        })
    }
}

fn to_control_value(name: &str, value: &Value) -> Result<ControlValue, TrackerError> {
    match value {
        Value::Bool(b) => Ok(ControlValue::Flag(*b)),
        Value::String(s) => Ok(ControlValue::Text(s.clone())),
        Value::Number(n) => Ok(ControlValue::Text(n.to_string())),
        other => Err(TrackerError::InvalidChangedElement(format!(
            "{} must be a string, number or boolean, got {}",
            name, other
        ))),
    }
}

/// Ordered list of changed entries produced by one `changed_elements` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangedElementCollection {
    items: Vec<ChangedElement>,
}

impl ChangedElementCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, changed: ChangedElement) {
        self.items.push(changed);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangedElement> {
        self.items.iter()
    }

    pub fn get(&self, element_id: &str) -> Option<&ChangedElement> {
        self.items.iter().find(|c| c.element_id == element_id)
    }

    pub fn into_vec(self) -> Vec<ChangedElement> {
        self.items
    }
}

impl IntoIterator for ChangedElementCollection {
    type Item = ChangedElement;
    type IntoIter = std::vec::IntoIter<ChangedElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangedElementCollection {
    type Item = &'a ChangedElement;
    type IntoIter = std::slice::Iter<'a, ChangedElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
