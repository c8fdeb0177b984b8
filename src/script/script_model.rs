use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tracker::changed::ChangedElement;

/// A recorded sequence of user interactions against one form, with
/// checkpoints on the tracker's state. Loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Script {
    /// Human-readable name for this script
    pub name: String,

    /// Container id the tracker is initialized on before the first step.
    /// When absent the script must run an `initialize` step itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// (Re)start tracking, optionally on another container
    Initialize {
        #[serde(default)]
        root: Option<String>,
    },

    /// Give a control focus
    Focus { target: String },

    /// Assign a value without committing it
    SetValue { target: String, value: String },

    /// Assign the checked flag without committing it
    SetChecked { target: String, checked: bool },

    /// Pick a select option by its label
    Select { target: String, label: String },

    /// Fire the change event for a control
    Commit { target: String },

    /// Focus, assign a value and commit
    Edit { target: String, value: String },

    /// Focus, assign the checked flag and commit
    Toggle { target: String, checked: bool },

    /// Restore original values and restart tracking
    Reset,

    /// Check the tracker and document state
    Assert { assertions: Vec<Assertion> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// `is_dirty()` equals `expected`
    Dirty { expected: bool },

    /// Number of changed entries
    ChangedCount { expected: usize },

    /// A changed entry with this identifier and these values is present.
    /// Kept raw so a malformed entry is reported, not rejected at load time.
    Changed { entry: Value },

    /// Live value of a control
    Value { target: String, expected: String },

    /// Live checked flag of a control
    Checked { target: String, expected: bool },

    /// Number of trackable controls under the root
    InputCount { expected: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Which step this assertion belongs to (0-indexed)
    pub step_index: usize,

    pub assertion: Assertion,

    pub passed: bool,

    /// Actual value found (for debugging failed assertions)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Outcome of replaying one script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResult {
    pub script_name: String,

    /// Whether every step ran and every assertion passed
    pub passed: bool,

    pub steps_run: usize,

    pub assertion_results: Vec<AssertionResult>,

    /// Changed entries left when the run finished
    pub final_changes: Vec<ChangedElement>,

    /// Set when a step failed to execute
    pub error: Option<String>,
}
