use std::fmt;

use crate::{dom::error::DomError, tracker::error::TrackerError};

#[derive(Debug)]
pub enum ScriptError {
    /// Script file could not be read
    Io { path: String, source: std::io::Error },

    /// Script YAML failed to parse
    Parse { path: String, source: serde_yaml::Error },

    /// No element answers to the step's target
    TargetNotFound(String),

    /// Select step named a label the control does not offer
    OptionNotFound { target: String, label: String },

    Tracker(TrackerError),

    Dom(DomError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io { path, source } => {
                write!(f, "Failed to read script '{}': {}", path, source)
            }
            ScriptError::Parse { path, source } => {
                write!(f, "Invalid script '{}': {}", path, source)
            }
            ScriptError::TargetNotFound(target) => {
                write!(f, "No element with id or name '{}'", target)
            }
            ScriptError::OptionNotFound { target, label } => {
                write!(f, "'{}' has no option labelled '{}'", target, label)
            }
            ScriptError::Tracker(e) => write!(f, "{}", e),
            ScriptError::Dom(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io { source, .. } => Some(source),
            ScriptError::Parse { source, .. } => Some(source),
            ScriptError::Tracker(e) => Some(e),
            ScriptError::Dom(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TrackerError> for ScriptError {
    fn from(e: TrackerError) -> Self {
        ScriptError::Tracker(e)
    }
}

impl From<DomError> for ScriptError {
    fn from(e: DomError) -> Self {
        ScriptError::Dom(e)
    }
}
