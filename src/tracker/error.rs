use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// `initialize` received a root identifier it cannot track
    InvalidArgument(String),

    /// An operation that needs a tracking session ran before `initialize`
    NotInitialized,

    /// A value offered as a changed entry lacks the entry's shape
    InvalidChangedElement(String),

    /// Reset could not write a value back onto the document
    Restore { element_id: String, reason: String },
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::InvalidArgument(msg) => {
                write!(f, "Invalid root element id: {}", msg)
            }
            TrackerError::NotInitialized => {
                write!(f, "Document has not been initialized.")
            }
            TrackerError::InvalidChangedElement(msg) => {
                write!(f, "changedElement must be a changed element entry: {}", msg)
            }
            TrackerError::Restore { element_id, reason } => {
                write!(f, "Failed to restore '{}': {}", element_id, reason)
            }
        }
    }
}

impl std::error::Error for TrackerError {}
