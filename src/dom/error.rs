use std::fmt;

#[derive(Debug)]
pub enum DomError {
    /// Form file could not be read
    Io { path: String, source: std::io::Error },

    /// YAML form description failed to parse
    Yaml { path: String, source: serde_yaml::Error },

    /// JSON form description failed to parse
    Json { path: String, source: serde_json::Error },

    /// A node id that does not belong to this document
    UnknownNode(usize),

    /// Operation needs an element carrying a control
    NotAControl(usize),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::Io { path, source } => {
                write!(f, "Failed to read form '{}': {}", path, source)
            }
            DomError::Yaml { path, source } => {
                write!(f, "YAML parse error in '{}': {}", path, source)
            }
            DomError::Json { path, source } => {
                write!(f, "JSON parse error in '{}': {}", path, source)
            }
            DomError::UnknownNode(index) => {
                write!(f, "Node #{} does not exist in this document", index)
            }
            DomError::NotAControl(index) => {
                write!(f, "Node #{} is not a form control", index)
            }
        }
    }
}

impl std::error::Error for DomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DomError::Io { source, .. } => Some(source),
            DomError::Yaml { source, .. } => Some(source),
            DomError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
