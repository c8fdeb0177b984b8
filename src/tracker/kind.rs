use serde::Serialize;

/// Closed set of control kinds the tracker follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackableKind {
    Text,
    TextArea,
    Email,
    Number,
    Range,
    Url,
    Password,
    Checkbox,
    Radio,
    SelectOne,
}

impl TrackableKind {
    /// Parse a declared control kind, ignoring case. Anything outside the
    /// allow-list is `None`.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "textarea" => Some(Self::TextArea),
            "email" => Some(Self::Email),
            "number" => Some(Self::Number),
            "range" => Some(Self::Range),
            "url" => Some(Self::Url),
            "password" => Some(Self::Password),
            "checkbox" => Some(Self::Checkbox),
            "radio" => Some(Self::Radio),
            "select-one" => Some(Self::SelectOne),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Email => "email",
            Self::Number => "number",
            Self::Range => "range",
            Self::Url => "url",
            Self::Password => "password",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::SelectOne => "select-one",
        }
    }
}

impl std::fmt::Display for TrackableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
