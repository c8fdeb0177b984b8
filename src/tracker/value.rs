use serde::{Deserialize, Serialize};

/// A recorded control value: text for value-bearing controls, a flag for
/// checked state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Flag(bool),
    Text(String),
}

impl ControlValue {
    pub fn text(value: impl Into<String>) -> Self {
        ControlValue::Text(value.into())
    }

    /// Coercive comparison: same-typed values compare exactly, a flag against
    /// text compares both as numbers.
    pub fn loosely_equals(&self, other: &ControlValue) -> bool {
        match (self, other) {
            (ControlValue::Text(a), ControlValue::Text(b)) => a == b,
            (ControlValue::Flag(a), ControlValue::Flag(b)) => a == b,
            (ControlValue::Flag(flag), ControlValue::Text(text))
            | (ControlValue::Text(text), ControlValue::Flag(flag)) => {
                let number = to_number(text);
                let flag = if *flag { 1.0 } else { 0.0 };
                number == flag
            }
        }
    }

    /// Truthiness used when a text value lands on a checked flag.
    pub fn truthy(&self) -> bool {
        match self {
            ControlValue::Flag(b) => *b,
            ControlValue::Text(t) => !t.is_empty(),
        }
    }

    /// String form used when a value is written back as a control value.
    pub fn to_value_string(&self) -> String {
        match self {
            ControlValue::Flag(b) => b.to_string(),
            ControlValue::Text(t) => t.clone(),
        }
    }
}

impl std::fmt::Display for ControlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlValue::Flag(b) => write!(f, "{}", b),
            ControlValue::Text(t) => write!(f, "\"{}\"", t),
        }
    }
}

impl From<bool> for ControlValue {
    fn from(value: bool) -> Self {
        ControlValue::Flag(value)
    }
}

impl From<&str> for ControlValue {
    fn from(value: &str) -> Self {
        ControlValue::Text(value.to_string())
    }
}

impl From<String> for ControlValue {
    fn from(value: String) -> Self {
        ControlValue::Text(value)
    }
}

/// Numeric reading of a string: blank is 0, hex literals are accepted,
/// anything else unparsable is NaN.
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust accepts "inf"/"nan" spellings that do not count as numbers here
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
