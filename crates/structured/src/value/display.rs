//! Display implementations for Value
//!
//! Human-readable formatting, plus the short summaries used in error messages.

use std::fmt;

use base64::Engine;
use chrono::SecondsFormat;

use super::Value;

/// Longest rendering kept in an error summary before it is cut
const SUMMARY_LIMIT: usize = 64;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Bytes(b) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(b);
                write!(f, "Bytes({encoded})")
            }
            Value::Date(d) => write!(f, "{}", d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(obj) => {
                write!(f, "{{")?;
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Value {
    /// Kind plus a truncated rendering, e.g. `string "hello"`
    pub fn summary(&self) -> String {
        let rendered = match self {
            Value::Null => return "null".to_owned(),
            Value::String(s) => format!("{s:?}"),
            other => other.to_string(),
        };
        if rendered.chars().count() > SUMMARY_LIMIT {
            let cut: String = rendered.chars().take(SUMMARY_LIMIT).collect();
            format!("{} {cut}...", self.kind())
        } else {
            format!("{} {rendered}", self.kind())
        }
    }
}
