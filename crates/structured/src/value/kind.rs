//! Value kinds
//!
//! `ValueKind` is a lightweight classification for [`Value`](super::Value),
//! used in error messages and for cheap dispatch.

use core::fmt::{Display, Formatter};

/// Represents the kind/type of a Value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Bytes,
    Date,
    Array,
    Object,
}

impl ValueKind {
    /// Get a descriptive name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_kind_names_render_in_messages() {
        assert_eq!(ValueKind::Object.to_string(), "object");
        assert_eq!(Value::from(vec![1]).kind().name(), "array");
        assert_eq!(Value::text("x").summary(), "string \"x\"");
    }
}
