//! Conversion error type (standalone)
//!
//! Every failure of the conversion protocol and of the path decode engine is
//! reported as a [`ConversionError`]. Accessors never fail; they return `None`
//! and leave the decision to the caller.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

// ============================================================================
// PATH BOOKKEEPING
// ============================================================================

/// A single step taken while walking a [`Value`] tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key access
    Key(String),
    /// Array index access
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Segments walked from the root, root first.
///
/// Renders the same way paths are written by callers: segments joined by `.`.
/// The empty path renders as `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The empty path, pointing at the root value.
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Whether this path points at the root value.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no segments (same as [`Path::is_root`]).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Append a segment at the deep end.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    fn prepend(&mut self, segments: &[PathSegment]) {
        self.0.splice(0..0, segments.iter().cloned());
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Conversion errors
///
/// All conversion-protocol and decode operations return this error type.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The value could not be consumed as the expected shape
    #[error("unable to convert {} into {expected} at path '{path}'", .input.summary())]
    Unconvertible {
        input: Box<Value>,
        expected: String,
        path: Path,
    },

    /// A required path did not resolve to any value
    #[error("no value found at path '{path}'")]
    NotFound { path: Path },

    /// A native value has no structured representation
    #[error("{type_name} cannot be represented as a value: {reason}")]
    Unrepresentable {
        type_name: &'static str,
        reason: String,
    },

    /// A caller supplied transform rejected the decoded value
    #[error("transform failed at path '{path}': {message}")]
    Transform { message: String, path: Path },
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ConversionError {
    /// Create an unconvertible error for a root-level value
    pub fn unconvertible(input: &Value, expected: impl Into<String>) -> Self {
        Self::Unconvertible {
            input: Box::new(input.clone()),
            expected: expected.into(),
            path: Path::root(),
        }
    }

    /// Create a not found error
    pub fn not_found(path: impl Into<Path>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an unrepresentable error
    pub fn unrepresentable(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::Unrepresentable {
            type_name,
            reason: reason.into(),
        }
    }

    /// Create a transform error
    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform {
            message: message.into(),
            path: Path::root(),
        }
    }

    /// Report the error one object key deeper from the caller's point of view
    pub fn at_key(self, key: impl Into<String>) -> Self {
        self.within(&[PathSegment::Key(key.into())])
    }

    /// Report the error one array index deeper from the caller's point of view
    pub fn at_index(self, index: usize) -> Self {
        self.within(&[PathSegment::Index(index)])
    }

    /// Prefix the recorded path with `outer`, the segments walked before the
    /// failing conversion started
    pub fn at_path(self, outer: &Path) -> Self {
        self.within(outer.segments())
    }

    fn within(mut self, outer: &[PathSegment]) -> Self {
        if let Some(path) = self.path_mut() {
            path.prepend(outer);
        }
        self
    }

    fn path_mut(&mut self) -> Option<&mut Path> {
        match self {
            Self::Unconvertible { path, .. }
            | Self::NotFound { path }
            | Self::Transform { path, .. } => Some(path),
            Self::Unrepresentable { .. } => None,
        }
    }
}

// ============================================================================
// ERROR INSPECTION
// ============================================================================

impl ConversionError {
    /// The path walked when the error was raised, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Unconvertible { path, .. }
            | Self::NotFound { path }
            | Self::Transform { path, .. } => Some(path),
            Self::Unrepresentable { .. } => None,
        }
    }

    /// The offending input, if the error was raised while consuming a value
    pub fn input(&self) -> Option<&Value> {
        match self {
            Self::Unconvertible { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Description of the expected shape, if any
    pub fn expected(&self) -> Option<&str> {
        match self {
            Self::Unconvertible { expected, .. } => Some(expected),
            _ => None,
        }
    }

    /// Whether a required lookup missed
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unconvertible { .. } => "STRUCTURED_UNCONVERTIBLE",
            Self::NotFound { .. } => "STRUCTURED_NOT_FOUND",
            Self::Unrepresentable { .. } => "STRUCTURED_UNREPRESENTABLE",
            Self::Transform { .. } => "STRUCTURED_TRANSFORM_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path: Path = vec![
            PathSegment::from("nest"),
            PathSegment::from("items"),
            PathSegment::from(2),
        ]
        .into();
        assert_eq!(path.to_string(), "nest.items.2");
        assert_eq!(Path::root().to_string(), "<root>");
    }

    #[test]
    fn test_at_index_then_key_is_root_first() {
        let err = ConversionError::unconvertible(&Value::Null, "string")
            .at_index(3)
            .at_key("names");
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("names.3"));
        assert_eq!(err.expected(), Some("string"));
        assert_eq!(err.input(), Some(&Value::Null));
    }

    #[test]
    fn test_at_path_prefixes_lookup() {
        let outer: Path = vec![PathSegment::from("a"), PathSegment::from("b")].into();
        let err = ConversionError::unconvertible(&Value::Null, "bool")
            .at_index(0)
            .at_path(&outer);
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("a.b.0"));
    }

    #[test]
    fn test_unrepresentable_has_no_path() {
        let err = ConversionError::unrepresentable("u128", "too large").at_key("x");
        assert!(err.path().is_none());
        assert_eq!(err.code(), "STRUCTURED_UNREPRESENTABLE");
    }

    #[test]
    fn test_display_mentions_expected_and_path() {
        let err = ConversionError::unconvertible(&Value::text("abc"), "integer").at_key("count");
        let message = err.to_string();
        assert!(message.contains("integer"));
        assert!(message.contains("count"));
        assert!(message.contains("abc"));
    }

    #[test]
    fn test_not_found_code() {
        let err = ConversionError::not_found(Path::root());
        assert!(err.is_not_found());
        assert_eq!(err.code(), "STRUCTURED_NOT_FOUND");
    }
}
