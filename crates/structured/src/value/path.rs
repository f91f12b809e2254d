//! Path-based access for Value
//!
//! Paths are dotted: `nest.ed.hello`. Against an object every segment is a
//! key; against an array a segment that parses as an unsigned integer is an
//! index. The empty path points at the root value itself.
//!
//! Lookup is iterative. Indexing an array with a non-numeric key resolves to
//! `None` instead of reinterpreting the array as keyed data.

use tracing::trace;

use crate::error::{ConversionError, ConversionResult, Path, PathSegment};
use crate::value::Value;

/// Maximum number of path segments allowed (DoS protection)
pub const MAX_PATH_SEGMENTS: usize = 100;

impl Value {
    // ==================== Path-based Access ====================

    /// Resolve a dotted path, e.g. `"user.addresses.0.city"`
    ///
    /// Returns `None` when any segment is absent, when the path walks into a
    /// scalar, or when the path is longer than [`MAX_PATH_SEGMENTS`].
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let segments = parse_path(path).ok()?;
        self.lookup_segments(&segments)
    }

    /// Resolve already parsed path segments
    pub fn lookup_segments(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for segment in path.segments() {
            match step(current, segment) {
                Some(next) => current = next,
                None => {
                    trace!(path = %path, missing = %segment, "path segment not found");
                    return None;
                }
            }
        }
        Some(current)
    }

    /// Check if path exists
    pub fn has_path(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    // ==================== Convenience Methods ====================

    /// Get value from object by key (if this is an object)
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            _ => None,
        }
    }

    /// Get value from array by index (if this is an array)
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Subscript by a single key
    ///
    /// Objects are indexed by key. Arrays accept only keys that parse as an
    /// unsigned integer; any other key yields `None`.
    pub fn index(&self, key: &str) -> Option<&Value> {
        step(self, &PathSegment::Key(key.to_owned()))
    }
}

fn step<'a>(value: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Object(obj), PathSegment::Key(key)) => obj.get(key.as_str()),
        (Value::Object(obj), PathSegment::Index(index)) => obj.get(index.to_string().as_str()),
        (Value::Array(arr), PathSegment::Index(index)) => arr.get(*index),
        (Value::Array(arr), PathSegment::Key(key)) => {
            key.parse::<usize>().ok().and_then(|index| arr.get(index))
        }
        _ => None,
    }
}

/// Parse a dotted path into segments
///
/// Examples:
/// - `""` -> root
/// - `"user.name"` -> [Key("user"), Key("name")]
/// - `"items.0"` -> [Key("items"), Key("0")]
///
/// Empty segments (`"a..b"`, leading or trailing dots) are skipped.
pub(crate) fn parse_path(path: &str) -> ConversionResult<Path> {
    let mut segments = Path::root();
    for part in path.split('.').filter(|part| !part.is_empty()) {
        segments.push(part);
        if segments.len() > MAX_PATH_SEGMENTS {
            return Err(ConversionError::unconvertible(
                &Value::text(path),
                format!("path of at most {MAX_PATH_SEGMENTS} segments"),
            ));
        }
    }
    Ok(segments)
}
