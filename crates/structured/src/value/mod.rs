//! The structured value
//!
//! [`Value`] is the neutral interchange representation between native types
//! and format encoders. It is a closed tagged union; collections are
//! persistent (`im`) so deriving a new value from an old one shares
//! structure instead of copying it, and values are never mutated in place.

mod display;
mod hash;
mod json;
mod kind;
pub mod path;
mod polymorphic;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::number::Number;

pub use hash::HashableValue;
pub use kind::ValueKind;

/// Ordered sequence of values
pub type Array = im::Vector<Value>;

/// Mapping from string keys to values; iteration order is by key
pub type Object = im::OrdMap<String, Value>;

/// Unified value type that can represent any structured data
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null/None value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Number in its native representation
    Number(Number),

    /// UTF-8 text string
    String(String),

    /// Binary data
    Bytes(Bytes),

    /// Instant in time (UTC)
    Date(DateTime<Utc>),

    /// Array of values
    Array(Array),

    /// Object (key-value map)
    Object(Object),
}

impl Value {
    // ==================== Constructors ====================

    /// Create a null value
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create a boolean value
    pub const fn boolean(v: bool) -> Self {
        Self::Bool(v)
    }

    /// Create a number value from any native numeric
    pub fn number(v: impl Into<Number>) -> Self {
        Self::Number(v.into())
    }

    /// Create a text value from String or &str
    pub fn text(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    /// Create a bytes value
    pub fn bytes(v: impl Into<Bytes>) -> Self {
        Self::Bytes(v.into())
    }

    /// Create a date value
    pub const fn date(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }

    /// Create an array value
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Create an object value
    pub fn object<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Value>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create an empty array value
    pub fn array_empty() -> Self {
        Self::Array(Array::new())
    }

    /// Create an empty object value
    pub fn object_empty() -> Self {
        Self::Object(Object::new())
    }

    // ==================== Type queries ====================

    /// Get the kind of this value
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Date(_) => ValueKind::Date,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
        }
    }

    /// Check if this is a number
    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Check if this is text
    #[inline]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Check if this is an array
    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Check if this is an object
    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    // ==================== Strict accessors (as_*) ====================
    //
    // These never coerce: they answer only for the matching variant.
    // The coercing projections live in `polymorphic`.

    /// Try to get as boolean
    #[inline]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as number
    #[inline]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Try to get as string slice
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as bytes reference
    #[inline]
    pub const fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as date
    #[inline]
    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Try to get as array reference
    #[inline]
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object reference
    #[inline]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

// ==================== From implementations ====================

macro_rules! impl_from_numeric {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Number(Number::from(v))
                }
            }
        )*
    };
}

impl_from_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Decimal);

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, T: Into<Value>> From<std::collections::HashMap<K, T>> for Value {
    fn from(v: std::collections::HashMap<K, T>) -> Self {
        Self::object(v)
    }
}

impl<K: Into<String>, T: Into<Value>> From<std::collections::BTreeMap<K, T>> for Value {
    fn from(v: std::collections::BTreeMap<K, T>) -> Self {
        Self::object(v)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().collect())
    }
}
