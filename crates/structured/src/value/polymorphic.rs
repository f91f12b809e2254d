//! Best-effort projections
//!
//! Unlike the strict `as_*` accessors, the `to_*` family coerces across
//! variants. Every projection is total: `None` means the value has no sensible
//! reading as the requested type, never that something went wrong.
//!
//! | source  | text      | numbers           | bool          | array       | bytes    | date        |
//! |---------|-----------|-------------------|---------------|-------------|----------|-------------|
//! | Null    | -         | -                 | `false`       | -           | -        | -           |
//! | Bool    | "true"    | 1 / 0             | itself        | -           | -        | -           |
//! | Number  | rendered  | coerced           | only 0 / 1    | -           | -        | timestamp   |
//! | String  | itself    | parsed            | known tokens  | parsed JSON | UTF-8    | parsed      |
//! | Bytes   | -         | -                 | -             | -           | itself   | -           |
//! | Date    | formatted | timestamp         | -             | -           | -        | itself      |
//! | Array   | -         | -                 | -             | itself      | -        | -           |
//! | Object  | -         | -                 | -             | -           | -        | -           |
//!
//! `to_object` answers only for objects. Projections that involve dates use
//! the date hooks of a [`Context`]; the plain forms use `Context::default()`.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{Array, Object, Value};
use crate::context::Context;
use crate::number::Number;

const TRUE_TOKENS: [&str; 5] = ["true", "t", "yes", "y", "1"];
const FALSE_TOKENS: [&str; 5] = ["false", "f", "no", "n", "0"];

impl Value {
    /// Whether this is null, or the text `"null"` (any ASCII case)
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.eq_ignore_ascii_case("null"),
            _ => false,
        }
    }

    // ==================== Text ====================

    pub fn to_text(&self) -> Option<String> {
        self.to_text_in(&Context::default())
    }

    /// Render as text; dates use the outgoing formatter
    pub fn to_text_in(&self, context: &Context) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Date(d) => Some(context.date_hooks().format(d)),
            _ => None,
        }
    }

    // ==================== Numbers ====================

    pub fn to_number(&self) -> Option<Number> {
        self.to_number_in(&Context::default())
    }

    /// Project to a [`Number`]; the numeric projections below all go through
    /// this one
    pub fn to_number_in(&self, context: &Context) -> Option<Number> {
        match self {
            Self::String(s) => Number::parse(s),
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(Number::Int(i64::from(*b))),
            Self::Date(d) => Some(context.date_hooks().timestamp_from_date(d)),
            _ => None,
        }
    }

    pub fn to_int(&self) -> Option<i64> {
        self.to_int_in(&Context::default())
    }

    pub fn to_int_in(&self, context: &Context) -> Option<i64> {
        self.to_number_in(context).map(|n| n.as_int())
    }

    pub fn to_uint(&self) -> Option<u64> {
        self.to_uint_in(&Context::default())
    }

    pub fn to_uint_in(&self, context: &Context) -> Option<u64> {
        self.to_number_in(context).map(|n| n.as_uint())
    }

    pub fn to_double(&self) -> Option<f64> {
        self.to_double_in(&Context::default())
    }

    pub fn to_double_in(&self, context: &Context) -> Option<f64> {
        self.to_number_in(context).map(|n| n.as_double())
    }

    pub fn to_float(&self) -> Option<f32> {
        self.to_float_in(&Context::default())
    }

    pub fn to_float_in(&self, context: &Context) -> Option<f32> {
        self.to_double_in(context).map(|d| d as f32)
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        self.to_decimal_in(&Context::default())
    }

    pub fn to_decimal_in(&self, context: &Context) -> Option<Decimal> {
        match self {
            // keep every digit the text carries instead of going through f64
            Self::String(s) if s.contains('.') => s.parse::<Decimal>().ok(),
            _ => self.to_number_in(context).map(|n| n.as_decimal()),
        }
    }

    // ==================== Bool ====================

    /// Project to a boolean
    ///
    /// Numbers qualify only when exactly 0 or 1. Text is matched against
    /// `true/t/yes/y/1` and `false/f/no/n/0`, ignoring ASCII case. Null reads
    /// as `false`.
    pub fn to_boolean(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(n) => n.as_bool(),
            Self::String(s) => parse_bool_token(s),
            Self::Null => Some(false),
            _ => None,
        }
    }

    // ==================== Collections ====================

    /// Project to an array; text is parsed as a JSON document first
    pub fn to_array(&self) -> Option<Array> {
        match self {
            Self::Array(arr) => Some(arr.clone()),
            Self::String(s) => match s.parse::<Value>().ok()? {
                Self::Array(arr) => Some(arr),
                _ => None,
            },
            _ => None,
        }
    }

    /// Project to an object; only objects qualify
    pub fn to_object(&self) -> Option<Object> {
        match self {
            Self::Object(obj) => Some(obj.clone()),
            _ => None,
        }
    }

    // ==================== Bytes ====================

    /// Project to bytes; text yields its UTF-8 encoding
    pub fn to_bytes(&self) -> Option<Bytes> {
        match self {
            Self::Bytes(b) => Some(b.clone()),
            Self::String(s) => Some(Bytes::copy_from_slice(s.as_bytes())),
            _ => None,
        }
    }

    // ==================== Date ====================

    pub fn to_date(&self) -> Option<DateTime<Utc>> {
        self.to_date_in(&Context::default())
    }

    /// Project to a date through the context's date hooks
    pub fn to_date_in(&self, context: &Context) -> Option<DateTime<Utc>> {
        match self {
            Self::String(s) => context.date_hooks().parse(s),
            Self::Number(n) => context.date_hooks().date_from_timestamp(n),
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

fn parse_bool_token(text: &str) -> Option<bool> {
    if TRUE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Some(false)
    } else {
        None
    }
}
