//! Conversion between [`Value`] and `serde_json::Value`
//!
//! JSON has no bytes, date or decimal type; on the way out bytes become
//! base64 text, dates are formatted by the context's date hooks and
//! decimals keep their full precision as text.

use std::str::FromStr;

use base64::Engine;

use super::Value;
use crate::context::Context;
use crate::error::ConversionError;
use crate::number::Number;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(number_from_json(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect(),
        }
    }
}

fn number_from_json(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Int(i)
    } else if let Some(u) = n.as_u64() {
        Number::UInt(u)
    } else {
        Number::Double(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl Value {
    /// Convert into a `serde_json::Value` using the default context
    pub fn to_json(&self) -> serde_json::Value {
        self.to_json_in(&Context::default())
    }

    /// Convert into a `serde_json::Value`, formatting dates with the
    /// context's outgoing date formatter
    pub fn to_json_in(&self, context: &Context) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(Number::Int(i)) => serde_json::Value::from(*i),
            Value::Number(Number::UInt(u)) => serde_json::Value::from(*u),
            Value::Number(Number::Double(d)) => serde_json::Number::from_f64(*d)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Number(Number::Decimal(d)) => serde_json::Value::String(d.to_string()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(
                base64::engine::general_purpose::STANDARD.encode(b),
            ),
            Value::Date(d) => serde_json::Value::String(context.date_hooks().format(d)),
            Value::Array(arr) => {
                let mut vec = Vec::with_capacity(arr.len());
                vec.extend(arr.iter().map(|v| v.to_json_in(context)));
                serde_json::Value::Array(vec)
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_in(context)))
                    .collect(),
            ),
        }
    }
}

impl FromStr for Value {
    type Err = ConversionError;

    /// Parse a Value from a JSON document
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<serde_json::Value>(s)
            .map(Value::from)
            .map_err(|e| ConversionError::unconvertible(&Value::text(s), format!("JSON document ({e})")))
    }
}
