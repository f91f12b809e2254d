//! Hash implementations for Value
//!
//! [`Value`] cannot implement `Eq` because a NaN double is not equal to
//! itself. `HashableValue` wraps a value and treats all NaNs as equal, which
//! makes it usable as a `HashMap` key or `HashSet` element.

use std::hash::{Hash, Hasher};

use super::Value;
use crate::context::Context;
use crate::convert::{FromValue, ToValue};
use crate::error::ConversionResult;
use crate::number::Number;

/// Wrapper for Value that can be used as a HashMap key
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use nebula_structured::{HashableValue, Value};
///
/// let mut set = HashSet::new();
/// set.insert(HashableValue::new(Value::from(1)));
/// set.insert(HashableValue::new(Value::from(1.0)));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HashableValue(pub Value);

impl HashableValue {
    /// Create a new hashable value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Get the inner value
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Get a reference to the inner value
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Hash for HashableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    value.kind().hash(state);

    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => n.hash(state),
        Value::String(s) => s.hash(state),
        Value::Bytes(b) => b.hash(state),
        Value::Date(d) => d.hash(state),
        Value::Array(arr) => {
            arr.len().hash(state);
            for item in arr {
                hash_value(item, state);
            }
        }
        Value::Object(obj) => {
            // OrdMap iterates in key order, so hashing is deterministic
            obj.len().hash(state);
            for (key, item) in obj {
                key.hash(state);
                hash_value(item, state);
            }
        }
    }
}

impl PartialEq for HashableValue {
    fn eq(&self, other: &Self) -> bool {
        values_equal(&self.0, &other.0)
    }
}

impl Eq for HashableValue {}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(Number::Double(x)), Value::Number(Number::Double(y)))
            if x.is_nan() && y.is_nan() =>
        {
            true
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| values_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|((lk, lv), (rk, rv))| lk == rk && values_equal(lv, rv))
        }
        _ => a == b,
    }
}

impl From<Value> for HashableValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<HashableValue> for Value {
    fn from(value: HashableValue) -> Self {
        value.0
    }
}

impl ToValue for HashableValue {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(self.0.clone())
    }
}

impl FromValue for HashableValue {
    fn from_value_in(value: &Value, _context: &Context) -> ConversionResult<Self> {
        Ok(Self(value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_hashable_value_in_hashmap() {
        let mut map = HashMap::new();
        map.insert(HashableValue(Value::from(42)), "answer");
        map.insert(HashableValue(Value::text("key")), "value");

        assert_eq!(map.get(&HashableValue(Value::from(42u64))), Some(&"answer"));
        assert_eq!(map.get(&HashableValue(Value::from(42.0))), Some(&"answer"));
        assert_eq!(map.get(&HashableValue(Value::text("key"))), Some(&"value"));
    }

    #[test]
    fn test_nan_equals_nan() {
        let a = HashableValue(Value::from(f64::NAN));
        let b = HashableValue(Value::from(f64::NAN));
        assert_eq!(a, b);
    }

    #[test]
    fn test_nested_nan() {
        let a = HashableValue(Value::from(vec![f64::NAN, 1.0]));
        let b = HashableValue(Value::from(vec![f64::NAN, 1.0]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_kinds_differ() {
        assert_ne!(
            HashableValue(Value::from(1)),
            HashableValue(Value::boolean(true))
        );
        assert_ne!(HashableValue(Value::from(1)), HashableValue(Value::text("1")));
    }
}
