//! Conversion protocol for optional values and collections
//!
//! Collections consume only their matching variant: sequences and sets need
//! an array, maps need an object. The first element that fails aborts the
//! whole conversion and the error carries the element's index or key.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use super::{FromValue, ToValue};
use crate::context::Context;
use crate::error::{ConversionError, ConversionResult};
use crate::value::{Array, Object, Value};

// ==================== Option ====================

impl<T: ToValue> ToValue for Option<T> {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        match self {
            Some(inner) => inner.to_value_in(context),
            None => Ok(Value::Null),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    /// Null and the `"null"` text both read as `None`
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_value_in(value, context).map(Some)
    }
}

// ==================== Sequences ====================

fn produce_array<'a, T, I>(items: I, context: &Context) -> ConversionResult<Value>
where
    T: ToValue + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| item.to_value_in(context).map_err(|e| e.at_index(i)))
        .collect::<ConversionResult<Array>>()
        .map(Value::Array)
}

/// Consume every element of an array value into `C`
pub(crate) fn consume_array<T, C>(value: &Value, context: &Context) -> ConversionResult<C>
where
    T: FromValue,
    C: FromIterator<T>,
{
    let Value::Array(items) = value else {
        return Err(ConversionError::unconvertible(value, "array"));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| T::from_value_in(item, context).map_err(|e| e.at_index(i)))
        .collect()
}

impl<T: ToValue> ToValue for [T] {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        produce_array(self, context)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        produce_array(self, context)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        consume_array(value, context)
    }
}

impl<T: ToValue + Clone> ToValue for im::Vector<T> {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        produce_array(self, context)
    }
}

impl<T: FromValue + Clone> FromValue for im::Vector<T> {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        consume_array(value, context)
    }
}

// ==================== Sets ====================

impl<T: ToValue> ToValue for HashSet<T> {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        produce_array(self, context)
    }
}

impl<T: FromValue + Eq + Hash> FromValue for HashSet<T> {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        consume_array(value, context)
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        produce_array(self, context)
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        consume_array(value, context)
    }
}

// ==================== Maps ====================

fn produce_object<'a, T, I>(entries: I, context: &Context) -> ConversionResult<Value>
where
    T: ToValue + 'a,
    I: IntoIterator<Item = (&'a String, &'a T)>,
{
    entries
        .into_iter()
        .map(|(key, item)| {
            item.to_value_in(context)
                .map(|v| (key.clone(), v))
                .map_err(|e| e.at_key(key.as_str()))
        })
        .collect::<ConversionResult<Object>>()
        .map(Value::Object)
}

/// Consume every entry of an object value into `C`; keys pass through
pub(crate) fn consume_object<T, C>(value: &Value, context: &Context) -> ConversionResult<C>
where
    T: FromValue,
    C: FromIterator<(String, T)>,
{
    let Value::Object(entries) = value else {
        return Err(ConversionError::unconvertible(value, "object"));
    };
    entries
        .iter()
        .map(|(key, item)| {
            T::from_value_in(item, context)
                .map(|v| (key.clone(), v))
                .map_err(|e| e.at_key(key.as_str()))
        })
        .collect()
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        produce_object(self, context)
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        consume_object(value, context)
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        produce_object(self, context)
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        consume_object(value, context)
    }
}
