//! The conversion protocol
//!
//! A type joins the protocol by implementing one or both halves:
//!
//! - [`ToValue`] produces a [`Value`]. It fails only when the native value
//!   has no structured form (a `u128` beyond every numeric range, say).
//! - [`FromValue`] consumes a [`Value`]. It fails with
//!   [`ConversionError::Unconvertible`](crate::ConversionError::Unconvertible)
//!   naming the value received and the shape that was expected.
//!
//! [`convert`] chains the two, turning any producer into any consumer.
//!
//! ```
//! use nebula_structured::{convert, Context};
//!
//! let n: i64 = convert("42", &Context::default()).unwrap();
//! assert_eq!(n, 42);
//! ```

mod collections;
mod scalar;

use crate::context::Context;
use crate::error::ConversionResult;
use crate::value::Value;

/// Produce a [`Value`] from a native value
pub trait ToValue {
    /// Produce a value, rendering dates with the given context's hooks
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value>;

    /// Produce a value with the default context
    fn to_value(&self) -> ConversionResult<Value> {
        self.to_value_in(&Context::default())
    }

    /// Convert into any consumer through an intermediate value
    fn converted<U: FromValue>(&self) -> ConversionResult<U> {
        convert(self, &Context::default())
    }
}

/// Construct a native value from a [`Value`]
pub trait FromValue: Sized {
    /// Consume a value, reading dates with the given context's hooks
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self>;

    /// Consume a value with the default context
    fn from_value(value: &Value) -> ConversionResult<Self> {
        Self::from_value_in(value, &Context::default())
    }
}

/// Convert between any producer and any consumer
///
/// Both halves see the same context, so a custom date formatter on the way
/// out is matched by the same hooks on the way in.
pub fn convert<T, U>(input: &T, context: &Context) -> ConversionResult<U>
where
    T: ToValue + ?Sized,
    U: FromValue,
{
    let value = input.to_value_in(context)?;
    U::from_value_in(&value, context)
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        (**self).to_value_in(context)
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value_in(&self, context: &Context) -> ConversionResult<Value> {
        (**self).to_value_in(context)
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        T::from_value_in(value, context).map(Box::new)
    }
}

impl ToValue for Value {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(self.clone())
    }
}

impl FromValue for Value {
    fn from_value_in(value: &Value, _context: &Context) -> ConversionResult<Self> {
        Ok(value.clone())
    }
}
