//! Conversion protocol for scalar types

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use super::{FromValue, ToValue};
use crate::context::Context;
use crate::error::{ConversionError, ConversionResult};
use crate::number::Number;
use crate::value::Value;

// ==================== Bool ====================

impl ToValue for bool {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::Bool(*self))
    }
}

impl FromValue for bool {
    fn from_value_in(value: &Value, _context: &Context) -> ConversionResult<Self> {
        // the accessor reads null as false, consuming does not
        if matches!(value, Value::Null) {
            return Err(ConversionError::unconvertible(value, "bool"));
        }
        value
            .to_boolean()
            .ok_or_else(|| ConversionError::unconvertible(value, "bool"))
    }
}

// ==================== Integers ====================

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
                    Ok(Value::from(*self))
                }
            }

            impl FromValue for $t {
                fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
                    let wide = value
                        .to_int_in(context)
                        .ok_or_else(|| ConversionError::unconvertible(value, stringify!($t)))?;
                    Ok(<$t>::try_from(wide).unwrap_or(if wide < 0 { <$t>::MIN } else { <$t>::MAX }))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
                    Ok(Value::from(*self))
                }
            }

            impl FromValue for $t {
                fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
                    let wide = value
                        .to_uint_in(context)
                        .ok_or_else(|| ConversionError::unconvertible(value, stringify!($t)))?;
                    Ok(<$t>::try_from(wide).unwrap_or(<$t>::MAX))
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl ToValue for i128 {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        if let Ok(i) = i64::try_from(*self) {
            return Ok(Value::Number(Number::Int(i)));
        }
        if let Ok(u) = u64::try_from(*self) {
            return Ok(Value::Number(Number::UInt(u)));
        }
        Decimal::try_from_i128_with_scale(*self, 0)
            .map(|d| Value::Number(Number::Decimal(d)))
            .map_err(|_| {
                ConversionError::unrepresentable("i128", format!("{self} is outside the decimal range"))
            })
    }
}

impl FromValue for i128 {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        let number = value
            .to_number_in(context)
            .ok_or_else(|| ConversionError::unconvertible(value, "i128"))?;
        Ok(match number {
            Number::Int(i) => i128::from(i),
            Number::UInt(u) => i128::from(u),
            Number::Double(d) => d as i128,
            Number::Decimal(d) => d.trunc().to_i128().unwrap_or_default(),
        })
    }
}

impl ToValue for u128 {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        if let Ok(u) = u64::try_from(*self) {
            return Ok(Value::Number(Number::UInt(u)));
        }
        i128::try_from(*self)
            .ok()
            .and_then(|i| Decimal::try_from_i128_with_scale(i, 0).ok())
            .map(|d| Value::Number(Number::Decimal(d)))
            .ok_or_else(|| {
                ConversionError::unrepresentable("u128", format!("{self} is outside the decimal range"))
            })
    }
}

impl FromValue for u128 {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        let number = value
            .to_number_in(context)
            .ok_or_else(|| ConversionError::unconvertible(value, "u128"))?;
        Ok(match number {
            Number::Int(i) => u128::try_from(i).unwrap_or(0),
            Number::UInt(u) => u128::from(u),
            Number::Double(d) => d as u128,
            Number::Decimal(d) => d.trunc().to_u128().unwrap_or_default(),
        })
    }
}

// ==================== Floats and decimals ====================

impl ToValue for f64 {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::from(*self))
    }
}

impl FromValue for f64 {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        value
            .to_double_in(context)
            .ok_or_else(|| ConversionError::unconvertible(value, "f64"))
    }
}

impl ToValue for f32 {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::from(*self))
    }
}

impl FromValue for f32 {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        value
            .to_float_in(context)
            .ok_or_else(|| ConversionError::unconvertible(value, "f32"))
    }
}

impl ToValue for Decimal {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::from(*self))
    }
}

impl FromValue for Decimal {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        value
            .to_decimal_in(context)
            .ok_or_else(|| ConversionError::unconvertible(value, "decimal"))
    }
}

impl ToValue for Number {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::Number(*self))
    }
}

impl FromValue for Number {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        value
            .to_number_in(context)
            .ok_or_else(|| ConversionError::unconvertible(value, "number"))
    }
}

// ==================== Text and bytes ====================

impl ToValue for str {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::text(self))
    }
}

impl ToValue for String {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl FromValue for String {
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        value
            .to_text_in(context)
            .ok_or_else(|| ConversionError::unconvertible(value, "string"))
    }
}

impl ToValue for Bytes {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::Bytes(self.clone()))
    }
}

impl FromValue for Bytes {
    fn from_value_in(value: &Value, _context: &Context) -> ConversionResult<Self> {
        value
            .to_bytes()
            .ok_or_else(|| ConversionError::unconvertible(value, "bytes"))
    }
}

// ==================== Dates ====================

impl ToValue for DateTime<Utc> {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::Date(*self))
    }
}

impl FromValue for DateTime<Utc> {
    /// Dates pass through, numbers go through the incoming timestamp hook and
    /// text is tried against each parse strategy in order
    fn from_value_in(value: &Value, context: &Context) -> ConversionResult<Self> {
        let hooks = context.date_hooks();
        let date = match value {
            Value::Date(d) => Some(*d),
            Value::Number(n) => hooks.date_from_timestamp(n),
            Value::String(s) => hooks.parse(s),
            _ => None,
        };
        date.ok_or_else(|| {
            ConversionError::unconvertible(value, "date, formatted time string, or timestamp")
        })
    }
}

// ==================== Identifiers ====================

impl ToValue for Uuid {
    fn to_value_in(&self, _context: &Context) -> ConversionResult<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl FromValue for Uuid {
    fn from_value_in(value: &Value, _context: &Context) -> ConversionResult<Self> {
        value
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| ConversionError::unconvertible(value, "UUID string"))
    }
}
