//! Multi-representation numbers
//!
//! A [`Number`] remembers the native representation it was built from
//! (signed, unsigned, binary float or decimal) and offers total projections
//! into each of the others:
//!
//! - integer projections truncate fractional parts and saturate at the
//!   target's range limits (negative values projected to unsigned become `0`)
//! - the boolean projection is partial: only an exact `0` or `1` qualifies
//!
//! Equality across representations holds only when the cross-representation
//! is lossless; see [`equality`](self) for the exact rules.

mod equality;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::ConversionError;
use crate::value::Value;

/// A number in one of four native representations
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer
    Int(i64),
    /// Unsigned 64-bit integer
    UInt(u64),
    /// Binary floating point
    Double(f64),
    /// Arbitrary precision base-10 decimal
    Decimal(Decimal),
}

impl Number {
    // ==================== Accessors ====================

    /// Project to a signed integer, truncating and saturating
    pub fn as_int(&self) -> i64 {
        match *self {
            Self::Int(i) => i,
            Self::UInt(u) => i64::try_from(u).unwrap_or(i64::MAX),
            // `as` saturates and maps NaN to 0
            Self::Double(d) => d as i64,
            Self::Decimal(d) => d.trunc().to_i64().unwrap_or(if d.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            }),
        }
    }

    /// Project to an unsigned integer, truncating and clamping negatives to 0
    pub fn as_uint(&self) -> u64 {
        match *self {
            Self::Int(i) => u64::try_from(i).unwrap_or(0),
            Self::UInt(u) => u,
            Self::Double(d) => d as u64,
            Self::Decimal(d) => {
                if d.is_sign_negative() {
                    0
                } else {
                    d.trunc().to_u64().unwrap_or(u64::MAX)
                }
            }
        }
    }

    /// Project to a binary float
    pub fn as_double(&self) -> f64 {
        match *self {
            Self::Int(i) => i as f64,
            Self::UInt(u) => u as f64,
            Self::Double(d) => d,
            Self::Decimal(d) => d.to_f64().unwrap_or_default(),
        }
    }

    /// Project to a decimal
    ///
    /// Non-finite doubles have no decimal form: NaN projects to zero and the
    /// infinities saturate at the decimal range limits.
    pub fn as_decimal(&self) -> Decimal {
        match *self {
            Self::Int(i) => Decimal::from(i),
            Self::UInt(u) => Decimal::from(u),
            Self::Double(d) => Decimal::from_f64(d).unwrap_or(if d.is_nan() {
                Decimal::ZERO
            } else if d.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }),
            Self::Decimal(d) => d,
        }
    }

    /// Project to a boolean; defined only for an exact `0` or `1`
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Int(0) | Self::UInt(0) => Some(false),
            Self::Int(1) | Self::UInt(1) => Some(true),
            Self::Double(d) if d == 0.0 => Some(false),
            Self::Double(d) if d == 1.0 => Some(true),
            Self::Decimal(d) if d.is_zero() => Some(false),
            Self::Decimal(d) if d == Decimal::ONE => Some(true),
            _ => None,
        }
    }

    // ==================== Parsing ====================

    /// Parse a number from its textual form
    ///
    /// Text containing a `.` parses as a double, text with a leading `-` as a
    /// signed integer, anything else as an unsigned integer. Returns `None`
    /// when the chosen representation rejects the text.
    ///
    /// Exponent forms without a `.` (`"1e-7"`, which is also how very small
    /// or very large doubles render) are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        if text.contains('.') {
            text.parse::<f64>().ok().map(Self::Double)
        } else if text.starts_with('-') {
            text.parse::<i64>().ok().map(Self::Int)
        } else {
            text.parse::<u64>().ok().map(Self::UInt)
        }
    }
}

impl FromStr for Number {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConversionError::unconvertible(&Value::text(s), "number"))
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            // Debug keeps the fractional point on whole doubles ("1.0")
            Self::Double(d) => write!(f, "{d:?}"),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

// ==================== From implementations ====================

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Self::UInt(u64::from(v))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

// pointer-sized integers are at most 64 bits wide on every supported target
impl From<isize> for Number {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<usize> for Number {
    fn from(v: usize) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Self::Double(f64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Decimal> for Number {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_construction_selects_variant() {
        assert!(matches!(Number::from(-3i8), Number::Int(-3)));
        assert!(matches!(Number::from(7u16), Number::UInt(7)));
        assert!(matches!(Number::from(1.5f32), Number::Double(d) if d == 1.5));
        assert!(matches!(Number::from(dec("2.50")), Number::Decimal(_)));
    }

    #[test]
    fn test_construction_keeps_every_width_exact() {
        assert!(matches!(Number::from(i64::MIN), Number::Int(i64::MIN)));
        assert!(matches!(Number::from(i32::MIN), Number::Int(i) if i == i64::from(i32::MIN)));
        assert!(matches!(Number::from(-7isize), Number::Int(-7)));
        assert!(matches!(Number::from(u64::MAX), Number::UInt(u64::MAX)));
        assert!(matches!(Number::from(u8::MAX), Number::UInt(255)));
        assert!(matches!(Number::from(usize::MAX), Number::UInt(u) if u == usize::MAX as u64));
    }

    #[test]
    fn test_as_int_saturates_and_truncates() {
        assert_eq!(Number::UInt(u64::MAX).as_int(), i64::MAX);
        assert_eq!(Number::Double(55.6).as_int(), 55);
        assert_eq!(Number::Double(-55.6).as_int(), -55);
        assert_eq!(Number::Double(1e300).as_int(), i64::MAX);
        assert_eq!(Number::Double(f64::NAN).as_int(), 0);
        assert_eq!(Number::Decimal(dec("-12.9")).as_int(), -12);
        assert_eq!(Number::Decimal(Decimal::MAX).as_int(), i64::MAX);
        assert_eq!(Number::Decimal(Decimal::MIN).as_int(), i64::MIN);
    }

    #[test]
    fn test_as_uint_clamps_negatives() {
        assert_eq!(Number::Int(-1).as_uint(), 0);
        assert_eq!(Number::Int(42).as_uint(), 42);
        assert_eq!(Number::Double(-0.5).as_uint(), 0);
        assert_eq!(Number::Double(55.6).as_uint(), 55);
        assert_eq!(Number::Decimal(dec("-3")).as_uint(), 0);
        assert_eq!(Number::Decimal(dec("3.99")).as_uint(), 3);
        assert_eq!(Number::Decimal(Decimal::MAX).as_uint(), u64::MAX);
    }

    #[test]
    fn test_as_double_and_decimal() {
        assert_eq!(Number::Int(-42).as_double(), -42.0);
        assert_eq!(Number::Decimal(dec("0.25")).as_double(), 0.25);
        assert_eq!(Number::Int(7).as_decimal(), Decimal::from(7));
        assert_eq!(Number::Double(f64::NAN).as_decimal(), Decimal::ZERO);
        assert_eq!(Number::Double(f64::INFINITY).as_decimal(), Decimal::MAX);
        assert_eq!(Number::Double(f64::NEG_INFINITY).as_decimal(), Decimal::MIN);
    }

    #[test]
    fn test_as_bool_only_for_zero_and_one() {
        assert_eq!(Number::Int(1).as_bool(), Some(true));
        assert_eq!(Number::UInt(0).as_bool(), Some(false));
        assert_eq!(Number::Double(1.0).as_bool(), Some(true));
        assert_eq!(Number::Double(0.0).as_bool(), Some(false));
        assert_eq!(Number::Decimal(dec("1.00")).as_bool(), Some(true));
        assert_eq!(Number::Int(2).as_bool(), None);
        assert_eq!(Number::Double(0.5).as_bool(), None);
        assert_eq!(Number::Int(-1).as_bool(), None);
    }

    #[test]
    fn test_parse_rules() {
        assert!(matches!(Number::parse("433.1029"), Some(Number::Double(d)) if d == 433.1029));
        assert!(matches!(Number::parse("-42"), Some(Number::Int(-42))));
        assert!(matches!(Number::parse("400"), Some(Number::UInt(400))));
        assert!(Number::parse("hello").is_none());
        assert!(Number::parse("1.2.3").is_none());
        assert!(Number::parse("-").is_none());
        assert!(Number::parse("1e5").is_none());
        assert!("nope".parse::<Number>().is_err());
    }

    #[test]
    fn test_exponent_renderings_do_not_parse_back() {
        let tiny = Number::Double(1e-7).to_string();
        assert_eq!(tiny, "1e-7");
        assert!(Number::parse(&tiny).is_none());

        let with_point = Number::Double(1.5e-7).to_string();
        assert_eq!(with_point, "1.5e-7");
        assert!(matches!(Number::parse(&with_point), Some(Number::Double(d)) if d == 1.5e-7));
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::Int(-42).to_string(), "-42");
        assert_eq!(Number::UInt(400).to_string(), "400");
        assert_eq!(Number::Double(55.6).to_string(), "55.6");
        assert_eq!(Number::Double(1.0).to_string(), "1.0");
        assert_eq!(Number::Decimal(dec("1.2500")).to_string(), "1.2500");
    }
}
