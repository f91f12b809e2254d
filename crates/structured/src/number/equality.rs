//! Cross-representation equality and hashing for [`Number`]
//!
//! Two numbers in different representations are equal only when one converts
//! into the other without loss:
//!
//! - `Int`/`UInt`: the signed side is non-negative and the magnitudes match
//! - integer vs `Double`: the double has no fractional remainder, lies inside
//!   the integer's range and truncates to the same integer
//! - integer vs `Decimal`: the decimal is integral (and non-negative against
//!   `UInt`) and converts to the same integer
//! - `Double` vs `Decimal`: the decimal's binary projection equals the double
//!
//! Every mixed arm is written once as an or-pattern covering both operand
//! orders, so `a == b` and `b == a` always take the same branch.

use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::Number;

/// -2^63, the smallest double inside `i64` range
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
/// 2^63, the smallest double above `i64` range
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
/// 2^64, the smallest double above `u64` range
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(l), Number::Int(r)) => l == r,
            (Number::UInt(l), Number::UInt(r)) => l == r,
            (Number::Double(l), Number::Double(r)) => l == r,
            (Number::Decimal(l), Number::Decimal(r)) => l == r,

            (Number::Int(i), Number::UInt(u)) | (Number::UInt(u), Number::Int(i)) => {
                int_eq_uint(i, u)
            }
            (Number::Int(i), Number::Double(d)) | (Number::Double(d), Number::Int(i)) => {
                int_eq_double(i, d)
            }
            (Number::Int(i), Number::Decimal(d)) | (Number::Decimal(d), Number::Int(i)) => {
                int_eq_decimal(i, d)
            }
            (Number::UInt(u), Number::Double(d)) | (Number::Double(d), Number::UInt(u)) => {
                uint_eq_double(u, d)
            }
            (Number::UInt(u), Number::Decimal(d)) | (Number::Decimal(d), Number::UInt(u)) => {
                uint_eq_decimal(u, d)
            }
            (Number::Double(f), Number::Decimal(d)) | (Number::Decimal(d), Number::Double(f)) => {
                d.to_f64() == Some(f)
            }
        }
    }
}

fn int_eq_uint(i: i64, u: u64) -> bool {
    u64::try_from(i).is_ok_and(|i| i == u)
}

fn int_eq_double(i: i64, d: f64) -> bool {
    d.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&d) && d as i64 == i
}

fn uint_eq_double(u: u64, d: f64) -> bool {
    d.fract() == 0.0 && (0.0..U64_UPPER).contains(&d) && d as u64 == u
}

fn int_eq_decimal(i: i64, d: Decimal) -> bool {
    d.fract().is_zero() && d.to_i64() == Some(i)
}

fn uint_eq_decimal(u: u64, d: Decimal) -> bool {
    d >= Decimal::ZERO && d.fract().is_zero() && d.to_u64() == Some(u)
}

/// Hashes the binary projection, which every equal pair shares.
///
/// NaN hashes to a single bucket and `-0.0` shares the bucket of `0.0`.
impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let d = self.as_double();
        let bits = if d.is_nan() {
            f64::NAN.to_bits()
        } else if d == 0.0 {
            0.0f64.to_bits()
        } else {
            d.to_bits()
        };
        bits.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn hash_of(n: &Number) -> u64 {
        let mut hasher = DefaultHasher::new();
        n.hash(&mut hasher);
        hasher.finish()
    }

    fn assert_symmetric(a: Number, b: Number, expected: bool) {
        assert_eq!(a == b, expected, "{a:?} == {b:?}");
        assert_eq!(b == a, expected, "{b:?} == {a:?}");
    }

    #[test]
    fn test_int_uint() {
        assert_symmetric(Number::Int(5), Number::UInt(5), true);
        assert_symmetric(Number::Int(-5), Number::UInt(5), false);
        assert_symmetric(Number::Int(i64::MAX), Number::UInt(i64::MAX as u64), true);
        assert_symmetric(Number::Int(i64::MAX), Number::UInt(u64::MAX), false);
    }

    #[test]
    fn test_int_double() {
        assert_symmetric(Number::Int(3), Number::Double(3.0), true);
        assert_symmetric(Number::Int(3), Number::Double(3.5), false);
        assert_symmetric(Number::Int(i64::MAX), Number::Double(1e19), false);
        assert_symmetric(Number::Int(0), Number::Double(f64::NAN), false);
        assert_symmetric(Number::Int(0), Number::Double(-0.0), true);
    }

    #[test]
    fn test_uint_double() {
        assert_symmetric(Number::UInt(3), Number::Double(3.0), true);
        assert_symmetric(Number::UInt(0), Number::Double(-1.0), false);
        assert_symmetric(Number::UInt(u64::MAX), Number::Double(f64::INFINITY), false);
    }

    #[test]
    fn test_integers_against_decimal() {
        assert_symmetric(Number::Int(-12), Number::Decimal(dec("-12")), true);
        assert_symmetric(Number::Int(12), Number::Decimal(dec("12.00")), true);
        assert_symmetric(Number::Int(12), Number::Decimal(dec("12.5")), false);
        assert_symmetric(Number::UInt(12), Number::Decimal(dec("12")), true);
        assert_symmetric(Number::UInt(12), Number::Decimal(dec("-12")), false);
    }

    #[test]
    fn test_double_decimal() {
        assert_symmetric(Number::Double(0.25), Number::Decimal(dec("0.25")), true);
        assert_symmetric(Number::Double(0.25), Number::Decimal(dec("0.26")), false);
    }

    #[test]
    fn test_same_variant() {
        assert_symmetric(Number::Double(f64::NAN), Number::Double(f64::NAN), false);
        assert_symmetric(Number::Decimal(dec("1.0")), Number::Decimal(dec("1")), true);
    }

    #[test]
    fn test_equal_numbers_hash_equal() {
        let pairs = [
            (Number::Int(5), Number::UInt(5)),
            (Number::Int(5), Number::Double(5.0)),
            (Number::UInt(7), Number::Decimal(dec("7.000"))),
            (Number::Double(0.5), Number::Decimal(dec("0.5"))),
            (Number::Double(0.0), Number::Double(-0.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(a, b);
            assert_eq!(hash_of(&a), hash_of(&b), "{a:?} / {b:?}");
        }
    }
}
