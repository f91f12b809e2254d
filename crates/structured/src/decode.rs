//! Path decoding
//!
//! The `get*` family resolves a dotted path against a value (see
//! [`Value::lookup`]) and decodes whatever it finds through [`FromValue`].
//!
//! Every shape comes in two flavours:
//!
//! - required (`get`, `get_array`, ...) fails with
//!   [`ConversionError::NotFound`] naming the full path when the path is absent
//! - optional (`get_opt`, `get_array_opt`, ...) resolves to `None` when the
//!   path is absent or leads to null
//!
//! Every method also has an `_in` form taking a [`Context`], whose date
//! hooks are used for any date read along the way.
//!
//! Decode failures are reported against the full path walked, root first,
//! e.g. `nest.ed.array.2`. Nothing is returned on failure; a composite shape
//! either decodes completely or not at all.
//!
//! ```
//! use nebula_structured::Value;
//!
//! let value: Value = r#"{"nest": {"ed": {"array": [1, 2, 3]}}}"#.parse().unwrap();
//! let numbers: Vec<u8> = value.get_array("nest.ed.array").unwrap();
//! assert_eq!(numbers, vec![1, 2, 3]);
//! assert_eq!(value.get_opt::<u8>("nest.ed.missing").unwrap(), None);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use crate::context::Context;
use crate::convert::FromValue;
use crate::error::{ConversionError, ConversionResult};
use crate::value::Value;
use crate::value::path::parse_path;

impl Value {
    // ==================== Single values ====================

    /// Decode the value at `path`; an empty path decodes `self`
    pub fn get<T: FromValue>(&self, path: &str) -> ConversionResult<T> {
        self.get_in(path, &Context::default())
    }

    /// [`get`](Self::get) with an explicit context
    pub fn get_in<T: FromValue>(&self, path: &str, context: &Context) -> ConversionResult<T> {
        self.decode_required(path, |found| T::from_value_in(found, context))
    }

    /// Decode the value at `path`, or `None` if it is absent or null
    pub fn get_opt<T: FromValue>(&self, path: &str) -> ConversionResult<Option<T>> {
        self.get_opt_in(path, &Context::default())
    }

    /// [`get_opt`](Self::get_opt) with an explicit context
    pub fn get_opt_in<T: FromValue>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<Option<T>> {
        self.decode_optional(path, |found| T::from_value_in(found, context))
    }

    // ==================== Collections ====================
    //
    // Each shape is `get`/`get_opt` with a fixed target type; the `_in`
    // forms read dates with the given context's hooks.

    /// Decode an array, element by element
    pub fn get_array<T: FromValue>(&self, path: &str) -> ConversionResult<Vec<T>> {
        self.get(path)
    }

    pub fn get_array_in<T: FromValue>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<Vec<T>> {
        self.get_in(path, context)
    }

    pub fn get_array_opt<T: FromValue>(&self, path: &str) -> ConversionResult<Option<Vec<T>>> {
        self.get_opt(path)
    }

    pub fn get_array_opt_in<T: FromValue>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<Option<Vec<T>>> {
        self.get_opt_in(path, context)
    }

    /// Decode an array of arrays, two levels deep
    pub fn get_nested_array<T: FromValue>(&self, path: &str) -> ConversionResult<Vec<Vec<T>>> {
        self.get(path)
    }

    pub fn get_nested_array_in<T: FromValue>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<Vec<Vec<T>>> {
        self.get_in(path, context)
    }

    pub fn get_nested_array_opt<T: FromValue>(
        &self,
        path: &str,
    ) -> ConversionResult<Option<Vec<Vec<T>>>> {
        self.get_opt(path)
    }

    pub fn get_nested_array_opt_in<T: FromValue>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<Option<Vec<Vec<T>>>> {
        self.get_opt_in(path, context)
    }

    /// Decode an object's values; keys pass through unchanged
    pub fn get_map<T: FromValue>(&self, path: &str) -> ConversionResult<HashMap<String, T>> {
        self.get(path)
    }

    pub fn get_map_in<T: FromValue>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<HashMap<String, T>> {
        self.get_in(path, context)
    }

    pub fn get_map_opt<T: FromValue>(
        &self,
        path: &str,
    ) -> ConversionResult<Option<HashMap<String, T>>> {
        self.get_opt(path)
    }

    pub fn get_map_opt_in<T: FromValue>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<Option<HashMap<String, T>>> {
        self.get_opt_in(path, context)
    }

    /// Decode an array into a set; duplicates collapse by `T`'s equality
    pub fn get_set<T: FromValue + Eq + Hash>(&self, path: &str) -> ConversionResult<HashSet<T>> {
        self.get(path)
    }

    pub fn get_set_in<T: FromValue + Eq + Hash>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<HashSet<T>> {
        self.get_in(path, context)
    }

    pub fn get_set_opt<T: FromValue + Eq + Hash>(
        &self,
        path: &str,
    ) -> ConversionResult<Option<HashSet<T>>> {
        self.get_opt(path)
    }

    pub fn get_set_opt_in<T: FromValue + Eq + Hash>(
        &self,
        path: &str,
        context: &Context,
    ) -> ConversionResult<Option<HashSet<T>>> {
        self.get_opt_in(path, context)
    }

    // ==================== Transforms ====================

    /// Decode the value at `path` as `T`, then pass it through `transform`
    ///
    /// Use `T = Value` to hand the transform the raw value.
    pub fn get_with<T, U, F>(&self, path: &str, transform: F) -> ConversionResult<U>
    where
        T: FromValue,
        F: FnOnce(T) -> U,
    {
        self.get_with_in(path, &Context::default(), transform)
    }

    /// [`get_with`](Self::get_with) with an explicit context
    pub fn get_with_in<T, U, F>(
        &self,
        path: &str,
        context: &Context,
        transform: F,
    ) -> ConversionResult<U>
    where
        T: FromValue,
        F: FnOnce(T) -> U,
    {
        self.get_in::<T>(path, context).map(transform)
    }

    /// Like [`get_with`](Self::get_with), but an absent or null value yields
    /// `None` without calling `transform`
    pub fn get_opt_with<T, U, F>(&self, path: &str, transform: F) -> ConversionResult<Option<U>>
    where
        T: FromValue,
        F: FnOnce(T) -> U,
    {
        self.get_opt_with_in(path, &Context::default(), transform)
    }

    pub fn get_opt_with_in<T, U, F>(
        &self,
        path: &str,
        context: &Context,
        transform: F,
    ) -> ConversionResult<Option<U>>
    where
        T: FromValue,
        F: FnOnce(T) -> U,
    {
        Ok(self.get_opt_in::<T>(path, context)?.map(transform))
    }

    /// Decode then apply a fallible transform; its error is reported as
    /// [`ConversionError::Transform`] at `path`
    pub fn try_get_with<T, U, E, F>(&self, path: &str, transform: F) -> ConversionResult<U>
    where
        T: FromValue,
        E: Display,
        F: FnOnce(T) -> Result<U, E>,
    {
        self.try_get_with_in(path, &Context::default(), transform)
    }

    pub fn try_get_with_in<T, U, E, F>(
        &self,
        path: &str,
        context: &Context,
        transform: F,
    ) -> ConversionResult<U>
    where
        T: FromValue,
        E: Display,
        F: FnOnce(T) -> Result<U, E>,
    {
        self.decode_required(path, |found| apply_fallible(found, context, transform))
    }

    /// Optional form of [`try_get_with`](Self::try_get_with)
    pub fn try_get_opt_with<T, U, E, F>(
        &self,
        path: &str,
        transform: F,
    ) -> ConversionResult<Option<U>>
    where
        T: FromValue,
        E: Display,
        F: FnOnce(T) -> Result<U, E>,
    {
        self.try_get_opt_with_in(path, &Context::default(), transform)
    }

    pub fn try_get_opt_with_in<T, U, E, F>(
        &self,
        path: &str,
        context: &Context,
        transform: F,
    ) -> ConversionResult<Option<U>>
    where
        T: FromValue,
        E: Display,
        F: FnOnce(T) -> Result<U, E>,
    {
        self.decode_optional(path, |found| apply_fallible(found, context, transform))
    }

    // ==================== Engine ====================

    fn decode_required<R>(
        &self,
        path: &str,
        decode: impl FnOnce(&Value) -> ConversionResult<R>,
    ) -> ConversionResult<R> {
        let segments = parse_path(path)?;
        let found = self
            .lookup_segments(&segments)
            .ok_or_else(|| ConversionError::not_found(segments.clone()))?;
        decode(found).map_err(|e| e.at_path(&segments))
    }

    fn decode_optional<R>(
        &self,
        path: &str,
        decode: impl FnOnce(&Value) -> ConversionResult<R>,
    ) -> ConversionResult<Option<R>> {
        let segments = parse_path(path)?;
        match self.lookup_segments(&segments) {
            Some(found) if !found.is_null() => decode(found)
                .map(Some)
                .map_err(|e| e.at_path(&segments)),
            _ => Ok(None),
        }
    }
}

fn apply_fallible<T, U, E, F>(found: &Value, context: &Context, transform: F) -> ConversionResult<U>
where
    T: FromValue,
    E: Display,
    F: FnOnce(T) -> Result<U, E>,
{
    let decoded = T::from_value_in(found, context)?;
    transform(decoded).map_err(|e| ConversionError::transform(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_miss_names_full_path() {
        let err = Value::object_empty().get::<i64>("a.b.c").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no value found at path 'a.b.c'");
    }

    #[test]
    fn test_decode_error_is_prefixed_with_lookup_path() {
        let value = Value::object([("a", Value::object([("b", vec!["x", "y"])]))]);
        let err = value.get::<Vec<i64>>("a.b").unwrap_err();
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("a.b.0"));
    }

    #[test]
    fn test_optional_null_is_none() {
        let value = Value::object([("a", Value::Null), ("b", Value::text("null"))]);
        assert_eq!(value.get_opt::<i64>("a").unwrap(), None);
        assert_eq!(value.get_opt::<i64>("b").unwrap(), None);
        assert!(value.get::<i64>("a").is_err());
    }

    #[test]
    fn test_optional_present_but_wrong_shape_fails() {
        let value = Value::object([("a", "text")]);
        assert!(value.get_array_opt::<i64>("a").is_err());
    }

    #[test]
    fn test_try_get_with_reports_transform_error() {
        let value = Value::object([("port", 70_000)]);
        let err = value
            .try_get_with("port", |n: u32| u16::try_from(n))
            .unwrap_err();
        assert_eq!(err.code(), "STRUCTURED_TRANSFORM_FAILED");
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("port"));
    }

    #[test]
    fn test_try_get_opt_with_skips_transform_when_missing() {
        let value = Value::object_empty();
        let result = value
            .try_get_opt_with("port", |_: u32| -> Result<u16, String> {
                panic!("transform must not run")
            })
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_overlong_path_is_rejected() {
        let path = vec!["a"; 200].join(".");
        assert!(Value::object_empty().get_opt::<i64>(&path).is_err());
    }

    fn dotted_dates() -> Context {
        Context::with_date_hooks(
            crate::date::DateHooks::builder()
                .parsers([crate::date::DateFormat::pattern("%d.%m.%Y %H:%M").unwrap()])
                .build(),
        )
    }

    #[test]
    fn test_in_forms_read_dates_with_the_given_context() {
        use chrono::{DateTime, Utc};

        let context = dotted_dates();
        let stamp = DateTime::from_timestamp(1_274_023_200, 0).unwrap();
        let value = Value::object([
            ("list", Value::from(vec!["16.05.2010 15:20"])),
            ("nested", Value::array([Value::from(vec!["16.05.2010 15:20"])])),
            ("map", Value::object([("at", "16.05.2010 15:20")])),
            ("single", Value::text("16.05.2010 15:20")),
        ]);

        assert!(value.get_array::<DateTime<Utc>>("list").is_err());
        assert_eq!(value.get_array_in::<DateTime<Utc>>("list", &context).unwrap(), vec![stamp]);
        assert_eq!(
            value.get_array_opt_in::<DateTime<Utc>>("list", &context).unwrap(),
            Some(vec![stamp])
        );
        assert_eq!(
            value.get_nested_array_in::<DateTime<Utc>>("nested", &context).unwrap(),
            vec![vec![stamp]]
        );
        assert_eq!(
            value
                .get_nested_array_opt_in::<DateTime<Utc>>("nested", &context)
                .unwrap()
                .map(|rows| rows.len()),
            Some(1)
        );
        assert_eq!(value.get_map_in::<DateTime<Utc>>("map", &context).unwrap()["at"], stamp);
        assert!(value.get_map_opt_in::<DateTime<Utc>>("map", &context).unwrap().is_some());
        assert!(value.get_set_in::<DateTime<Utc>>("list", &context).unwrap().contains(&stamp));
        assert_eq!(
            value.get_set_opt_in::<DateTime<Utc>>("list", &context).unwrap().map(|s| s.len()),
            Some(1)
        );

        assert!(value.get_with("single", |d: DateTime<Utc>| d.timestamp()).is_err());
        assert_eq!(
            value
                .get_with_in("single", &context, |d: DateTime<Utc>| d.timestamp())
                .unwrap(),
            1_274_023_200
        );
        assert_eq!(
            value
                .get_opt_with_in("single", &context, |d: DateTime<Utc>| d.timestamp())
                .unwrap(),
            Some(1_274_023_200)
        );
        assert_eq!(
            value
                .try_get_with_in("single", &context, |d: DateTime<Utc>| {
                    u32::try_from(d.timestamp())
                })
                .unwrap(),
            1_274_023_200
        );
        assert_eq!(
            value
                .try_get_opt_with_in("single", &context, |d: DateTime<Utc>| {
                    u32::try_from(d.timestamp())
                })
                .unwrap(),
            Some(1_274_023_200)
        );
    }
}
