//! String date strategies
//!
//! Each [`DateFormat`] both parses and renders. The built-in strategies
//! compile their chrono format items once and reuse them for every call.

use std::fmt;
use std::sync::Arc;

use chrono::format::{Item, Parsed, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;

use crate::error::{ConversionError, ConversionResult};
use crate::value::Value;

static SQL_ITEMS: Lazy<Vec<Item<'static>>> =
    Lazy::new(|| StrftimeItems::new("%Y-%m-%d %H:%M:%S").collect());

static RFC1123_ITEMS: Lazy<Vec<Item<'static>>> =
    Lazy::new(|| StrftimeItems::new("%a, %d %b %Y %H:%M:%S GMT").collect());

/// A user supplied string date strategy
pub trait DateStrategy: fmt::Debug + Send + Sync {
    /// Parse `text`, or `None` if it is not in this strategy's format
    fn parse(&self, text: &str) -> Option<DateTime<Utc>>;

    /// Render `date` in this strategy's format
    fn format(&self, date: &DateTime<Utc>) -> String;
}

/// A strftime pattern compiled once at construction
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    items: Vec<Item<'static>>,
}

impl Pattern {
    /// Compile a strftime pattern such as `"%d/%m/%Y %H:%M"`
    ///
    /// Patterns without an offset specifier are read as UTC.
    pub fn new(pattern: impl Into<String>) -> ConversionResult<Self> {
        let source = pattern.into();
        let items = StrftimeItems::new(&source).parse_to_owned().map_err(|e| {
            ConversionError::unconvertible(
                &Value::text(source.as_str()),
                format!("strftime pattern ({e})"),
            )
        })?;
        Ok(Self { source, items })
    }

    /// The pattern text this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// One way of writing a date as text
#[derive(Debug, Clone)]
pub enum DateFormat {
    /// RFC 3339 / ISO 8601, rendered with milliseconds in UTC:
    /// `2010-05-16T15:20:00.000Z`
    Iso8601,
    /// SQL `DATETIME` in UTC: `2010-05-16 15:20:00`
    Sql,
    /// RFC 1123 (HTTP dates): `Sun, 16 May 2010 15:20:00 GMT`
    Rfc1123,
    /// A compiled strftime pattern
    Pattern(Pattern),
    /// A user supplied strategy
    Custom(Arc<dyn DateStrategy>),
}

impl DateFormat {
    /// Compile a strftime pattern into a strategy
    pub fn pattern(pattern: impl Into<String>) -> ConversionResult<Self> {
        Pattern::new(pattern).map(Self::Pattern)
    }

    /// Wrap a user supplied strategy
    pub fn custom(strategy: impl DateStrategy + 'static) -> Self {
        Self::Custom(Arc::new(strategy))
    }

    /// Parse `text`, or `None` if it is not in this format
    pub fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        match self {
            Self::Iso8601 => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            Self::Sql => parse_with_items(text, &SQL_ITEMS),
            Self::Rfc1123 => DateTime::parse_from_rfc2822(text)
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            Self::Pattern(pattern) => parse_with_items(text, &pattern.items),
            Self::Custom(strategy) => strategy.parse(text),
        }
    }

    /// Render `date` in this format
    pub fn format(&self, date: &DateTime<Utc>) -> String {
        match self {
            Self::Iso8601 => date.to_rfc3339_opts(SecondsFormat::Millis, true),
            Self::Sql => date.format_with_items(SQL_ITEMS.iter()).to_string(),
            Self::Rfc1123 => date.format_with_items(RFC1123_ITEMS.iter()).to_string(),
            Self::Pattern(pattern) => date.format_with_items(pattern.items.iter()).to_string(),
            Self::Custom(strategy) => strategy.format(date),
        }
    }
}

fn parse_with_items(text: &str, items: &[Item<'static>]) -> Option<DateTime<Utc>> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, text, items.iter()).ok()?;
    match parsed.to_datetime() {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(_) => parsed
            .to_naive_datetime_with_offset(0)
            .ok()
            .map(|naive| naive.and_utc()),
    }
}
