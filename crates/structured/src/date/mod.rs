//! Date hooks
//!
//! [`DateHooks`] decides how dates cross the text and number boundaries:
//!
//! 1. an ordered list of [`DateFormat`] strategies used to parse text, the
//!    first one that accepts the text wins
//! 2. a single formatter used whenever a date is rendered as text
//! 3. an incoming timestamp conversion, number to date
//! 4. an outgoing timestamp conversion, date to number
//!
//! The defaults read ISO 8601, SQL `DATETIME` and RFC 1123 text, render ISO
//! 8601, and treat numbers as seconds since the Unix epoch.
//!
//! Hooks are plain values passed around inside a [`Context`](crate::Context).
//! A process-wide default can be installed once at startup with
//! [`DateHooks::install`]; after that it is read-only.

mod format;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::number::Number;

pub use format::{DateFormat, DateStrategy, Pattern};

/// Number to date conversion
pub type IncomingTimestamp = Arc<dyn Fn(&Number) -> Option<DateTime<Utc>> + Send + Sync>;

/// Date to number conversion
pub type OutgoingTimestamp = Arc<dyn Fn(&DateTime<Utc>) -> Number + Send + Sync>;

static INSTALLED: OnceCell<Arc<DateHooks>> = OnceCell::new();

/// The four date extension points
#[derive(Clone)]
pub struct DateHooks {
    parsers: Vec<DateFormat>,
    formatter: DateFormat,
    incoming_timestamp: IncomingTimestamp,
    outgoing_timestamp: OutgoingTimestamp,
}

impl DateHooks {
    /// Start from the defaults and replace parts
    pub fn builder() -> DateHooksBuilder {
        DateHooksBuilder {
            hooks: Self::default(),
        }
    }

    /// Install the process-wide default
    ///
    /// Succeeds only once, and only if nothing has read the default yet.
    /// On failure the rejected hooks are handed back.
    pub fn install(hooks: Self) -> Result<(), Self> {
        match INSTALLED.set(Arc::new(hooks)) {
            Ok(()) => {
                debug!("installed process-wide date hooks");
                Ok(())
            }
            Err(rejected) => {
                debug!("date hooks already installed or in use, rejecting replacement");
                Err(Arc::try_unwrap(rejected).unwrap_or_else(|shared| (*shared).clone()))
            }
        }
    }

    /// The process-wide default, built lazily if nothing was installed
    pub fn shared() -> Arc<Self> {
        Arc::clone(INSTALLED.get_or_init(|| Arc::new(Self::default())))
    }

    // ==================== Hooks ====================

    /// Parse text with the first strategy that accepts it
    pub fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        let found = self.parsers.iter().find_map(|format| format.parse(text));
        if found.is_none() {
            trace!(text, strategies = self.parsers.len(), "no date strategy matched");
        }
        found
    }

    /// Render a date with the outgoing formatter
    pub fn format(&self, date: &DateTime<Utc>) -> String {
        self.formatter.format(date)
    }

    /// Interpret a number as a date
    pub fn date_from_timestamp(&self, number: &Number) -> Option<DateTime<Utc>> {
        (self.incoming_timestamp)(number)
    }

    /// Represent a date as a number
    pub fn timestamp_from_date(&self, date: &DateTime<Utc>) -> Number {
        (self.outgoing_timestamp)(date)
    }

    /// The parse strategies, in the order they are tried
    pub fn parsers(&self) -> &[DateFormat] {
        &self.parsers
    }

    /// The outgoing formatter
    pub fn formatter(&self) -> &DateFormat {
        &self.formatter
    }
}

impl Default for DateHooks {
    fn default() -> Self {
        Self {
            parsers: vec![DateFormat::Iso8601, DateFormat::Sql, DateFormat::Rfc1123],
            formatter: DateFormat::Iso8601,
            incoming_timestamp: Arc::new(seconds_to_date),
            outgoing_timestamp: Arc::new(date_to_seconds),
        }
    }
}

impl fmt::Debug for DateHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateHooks")
            .field("parsers", &self.parsers)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

/// Seconds since the Unix epoch; fractional seconds are kept to the nanosecond
fn seconds_to_date(number: &Number) -> Option<DateTime<Utc>> {
    match *number {
        Number::Int(secs) => DateTime::from_timestamp(secs, 0),
        Number::UInt(secs) => DateTime::from_timestamp(i64::try_from(secs).ok()?, 0),
        _ => {
            let secs = number.as_double();
            if !secs.is_finite() {
                return None;
            }
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
            DateTime::from_timestamp(whole as i64, nanos)
        }
    }
}

fn date_to_seconds(date: &DateTime<Utc>) -> Number {
    match date.timestamp_subsec_nanos() {
        0 => Number::Int(date.timestamp()),
        nanos => Number::Double(date.timestamp() as f64 + f64::from(nanos) / 1e9),
    }
}

/// Builder for [`DateHooks`]; every setter replaces its part wholesale
#[derive(Debug)]
pub struct DateHooksBuilder {
    hooks: DateHooks,
}

impl DateHooksBuilder {
    /// Replace the ordered parse strategies
    pub fn parsers(mut self, parsers: impl IntoIterator<Item = DateFormat>) -> Self {
        self.hooks.parsers = parsers.into_iter().collect();
        self
    }

    /// Replace the outgoing formatter
    pub fn formatter(mut self, formatter: DateFormat) -> Self {
        self.hooks.formatter = formatter;
        self
    }

    /// Replace the number to date conversion
    pub fn incoming_timestamp<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Number) -> Option<DateTime<Utc>> + Send + Sync + 'static,
    {
        self.hooks.incoming_timestamp = Arc::new(hook);
        self
    }

    /// Replace the date to number conversion
    pub fn outgoing_timestamp<F>(mut self, hook: F) -> Self
    where
        F: Fn(&DateTime<Utc>) -> Number + Send + Sync + 'static,
    {
        self.hooks.outgoing_timestamp = Arc::new(hook);
        self
    }

    pub fn build(self) -> DateHooks {
        self.hooks
    }
}
