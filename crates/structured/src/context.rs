//! Conversion context
//!
//! A [`Context`] is threaded through every conversion that may touch a date.
//! Callers that never customise dates use `Context::default()`, which
//! carries the process-wide [`DateHooks`].

use std::sync::Arc;

use crate::date::DateHooks;

/// Ambient state for a conversion
#[derive(Debug, Clone)]
pub struct Context {
    date_hooks: Arc<DateHooks>,
}

impl Context {
    /// A context with its own date hooks, leaving the shared default alone
    pub fn with_date_hooks(hooks: impl Into<Arc<DateHooks>>) -> Self {
        Self {
            date_hooks: hooks.into(),
        }
    }

    /// The date hooks in effect
    pub fn date_hooks(&self) -> &DateHooks {
        &self.date_hooks
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            date_hooks: DateHooks::shared(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::DateFormat;

    #[test]
    fn test_with_date_hooks_is_isolated() {
        let custom = Context::with_date_hooks(
            DateHooks::builder().formatter(DateFormat::Sql).build(),
        );
        let date = chrono::DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(custom.date_hooks().format(&date), "1970-01-01 00:00:00");
        assert_eq!(
            Context::default().date_hooks().format(&date),
            "1970-01-01T00:00:00.000Z"
        );
    }
}
