//! # nebula-structured
//!
//! A neutral structured value model sitting between native Rust types and
//! format encoders.
//!
//! - [`Value`]: a closed tagged union (null, bool, number, string, bytes,
//!   date, array, object) with persistent collections
//! - [`Number`]: signed, unsigned, binary float or decimal, with total
//!   saturating projections between them and lossless cross-variant equality
//! - best-effort `to_*` projections on [`Value`] that never fail
//! - [`ToValue`] / [`FromValue`]: the conversion protocol, plus [`convert`]
//!   to go from any producer to any consumer
//! - the `get*` family on [`Value`]: dotted-path decoding into single values,
//!   optionals, arrays, nested arrays, maps and sets
//! - [`DateHooks`]: how dates cross the text and number boundaries, carried
//!   by a [`Context`]
//!
//! ```
//! use nebula_structured::prelude::*;
//!
//! let value = Value::object([("port", "8080"), ("debug", "yes")]);
//! let port: u16 = value.get("port")?;
//! let debug: bool = value.get("debug")?;
//! assert_eq!((port, debug), (8080, true));
//! # Ok::<(), ConversionError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod context;
pub mod convert;
pub mod date;
mod decode;
pub mod error;
pub mod number;
pub mod value;

pub use context::Context;
pub use convert::{FromValue, ToValue, convert};
pub use date::{DateFormat, DateHooks, DateStrategy};
pub use error::{ConversionError, ConversionResult, Path, PathSegment};
pub use number::Number;
pub use value::{Array, HashableValue, Object, Value, ValueKind};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Context, ConversionError, ConversionResult, FromValue, Number, ToValue, Value, convert,
    };
}
