//! Fluent builder for nested [`serde_json::Value`] trees.
//!
//! [`JsonBuilder`] mirrors the ergonomics of a streaming JSON writer —
//! `begin_object`/`end_object`, `begin_array`/`end_array`, `name`, `value`
//! — but assembles an in-memory value instead of emitting bytes, so deeply
//! nested structures can be written top-to-bottom without pre-building
//! each inner container.
//!
//! Object members keep their insertion order (the crate enables
//! serde_json's `preserve_order` feature).
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//!
//! let mut builder = json_nest::object();
//! builder
//!     .name("status")?
//!     .value("ok")?
//!     .name("attempts")?
//!     .begin_array()
//!     .value(1)?
//!     .value(2)?
//!     .end_array()?;
//! assert_eq!(builder.build()?, json!({"status": "ok", "attempts": [1, 2]}));
//! # Ok::<(), json_nest::Error>(())
//! ```

pub mod builder;
pub mod error;

use serde_json::{Map, Value};

pub use crate::builder::JsonBuilder;
pub use crate::error::{Error, ErrorKind};

pub type Result<T> = std::result::Result<T, Error>;

/// Starts a builder over a fresh empty object.
pub fn object() -> JsonBuilder {
    JsonBuilder::object()
}

/// Starts a builder over an existing object; appends mutate it in place.
pub fn object_with(base: Map<String, Value>) -> JsonBuilder {
    JsonBuilder::object_with(base)
}

/// Starts a builder over a fresh empty array.
pub fn array() -> JsonBuilder {
    JsonBuilder::array()
}

/// Starts a builder over an existing array; appends mutate it in place.
pub fn array_with(base: Vec<Value>) -> JsonBuilder {
    JsonBuilder::array_with(base)
}
