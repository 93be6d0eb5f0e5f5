//! meridian-dynamic
//!
//! Schema-driven scalar field access over generated API message types.
//!
//! Control-plane messages carry hundreds of typed settings fields; resource
//! handlers see those settings as loosely-typed configuration keyed by wire
//! name. This crate bridges the two without one hand-written adapter per
//! message: each message declares a static field table (via [`field_table!`])
//! mapping a structured tag to a typed accessor pair, and [`DynamicMessage`]
//! provides lookup-by-wire-name get/set on top of it.
//!
//! Optional scalars follow the wrapper convention of the generated types:
//! a nullable field is `Option<W>` where `W` is a single-member wrapper
//! (`Int64Value`, `BoolValue`, `DoubleValue`) holding `value`. Clearing a
//! field that has no nullable representation is a typed error, not a zero
//! write.

pub mod error;
pub mod field;
mod macros;

pub use crate::error::FieldError;
pub use crate::field::{
    tag_value, DynamicMessage, FieldDescriptor, FieldKind, FieldSpec, Scalar, ValueKind, NAME_KEY,
};
