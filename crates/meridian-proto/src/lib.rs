//! meridian-proto
//!
//! Hand-maintained message types and method paths for the Meridian Cloud
//! control plane. One module per service family, mirroring the platform's
//! protobuf packages; mutating RPCs return a long-running [`operation::Operation`].
//!
//! Messages that expose schema-driven settings carry a
//! [`meridian_dynamic::DynamicMessage`] field table next to the type, keyed
//! by protobuf wire name — the registry equivalent of the struct tags on the
//! platform's generated types.

pub mod compute;
pub mod iam;
pub mod mdb;
pub mod operation;
pub mod storage;
pub mod triggers;
pub mod vpc;
pub mod wrappers;

pub use crate::operation::Operation;
pub use crate::wrappers::{BoolValue, DoubleValue, Int64Value};
