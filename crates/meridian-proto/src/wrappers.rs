//! Nullable scalar wrappers.
//!
//! The control plane has no native optional primitives; an optional integer,
//! boolean, or double is an optional message holding a single `value` field.
//! A nil wrapper means "not set", which the server treats as "leave at
//! platform default" — distinct from the scalar's zero.

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Int64Value {
    #[prost(int64, tag = "1")]
    pub value: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct BoolValue {
    #[prost(bool, tag = "1")]
    pub value: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DoubleValue {
    #[prost(double, tag = "1")]
    pub value: f64,
}

impl From<i64> for Int64Value {
    fn from(value: i64) -> Self {
        Self { value }
    }
}

impl From<bool> for BoolValue {
    fn from(value: bool) -> Self {
        Self { value }
    }
}

impl From<f64> for DoubleValue {
    fn from(value: f64) -> Self {
        Self { value }
    }
}
