use thiserror::Error;

use crate::field::{FieldKind, ValueKind};

/// Errors from dynamic field access.
///
/// Callers branch on the variant, not the message: resource handlers treat
/// `TypeMismatch` as a configuration bug and `NilNotAllowed` as an attempt to
/// unset a setting the platform models as always-present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("no field tagged `{key}`")]
    UnknownField { key: String },

    #[error("field `{key}` is not nullable and cannot be cleared")]
    NilNotAllowed { key: String },

    #[error("field `{key}` holds {actual}, not settable as {requested}")]
    TypeMismatch {
        key: String,
        requested: ValueKind,
        actual: FieldKind,
    },
}

impl FieldError {
    /// The wire name the failed access referred to.
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownField { key }
            | Self::NilNotAllowed { key }
            | Self::TypeMismatch { key, .. } => key,
        }
    }
}
