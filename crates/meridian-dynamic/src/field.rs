use std::collections::BTreeMap;
use std::fmt;

use crate::error::FieldError;

/// Tag key under which a field's wire name is recorded, e.g.
/// `"name=lock_timeout,json=lockTimeout"`.
pub const NAME_KEY: &str = "name";

/// The semantic kind of a scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Bool,
    Float,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Int => "integer",
            Self::Bool => "boolean",
            Self::Float => "float",
            Self::String => "string",
        };
        f.write_str(s)
    }
}

/// The storage kind of a message field: a plain scalar, or an optional
/// wrapper holding one. Strings have no wrapper representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Bool,
    Float,
    String,
    NullableInt,
    NullableBool,
    NullableFloat,
}

impl FieldKind {
    /// The semantic kind, wrapper-collapsed.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Int | Self::NullableInt => ValueKind::Int,
            Self::Bool | Self::NullableBool => ValueKind::Bool,
            Self::Float | Self::NullableFloat => ValueKind::Float,
            Self::String => ValueKind::String,
        }
    }

    /// Whether the field can hold "no value".
    pub fn nullable(self) -> bool {
        matches!(
            self,
            Self::NullableInt | Self::NullableBool | Self::NullableFloat
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.nullable() {
            write!(f, "a nullable {}", self.value_kind())
        } else {
            write!(f, "a plain {}", self.value_kind())
        }
    }
}

/// A scalar value read from or written into a message field.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Bool(bool),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Bool(_) => ValueKind::Bool,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::String,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// One entry in a message's static field table.
///
/// `get` returns `None` only for a nil wrapper. `set` is invoked after the
/// kind and nullability checks in [`DynamicMessage::set_scalar`]; its
/// non-matching arms are unreachable through the public entry points.
pub struct FieldSpec<M> {
    /// Structured tag, `k1=v1,k2=v2`. Carries at least a `name` entry.
    pub tag: &'static str,
    /// The Rust field identifier behind the tag.
    pub name: &'static str,
    pub kind: FieldKind,
    pub get: fn(&M) -> Option<Scalar>,
    pub set: fn(&mut M, Option<Scalar>),
}

/// What [`DynamicMessage::describe_fields`] reports per wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub value_type: ValueKind,
    pub nullable: bool,
    /// The underlying field identifier, for diagnostics.
    pub name: &'static str,
}

/// Extract the value of `key` from a structured tag of the form
/// `k1=v1,k2=v2`. Entries without `=` are skipped.
pub fn tag_value<'t>(tag: &'t str, key: &str) -> Option<&'t str> {
    tag.split(',').find_map(|part| {
        let (k, v) = part.split_once('=')?;
        (k == key).then_some(v)
    })
}

/// Lookup-by-wire-name scalar access over a static field table.
///
/// Implemented by generated message types through [`crate::field_table!`].
/// All provided methods are pure and synchronous; the table is immutable, so
/// concurrent access from any number of callers is safe.
pub trait DynamicMessage: Sized + 'static {
    /// The static field table. Keys are expected to be unique within one
    /// message type; if a `name` repeats, the last entry wins.
    fn field_table() -> &'static [FieldSpec<Self>];

    /// Describe every tagged field, keyed by the value of `tag_key` within
    /// each entry's structured tag. Fields whose tag lacks `tag_key` are
    /// skipped. Deterministic for a fixed type.
    fn describe_fields(tag_key: &str) -> BTreeMap<&'static str, FieldDescriptor> {
        let mut out = BTreeMap::new();
        for spec in Self::field_table() {
            if let Some(key) = tag_value(spec.tag, tag_key) {
                out.insert(
                    key,
                    FieldDescriptor {
                        value_type: spec.kind.value_kind(),
                        nullable: spec.kind.nullable(),
                        name: spec.name,
                    },
                );
            }
        }
        out
    }

    /// Find the table entry whose `name` tag equals `key`. Last match wins.
    fn lookup(key: &str) -> Option<&'static FieldSpec<Self>> {
        Self::field_table()
            .iter()
            .filter(|spec| tag_value(spec.tag, NAME_KEY) == Some(key))
            .next_back()
    }

    /// Core setter: `requested` is the kind of the calling operation, which
    /// must match the field's semantic kind even when clearing. `None` on a
    /// non-nullable field fails without touching the message.
    fn set_scalar(
        &mut self,
        key: &str,
        requested: ValueKind,
        value: Option<Scalar>,
    ) -> Result<(), FieldError> {
        let spec = Self::lookup(key).ok_or_else(|| FieldError::UnknownField {
            key: key.to_owned(),
        })?;
        if spec.kind.value_kind() != requested {
            return Err(FieldError::TypeMismatch {
                key: key.to_owned(),
                requested,
                actual: spec.kind,
            });
        }
        if value.is_none() && !spec.kind.nullable() {
            return Err(FieldError::NilNotAllowed {
                key: key.to_owned(),
            });
        }
        (spec.set)(self, value);
        Ok(())
    }

    fn set_int(&mut self, key: &str, value: Option<i64>) -> Result<(), FieldError> {
        self.set_scalar(key, ValueKind::Int, value.map(Scalar::Int))
    }

    fn set_bool(&mut self, key: &str, value: Option<bool>) -> Result<(), FieldError> {
        self.set_scalar(key, ValueKind::Bool, value.map(Scalar::Bool))
    }

    fn set_float(&mut self, key: &str, value: Option<f64>) -> Result<(), FieldError> {
        self.set_scalar(key, ValueKind::Float, value.map(Scalar::Float))
    }

    fn set_string(&mut self, key: &str, value: Option<String>) -> Result<(), FieldError> {
        self.set_scalar(key, ValueKind::String, value.map(Scalar::Str))
    }

    /// Read a field by wire name. `Ok(None)` means a nil wrapper — an
    /// explicitly absent value, not an error and not a zero.
    fn get_scalar(&self, key: &str) -> Result<Option<Scalar>, FieldError> {
        let spec = Self::lookup(key).ok_or_else(|| FieldError::UnknownField {
            key: key.to_owned(),
        })?;
        Ok((spec.get)(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate as meridian_dynamic;

    // Single-member wrappers matching the generated-type convention.
    #[derive(Debug, Default, Clone, PartialEq)]
    struct I64Box {
        value: i64,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct BoolBox {
        value: bool,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct F64Box {
        value: f64,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Settings {
        isolation: i32,
        lock_timeout: Option<I64Box>,
        temp_file_limit: Option<I64Box>,
        parallel_hash: Option<BoolBox>,
        scale_factor: Option<F64Box>,
        search_path: String,
        logging: bool,
        sample_rate: f64,
    }

    meridian_dynamic::field_table!(Settings {
        "name=default_transaction_isolation" => int32(isolation),
        "name=lock_timeout,json=lockTimeout" => nullable_int64(lock_timeout),
        "name=temp_file_limit" => nullable_int64(temp_file_limit),
        "name=parallel_hash" => nullable_bool(parallel_hash),
        "name=scale_factor" => nullable_float(scale_factor),
        "name=search_path" => string(search_path),
        "name=logging" => bool(logging),
        "name=sample_rate" => float(sample_rate),
    });

    #[test]
    fn tag_value_parses_structured_tags() {
        assert_eq!(tag_value("name=a,json=b", "name"), Some("a"));
        assert_eq!(tag_value("name=a,json=b", "json"), Some("b"));
        assert_eq!(tag_value("name=a", "json"), None);
        assert_eq!(tag_value("bare,name=a", "name"), Some("a"));
    }

    #[test]
    fn plain_int_round_trips() {
        let mut s = Settings::default();
        s.set_int("default_transaction_isolation", Some(4)).unwrap();
        assert_eq!(s.isolation, 4);
        assert_eq!(
            s.get_scalar("default_transaction_isolation").unwrap(),
            Some(Scalar::Int(4))
        );
    }

    #[test]
    fn nullable_int_set_populates_wrapper() {
        let mut s = Settings::default();
        s.set_int("lock_timeout", Some(7)).unwrap();
        assert_eq!(s.lock_timeout, Some(I64Box { value: 7 }));
        assert_eq!(s.get_scalar("lock_timeout").unwrap(), Some(Scalar::Int(7)));
    }

    #[test]
    fn nullable_int_clear_yields_absent() {
        let mut s = Settings {
            temp_file_limit: Some(I64Box { value: 10 }),
            ..Default::default()
        };
        s.set_int("temp_file_limit", None).unwrap();
        assert_eq!(s.temp_file_limit, None);
        assert_eq!(s.get_scalar("temp_file_limit").unwrap(), None);
    }

    #[test]
    fn clearing_plain_field_is_rejected_and_leaves_it_untouched() {
        let mut s = Settings {
            isolation: 2,
            ..Default::default()
        };
        let err = s
            .set_int("default_transaction_isolation", None)
            .unwrap_err();
        assert_eq!(
            err,
            FieldError::NilNotAllowed {
                key: "default_transaction_isolation".into()
            }
        );
        assert_eq!(s.isolation, 2);
    }

    #[test]
    fn kind_mismatch_is_typed() {
        let mut s = Settings::default();
        let err = s.set_string("lock_timeout", Some("7".into())).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));

        // Clearing under the wrong operation kind is a mismatch, not a clear.
        let err = s.set_bool("scale_factor", None).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));
    }

    #[test]
    fn unknown_key_is_typed() {
        let mut s = Settings::default();
        assert_eq!(
            s.set_int("no_such_setting", Some(1)).unwrap_err(),
            FieldError::UnknownField {
                key: "no_such_setting".into()
            }
        );
        assert_eq!(
            s.get_scalar("no_such_setting").unwrap_err().key(),
            "no_such_setting"
        );
    }

    #[test]
    fn nullable_bool_and_float_round_trip() {
        let mut s = Settings::default();
        s.set_bool("parallel_hash", Some(true)).unwrap();
        s.set_float("scale_factor", Some(0.25)).unwrap();
        assert_eq!(
            s.get_scalar("parallel_hash").unwrap(),
            Some(Scalar::Bool(true))
        );
        assert_eq!(
            s.get_scalar("scale_factor").unwrap(),
            Some(Scalar::Float(0.25))
        );
        s.set_bool("parallel_hash", None).unwrap();
        assert_eq!(s.get_scalar("parallel_hash").unwrap(), None);
    }

    #[test]
    fn plain_string_bool_float_round_trip() {
        let mut s = Settings::default();
        s.set_string("search_path", Some("public".into())).unwrap();
        s.set_bool("logging", Some(true)).unwrap();
        s.set_float("sample_rate", Some(0.5)).unwrap();
        assert_eq!(
            s.get_scalar("search_path").unwrap(),
            Some(Scalar::Str("public".into()))
        );
        assert_eq!(s.get_scalar("logging").unwrap(), Some(Scalar::Bool(true)));
        assert_eq!(
            s.get_scalar("sample_rate").unwrap(),
            Some(Scalar::Float(0.5))
        );
        assert_eq!(
            s.set_string("search_path", None).unwrap_err(),
            FieldError::NilNotAllowed {
                key: "search_path".into()
            }
        );
    }

    #[test]
    fn describe_fields_reports_kinds_and_names() {
        let fields = Settings::describe_fields(NAME_KEY);
        assert_eq!(fields.len(), 8);
        let lock = &fields["lock_timeout"];
        assert_eq!(lock.value_type, ValueKind::Int);
        assert!(lock.nullable);
        assert_eq!(lock.name, "lock_timeout");
        let iso = &fields["default_transaction_isolation"];
        assert_eq!(iso.value_type, ValueKind::Int);
        assert!(!iso.nullable);

        // Secondary tag namespace only covers entries that carry it.
        let json = Settings::describe_fields("json");
        assert_eq!(json.len(), 1);
        assert_eq!(json["lockTimeout"].name, "lock_timeout");
    }

    #[test]
    fn describe_fields_is_stable_across_mutation() {
        let before = Settings::describe_fields(NAME_KEY);
        let mut s = Settings::default();
        s.set_int("lock_timeout", Some(3)).unwrap();
        s.set_int("lock_timeout", None).unwrap();
        assert_eq!(before, Settings::describe_fields(NAME_KEY));
    }
}
