/// Declare the static field table for a message type and implement
/// [`crate::DynamicMessage`] over it.
///
/// One line per tagged field: the structured tag literal, the storage kind,
/// and the field identifier. Kinds:
///
/// - `int32` / `int64` — plain integers (enum-valued fields use `int32`)
/// - `bool`, `float`, `string` — other plain scalars
/// - `nullable_int64`, `nullable_bool`, `nullable_float` — `Option<W>` where
///   `W` is a single-member wrapper with a `value` field and a `Default` impl
///
/// ```
/// #[derive(Default)]
/// struct Config {
///     max_connections: i64,
/// }
///
/// meridian_dynamic::field_table!(Config {
///     "name=max_connections" => int64(max_connections),
/// });
/// ```
#[macro_export]
macro_rules! field_table {
    ($msg:ty { $( $tag:literal => $kind:ident($field:ident) ),+ $(,)? }) => {
        impl $crate::DynamicMessage for $msg {
            fn field_table() -> &'static [$crate::FieldSpec<Self>] {
                static TABLE: &[$crate::FieldSpec<$msg>] = &[
                    $( $crate::field_table!(@spec $tag, $kind, $field) ),+
                ];
                TABLE
            }
        }
    };

    (@spec $tag:literal, int64, $field:ident) => {
        $crate::FieldSpec {
            tag: $tag,
            name: stringify!($field),
            kind: $crate::FieldKind::Int,
            get: |m| Some($crate::Scalar::Int(m.$field)),
            set: |m, v| {
                if let Some($crate::Scalar::Int(i)) = v {
                    m.$field = i;
                }
            },
        }
    };

    (@spec $tag:literal, int32, $field:ident) => {
        $crate::FieldSpec {
            tag: $tag,
            name: stringify!($field),
            kind: $crate::FieldKind::Int,
            get: |m| Some($crate::Scalar::Int(i64::from(m.$field))),
            set: |m, v| {
                if let Some($crate::Scalar::Int(i)) = v {
                    m.$field = i as i32;
                }
            },
        }
    };

    (@spec $tag:literal, bool, $field:ident) => {
        $crate::FieldSpec {
            tag: $tag,
            name: stringify!($field),
            kind: $crate::FieldKind::Bool,
            get: |m| Some($crate::Scalar::Bool(m.$field)),
            set: |m, v| {
                if let Some($crate::Scalar::Bool(b)) = v {
                    m.$field = b;
                }
            },
        }
    };

    (@spec $tag:literal, float, $field:ident) => {
        $crate::FieldSpec {
            tag: $tag,
            name: stringify!($field),
            kind: $crate::FieldKind::Float,
            get: |m| Some($crate::Scalar::Float(m.$field)),
            set: |m, v| {
                if let Some($crate::Scalar::Float(x)) = v {
                    m.$field = x;
                }
            },
        }
    };

    (@spec $tag:literal, string, $field:ident) => {
        $crate::FieldSpec {
            tag: $tag,
            name: stringify!($field),
            kind: $crate::FieldKind::String,
            get: |m| Some($crate::Scalar::Str(m.$field.clone())),
            set: |m, v| {
                if let Some($crate::Scalar::Str(s)) = v {
                    m.$field = s;
                }
            },
        }
    };

    (@spec $tag:literal, nullable_int64, $field:ident) => {
        $crate::FieldSpec {
            tag: $tag,
            name: stringify!($field),
            kind: $crate::FieldKind::NullableInt,
            get: |m| m.$field.as_ref().map(|w| $crate::Scalar::Int(w.value)),
            set: |m, v| match v {
                Some($crate::Scalar::Int(i)) => {
                    let mut w = m.$field.take().unwrap_or_default();
                    w.value = i;
                    m.$field = Some(w);
                }
                _ => m.$field = None,
            },
        }
    };

    (@spec $tag:literal, nullable_bool, $field:ident) => {
        $crate::FieldSpec {
            tag: $tag,
            name: stringify!($field),
            kind: $crate::FieldKind::NullableBool,
            get: |m| m.$field.as_ref().map(|w| $crate::Scalar::Bool(w.value)),
            set: |m, v| match v {
                Some($crate::Scalar::Bool(b)) => {
                    let mut w = m.$field.take().unwrap_or_default();
                    w.value = b;
                    m.$field = Some(w);
                }
                _ => m.$field = None,
            },
        }
    };

    (@spec $tag:literal, nullable_float, $field:ident) => {
        $crate::FieldSpec {
            tag: $tag,
            name: stringify!($field),
            kind: $crate::FieldKind::NullableFloat,
            get: |m| m.$field.as_ref().map(|w| $crate::Scalar::Float(w.value)),
            set: |m, v| match v {
                Some($crate::Scalar::Float(x)) => {
                    let mut w = m.$field.take().unwrap_or_default();
                    w.value = x;
                    m.$field = Some(w);
                }
                _ => m.$field = None,
            },
        }
    };
}
