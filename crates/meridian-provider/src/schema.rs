//! Attribute schemas.
//!
//! Each resource handler declares its attributes once; the provider uses
//! the declaration to validate configuration, fill in defaults, and decide
//! which attributes actually changed before building an update mask.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use crate::data::ResourceData;
use crate::error::ProviderError;

/// Scalar shape of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Bool,
    Int,
    Float,
    String,
    StringList,
    StringMap,
}

impl AttrKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Bool => value.is_boolean(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::String => value.is_string(),
            Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Self::StringMap => value
                .as_object()
                .is_some_and(|map| map.values().all(Value::is_string)),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Bool => "a boolean",
            Self::Int => "an integer",
            Self::Float => "a number",
            Self::String => "a string",
            Self::StringList => "a list of strings",
            Self::StringMap => "a map of strings",
        }
    }
}

/// Returns true when `old` and `new` should be treated as equal even though
/// they differ textually.
pub type DiffSuppress = fn(&Value, &Value) -> bool;

/// One attribute declaration. Built with the chained constructors:
/// `Attribute::string().required().force_new()`.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub kind: AttrKind,
    pub required: bool,
    pub computed: bool,
    pub force_new: bool,
    pub default: Option<Value>,
    pub diff_suppress: Option<DiffSuppress>,
}

impl Attribute {
    fn new(kind: AttrKind) -> Self {
        Self {
            kind,
            required: false,
            computed: false,
            force_new: false,
            default: None,
            diff_suppress: None,
        }
    }

    pub fn boolean() -> Self {
        Self::new(AttrKind::Bool)
    }

    pub fn int() -> Self {
        Self::new(AttrKind::Int)
    }

    pub fn float() -> Self {
        Self::new(AttrKind::Float)
    }

    pub fn string() -> Self {
        Self::new(AttrKind::String)
    }

    pub fn string_list() -> Self {
        Self::new(AttrKind::StringList)
    }

    pub fn string_map() -> Self {
        Self::new(AttrKind::StringMap)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The service fills this in; users never set it.
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Changing this attribute requires destroying and recreating the
    /// resource.
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn suppress(mut self, f: DiffSuppress) -> Self {
        self.diff_suppress = Some(f);
        self
    }
}

/// Per-lifecycle-phase deadlines for long-running operations.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Timeouts {
    /// Fallback deadline for resources that do not pin their own.
    pub const DEFAULT: Duration = Duration::from_secs(300);

    pub fn uniform(each: Duration) -> Self {
        Self {
            create: each,
            update: each,
            delete: each,
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT)
    }
}

/// A resource's full attribute declaration.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub attributes: BTreeMap<&'static str, Attribute>,
    pub timeouts: Timeouts,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.attributes.insert(name, attribute);
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Reject unknown keys, missing required attributes, user-supplied
    /// values for computed attributes, and type mismatches.
    pub fn validate(&self, data: &ResourceData) -> Result<(), ProviderError> {
        for key in data.config_keys() {
            let Some(attr) = self.attributes.get(key.as_str()) else {
                return Err(ProviderError::Validation(format!(
                    "unknown attribute `{key}`"
                )));
            };
            if attr.computed {
                return Err(ProviderError::Validation(format!(
                    "attribute `{key}` is read-only"
                )));
            }
            let value = data
                .config_value(&key)
                .ok_or_else(|| ProviderError::Validation(format!("attribute `{key}` vanished")))?;
            if !attr.kind.matches(value) {
                return Err(ProviderError::Validation(format!(
                    "attribute `{key}` must be {}",
                    attr.kind.describe()
                )));
            }
        }
        for (name, attr) in &self.attributes {
            if attr.required && data.config_value(name).is_none() {
                return Err(ProviderError::MissingAttribute((*name).to_owned()));
            }
        }
        Ok(())
    }

    /// Write declared defaults into the configuration for attributes the
    /// user left unset, so handlers see a fully resolved view.
    pub fn apply_defaults(&self, data: &mut ResourceData) {
        for (name, attr) in &self.attributes {
            if let Some(default) = &attr.default {
                if data.config_value(name).is_none() {
                    data.set_config(name, default.clone());
                }
            }
        }
    }

    /// Carry configured values into state for attributes the service never
    /// echoes back, such as creation-only inputs. Without a recorded value
    /// they would look permanently changed. No-op for cleared bags.
    pub fn record_unechoed(&self, data: &mut ResourceData) {
        if data.id().is_none() {
            return;
        }
        for name in self.attributes.keys() {
            if data.state_value(name).is_none() {
                if let Some(value) = data.config_value(name) {
                    let value = value.clone();
                    data.set(name, value);
                }
            }
        }
    }

    /// Configured attributes whose value differs from recorded state, with
    /// per-attribute diff suppression applied. The result feeds update
    /// masks, so order is the schema's (sorted) attribute order.
    pub fn effective_changes(&self, data: &ResourceData) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter_map(|(name, attr)| {
                let new = data.config_value(name)?;
                match data.state_value(name) {
                    Some(old) if old == new => None,
                    Some(old) if attr.diff_suppress.is_some_and(|f| f(old, new)) => None,
                    _ => Some(*name),
                }
            })
            .collect()
    }

    /// The subset of [`Schema::effective_changes`] that cannot be applied
    /// in place.
    pub fn replacement_trigger(&self, data: &ResourceData) -> Option<&'static str> {
        self.effective_changes(data)
            .into_iter()
            .find(|name| self.attributes[name].force_new)
    }
}

/// Equal ignoring ASCII case. For server-normalized enum-ish strings such
/// as storage classes.
pub fn suppress_case(old: &Value, new: &Value) -> bool {
    match (old.as_str(), new.as_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// Equal up to a trailing dot. DNS names come back fully qualified.
pub fn suppress_trailing_dot(old: &Value, new: &Value) -> bool {
    match (old.as_str(), new.as_str()) {
        (Some(a), Some(b)) => a.trim_end_matches('.') == b.trim_end_matches('.'),
        _ => false,
    }
}

/// Exactly one of `keys` must be configured. Used for oneof-backed
/// resources such as triggers.
pub fn require_exactly_one(data: &ResourceData, keys: &[&str]) -> Result<(), ProviderError> {
    let set: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| data.config_value(key).is_some())
        .collect();
    match set.as_slice() {
        [_] => Ok(()),
        [] => Err(ProviderError::Validation(format!(
            "exactly one of {} must be set",
            keys.join(", ")
        ))),
        many => Err(ProviderError::Validation(format!(
            "{} are mutually exclusive",
            many.join(", ")
        ))),
    }
}
