//! The attribute bag handlers read from and write to.
//!
//! A [`ResourceData`] holds two layers for one resource instance: the
//! user's configuration (desired values) and the recorded state (what the
//! service last reported). Reads fall through configuration to state, which
//! lets the same flatten code serve both fresh creates and refreshes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProviderError;

/// Serializes cleanly so callers can persist state between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    id: Option<String>,
    config: Map<String, Value>,
    state: Map<String, Value>,
}

impl ResourceData {
    pub fn from_config(config: Map<String, Value>) -> Self {
        Self {
            id: None,
            config,
            state: Map::new(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn require_id(&self) -> Result<&str, ProviderError> {
        self.id.as_deref().ok_or(ProviderError::MissingId)
    }

    /// Forget the remote resource. Called when a refresh discovers the
    /// resource is gone, so the next plan recreates it.
    pub fn clear(&mut self) {
        self.id = None;
        self.state.clear();
    }

    /// Effective value: configuration first, then recorded state.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key).or_else(|| self.state.get(key))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_string_map(&self, key: &str) -> HashMap<String, String> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_owned())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Like [`ResourceData::get_string_map`] but ordered, for callers that
    /// need deterministic iteration.
    pub fn get_sorted_map(&self, key: &str) -> BTreeMap<String, String> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_owned())))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn require_str(&self, key: &str) -> Result<&str, ProviderError> {
        self.get_str(key)
            .ok_or_else(|| ProviderError::MissingAttribute(key.to_owned()))
    }

    pub fn require_i64(&self, key: &str) -> Result<i64, ProviderError> {
        self.get_i64(key)
            .ok_or_else(|| ProviderError::MissingAttribute(key.to_owned()))
    }

    /// Record a service-reported value into state.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.state.insert(key.to_owned(), value.into());
    }

    /// Drop a key from recorded state.
    pub fn unset(&mut self, key: &str) {
        self.state.remove(key);
    }

    pub(crate) fn set_config(&mut self, key: &str, value: Value) {
        self.config.insert(key.to_owned(), value);
    }

    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    pub fn state_value(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    pub fn config_keys(&self) -> Vec<String> {
        self.config.keys().cloned().collect()
    }

    /// Whether the configured value differs from recorded state. Keys
    /// absent from configuration never count as changed; computed values
    /// only move when the service moves them.
    pub fn has_change(&self, key: &str) -> bool {
        match self.config.get(key) {
            None => false,
            Some(wanted) => self.state.get(key) != Some(wanted),
        }
    }
}
