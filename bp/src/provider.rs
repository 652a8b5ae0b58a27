//! Value sources consulted by the plan builder

use eyre::{Context, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A read-only, name-keyed source of candidate values
pub trait ValueProvider {
    /// Value for `name`, if present
    fn get(&self, name: &str) -> Option<Value>;

    /// Every name this source can answer for
    fn keys(&self) -> BTreeSet<String>;
}

/// A value source backed by an in-memory map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapValueProvider {
    values: BTreeMap<String, Value>,
}

impl MapValueProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build from a JSON object; each top-level key becomes a name
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                values: map.into_iter().collect(),
            }),
            other => Err(eyre::eyre!("Expected a JSON object, got: {}", other)),
        }
    }

    /// Build from YAML text containing a top-level mapping
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content).context("Failed to parse YAML values")?;
        Self::from_json(value)
    }

    /// Load a YAML or JSON file of values
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).context(format!("Failed to read values file: {}", path.display()))?;
        let provider = if path.extension().is_some_and(|e| e == "json") {
            let value: Value = serde_json::from_str(&content).context("Failed to parse JSON values")?;
            Self::from_json(value)?
        } else {
            Self::from_yaml_str(&content)?
        };
        debug!(path = %path.display(), count = provider.len(), "Loaded value source");
        Ok(provider)
    }
}

impl ValueProvider for MapValueProvider {
    fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn keys(&self) -> BTreeSet<String> {
        self.values.keys().cloned().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for MapValueProvider
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<P: ValueProvider + ?Sized> ValueProvider for &P {
    fn get(&self, name: &str) -> Option<Value> {
        (**self).get(name)
    }

    fn keys(&self) -> BTreeSet<String> {
        (**self).keys()
    }
}
