use common_error::{TablecatError, TablecatResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Environment variables with this prefix are read by [`ConfigurationView::from_env`].
pub const CONF_ENV_PREFIX: &str = "TABLECAT_CONF_";

/// Engine/session configuration, an ordered `key -> value` map.
///
/// The catalog core only reads a configuration view. Values which are empty
/// strings are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationView(IndexMap<String, String>);

impl ConfigurationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, or `None` if it is unset or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns every non-empty entry whose key starts with `prefix`, with the prefix stripped.
    pub fn with_prefix(&self, prefix: &str) -> IndexMap<String, String> {
        self.iter()
            .filter(|(_, value)| !value.is_empty())
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Parses a flat JSON object of string values.
    pub fn from_json(input: &str) -> TablecatResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Reads the configuration from `TABLECAT_CONF_*` environment variables.
    ///
    /// `TABLECAT_CONF_ICEBERG__CATALOG__TYPE=hive` becomes `iceberg.catalog.type=hive`.
    pub fn from_env() -> TablecatResult<Self> {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> TablecatResult<Self> {
        let mut conf = Self::new();
        for (name, value) in vars {
            if let Some(rest) = name.strip_prefix(CONF_ENV_PREFIX) {
                if rest.is_empty() {
                    return Err(TablecatError::ValueError(format!(
                        "Invalid configuration variable: {name}"
                    )));
                }
                conf.set(key_from_env_name(rest), value);
            }
        }
        Ok(conf)
    }
}

fn key_from_env_name(name: &str) -> String {
    name.to_lowercase().replace("__", ".").replace('_', "-")
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigurationView {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
