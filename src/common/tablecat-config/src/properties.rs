use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::keys;

/// Per-call table properties for create and drop.
///
/// The addressing keys (see [`keys::RESERVED_TABLE_KEYS`]) select and describe
/// the table, every other key is stored verbatim on the created table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TablePropertySet(IndexMap<String, String>);

impl TablePropertySet {
    pub fn new() -> Self {
        Self::default()
    }

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

    pub fn location(&self) -> Option<&str> {
        self.get(keys::LOCATION)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(keys::NAME)
    }

    pub fn catalog_name(&self) -> Option<&str> {
        self.get(keys::CATALOG_NAME)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Properties to store on the table: every entry except the addressing keys.
    pub fn pass_through(&self) -> IndexMap<String, String> {
        self.0
            .iter()
            .filter(|(key, _)| !keys::is_reserved_table_key(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TablePropertySet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through_excludes_addressing_keys() {
        let props = TablePropertySet::new()
            .with(keys::NAME, "test.table")
            .with(keys::TABLE_SCHEMA, "{}")
            .with(keys::PARTITION_SPEC, "{}")
            .with("dummy", "test")
            .with(keys::CATALOG_NAME, "default")
            .with(keys::LOCATION, "/tmp/t")
            .with("write.format.default", "parquet");

        let pass_through = props.pass_through();
        assert_eq!(pass_through.len(), 2);
        assert_eq!(pass_through.get("dummy").map(String::as_str), Some("test"));
        assert_eq!(
            pass_through.keys().collect::<Vec<_>>(),
            vec!["dummy", "write.format.default"]
        );
    }

    #[test]
    fn test_addressing_accessors() {
        let props: TablePropertySet = [("location", "/tmp/t"), ("name", "")].into_iter().collect();
        assert_eq!(props.location(), Some("/tmp/t"));
        assert_eq!(props.name(), None);
        assert_eq!(props.catalog_name(), None);
    }
}
