//! Support for capturing other fields
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{collections::BTreeMap, ops::Deref};

/// Captures the fields of a node response that have no typed counterpart.
///
/// Node versions add and rename fields freely; keeping the unknown ones means a response
/// deserialized into one of the typed views serializes back to the same JSON object.
///
/// This type is supposed to be used with [`#[serde(flatten)`](https://serde.rs/field-attrs.html#flatten)
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtherFields {
    /// Contains all unknown fields
    inner: BTreeMap<String, serde_json::Value>,
}

// === impl OtherFields ===

impl OtherFields {
    /// Returns the deserialized value of the field, if it exists
    ///
    /// ```
    /// # use antelope_core::types::OtherFields;
    /// fn d(other: OtherFields) {
    ///     let ram_usage = other.get_deserialized::<i64>("ram_usage").unwrap().unwrap();
    /// # }
    /// ```
    pub fn get_deserialized<V: DeserializeOwned>(
        &self,
        key: impl AsRef<str>,
    ) -> Option<serde_json::Result<V>> {
        self.inner.get(key.as_ref()).cloned().map(serde_json::from_value)
    }

    /// Inserts a raw value, returning the previous one
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Option<serde_json::Value> {
        self.inner.insert(key.into(), value)
    }
}

impl Deref for OtherFields {
    type Target = BTreeMap<String, serde_json::Value>;

    #[inline]
    fn deref(&self) -> &BTreeMap<String, serde_json::Value> {
        self.as_ref()
    }
}

impl AsRef<BTreeMap<String, serde_json::Value>> for OtherFields {
    fn as_ref(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.inner
    }
}

impl IntoIterator for OtherFields {
    type Item = (String, serde_json::Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, serde_json::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Partial {
        known: u32,
        #[serde(flatten)]
        other: OtherFields,
    }

    #[test]
    fn keeps_unknown_fields() {
        let raw = json!({"known": 1, "extra": "value", "nested": {"a": [1, 2]}});
        let partial: Partial = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(partial.known, 1);
        assert_eq!(partial.other.get_deserialized::<String>("extra").unwrap().unwrap(), "value");
        assert_eq!(serde_json::to_value(&partial).unwrap(), raw);
    }
}
