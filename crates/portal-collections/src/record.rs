//! Records and field access.
//!
//! A [`Record`] is a mapping from string keys to [`Value`]s, the shape of a
//! single dataset or project entry. The [`FieldAccess`] trait is the seam the
//! collection functions read through, so they work on `Record`s and on any
//! caller type that can expose its fields by name.

use std::borrow::Cow;
use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::Value;

/// Trait for types whose fields can be read by name.
///
/// Missing fields read as [`Value::Undefined`].
///
/// # Manual Implementation
///
/// ```
/// use std::borrow::Cow;
/// use portal_collections::{FieldAccess, Value};
///
/// struct Dataset {
///     name: String,
///     downloads: u32,
/// }
///
/// impl FieldAccess for Dataset {
///     fn field_value(&self, key: &str) -> Cow<'_, Value> {
///         match key {
///             "name" => Cow::Owned(Value::from(self.name.as_str())),
///             "downloads" => Cow::Owned(Value::from(self.downloads)),
///             _ => Cow::Owned(Value::Undefined),
///         }
///     }
/// }
/// ```
pub trait FieldAccess {
    /// Returns the value stored under `key`, or `Undefined` if there is none.
    fn field_value(&self, key: &str) -> Cow<'_, Value>;
}

impl FieldAccess for Record {
    fn field_value(&self, key: &str) -> Cow<'_, Value> {
        self.get(key).map_or(Cow::Owned(Value::Undefined), Cow::Borrowed)
    }
}

impl<T: FieldAccess + ?Sized> FieldAccess for &T {
    fn field_value(&self, key: &str) -> Cow<'_, Value> {
        (**self).field_value(key)
    }
}

impl<T: FieldAccess + ?Sized> FieldAccess for Box<T> {
    fn field_value(&self, key: &str) -> Cow<'_, Value> {
        (**self).field_value(key)
    }
}

impl<T: FieldAccess + ?Sized> FieldAccess for std::sync::Arc<T> {
    fn field_value(&self, key: &str) -> Cow<'_, Value> {
        (**self).field_value(key)
    }
}

/// A single data item: string keys mapped to values.
///
/// Keys are kept in sorted order so iteration and serialization are
/// deterministic.
///
/// # Example
///
/// ```
/// use portal_collections::{Record, Value};
///
/// let dataset = Record::new()
///     .with("id", 1)
///     .with("type", "survey");
///
/// assert_eq!(dataset.value("type"), Value::from("survey"));
/// assert!(dataset.value("missing").is_undefined());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Adds a field, returning the record for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a field, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Returns a reference to the value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the value under `key`, or `Undefined` when absent.
    pub fn value(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Returns `true` if the record has a field named `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the field names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }
}

/// Builds a [`Record`] from `key => value` pairs.
///
/// ```
/// use portal_collections::{record, Value};
///
/// let project = record! { "id" => 3, "title" => "Soil survey" };
/// assert_eq!(project.value("id"), Value::from(3));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Record::new()$(.with($key, $value))+
    };
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

/// `Undefined` fields are dropped, as a JSON encoder would.
impl From<&Record> for serde_json::Map<String, serde_json::Value> {
    fn from(record: &Record) -> Self {
        record
            .iter()
            .filter(|(_, value)| !value.is_undefined())
            .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
            .collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().filter(|(_, value)| !value.is_undefined()))
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Map::<String, serde_json::Value>::deserialize(deserializer).map(Record::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_builder_and_lookup() {
        let record = Record::new().with("name", "soil").with("size", 12);

        assert_eq!(record.len(), 2);
        assert!(record.contains_key("name"));
        assert_eq!(record.get("size"), Some(&Value::from(12)));
        assert!(record.get("missing").is_none());
        assert!(record.value("missing").is_undefined());
    }

    #[test]
    fn insert_replaces() {
        let mut record = Record::new();
        assert!(record.insert("k", 1).is_none());
        assert_eq!(record.insert("k", 2), Some(Value::from(1)));
        assert_eq!(record.value("k"), Value::from(2));
        assert_eq!(record.remove("k"), Some(Value::from(2)));
        assert!(record.is_empty());
    }

    #[test]
    fn record_macro() {
        let record = record! { "b" => true, "a" => "x" };
        assert_eq!(record.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert!(record! {}.is_empty());
    }

    #[test]
    fn field_access_borrows_present_values() {
        let record = record! { "k" => "v" };
        assert!(matches!(record.field_value("k"), Cow::Borrowed(_)));
        assert!(record.field_value("nope").is_undefined());
    }

    #[test]
    fn serde_skips_undefined() {
        let record = record! { "a" => 1, "gone" => Value::Undefined, "n" => Value::Null };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "a": 1, "n": null }));
    }

    #[test]
    fn deserialize_from_json() {
        let record: Record =
            serde_json::from_str(r#"{"id": 4, "type": "x", "tags": ["a"]}"#).unwrap();
        assert_eq!(record.value("id"), Value::from(4));
        assert_eq!(record.value("type"), Value::from("x"));
        assert_eq!(record.value("tags").as_list().map(<[Value]>::len), Some(1));
    }
}
