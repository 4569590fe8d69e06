//! PropertyBag: immutable, lazily-typed view over a JSON object
//!
//! ## Design
//!
//! A bag holds the parsed object and the engine it was created with. Values
//! stay as JSON trees until a caller asks for one with a concrete type, and
//! the conversion runs again on every read; nothing is cached.
//!
//! ## Thread Safety
//!
//! `PropertyBag` is `Send + Sync`. The object sits behind an `Arc`, so
//! clones share storage and concurrent readers need no locking. There is no
//! mutation API: modified copies come from
//! [`PropertyBagFactory::create_modified`](crate::PropertyBagFactory::create_modified).
//!
//! ## API
//!
//! - **Typed reads**: `try_get`, `get`
//! - **Shape**: `contains_key`, `len`, `is_empty`, `keys`, `entries`, `entry_type`
//! - **Projection**: `as_dictionary`, `as_dictionary_recursive`
//! - **Document access**: `as_object`, `to_document`, `to_json_string`

use crate::coercion;
use crate::introspection::Entries;
use crate::lookup::Lookup;
use crate::value::{PropertyMap, PropertyValue};
use propbag_core::{EntryType, Error, Result};
use propbag_engine::JsonEngine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Immutable property bag
///
/// # Example
///
/// ```ignore
/// use propbag::{Lookup, PropertyBagFactory};
///
/// let factory = PropertyBagFactory::default();
/// let bag = factory.create([("hello", "world")])?;
///
/// assert_eq!(bag.try_get::<String>("hello")?, Lookup::Found("world".to_string()));
/// assert_eq!(bag.try_get::<String>("goodbye")?, Lookup::Absent);
/// ```
#[derive(Clone)]
pub struct PropertyBag {
    entries: Arc<Map<String, Value>>,
    engine: JsonEngine,
}

impl PropertyBag {
    pub(crate) fn from_parts(entries: Map<String, Value>, engine: JsonEngine) -> Self {
        Self {
            entries: Arc::new(entries),
            engine,
        }
    }

    /// A bag with no entries, bound to the default engine
    pub fn empty() -> Self {
        Self::from_parts(Map::new(), JsonEngine::default())
    }

    /// The engine this bag reads and writes with
    pub fn engine(&self) -> &JsonEngine {
        &self.engine
    }

    // ========== Typed Reads ==========

    /// Read `key` as `T`
    ///
    /// Absent keys and stored nulls are ordinary outcomes. Any other stored
    /// value is converted on this call.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` naming the key and type when the stored
    /// value cannot be converted to `T`.
    pub fn try_get<T>(&self, key: &str) -> Result<Lookup<T>>
    where
        T: DeserializeOwned + 'static,
    {
        match self.entries.get(key) {
            None => Ok(Lookup::Absent),
            Some(Value::Null) => Ok(Lookup::Null),
            Some(value) => coercion::coerce(key, value, &self.engine).map(Lookup::Found),
        }
    }

    /// Read `key` as `T`, folding absent and null into `None`
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + 'static,
    {
        self.try_get(key).map(Lookup::into_option)
    }

    // ========== Shape ==========

    /// True if the key is present (including present with null)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the bag has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, tag)` for every entry, in insertion order
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(&self.entries)
    }

    /// Tag of a single entry
    pub fn entry_type(&self, key: &str) -> Option<EntryType> {
        self.entries.get(key).map(EntryType::of)
    }

    // ========== Projection ==========

    /// Project every entry to the type its tag implies
    ///
    /// Nested objects become [`PropertyValue::Bag`]; stored nulls become
    /// [`PropertyValue::Null`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidOperation` if an entry cannot be read as the
    /// type its own tag implies.
    pub fn as_dictionary(&self) -> Result<PropertyMap> {
        let mut out = PropertyMap::with_capacity(self.len());
        for (key, tag) in self.entries() {
            let value = self.project_entry(key, tag).map_err(|e| {
                Error::invalid_operation(format!(
                    "entry '{}' tagged {} could not be read as its tag type: {}",
                    key, tag, e
                ))
            })?;
            out.insert(key.to_string(), value);
        }
        Ok(out)
    }

    /// Project every entry, replacing nested bags with flattened maps at
    /// every depth
    pub fn as_dictionary_recursive(&self) -> Result<PropertyMap> {
        self.as_dictionary()?
            .into_iter()
            .map(|(key, value)| Ok((key, flatten(value)?)))
            .collect()
    }

    fn project_entry(&self, key: &str, tag: EntryType) -> Result<PropertyValue> {
        let lookup = match tag {
            EntryType::Null => return Ok(PropertyValue::Null),
            EntryType::String => self.try_get::<String>(key)?.map(PropertyValue::String),
            EntryType::Boolean => self.try_get::<bool>(key)?.map(PropertyValue::Boolean),
            EntryType::Integer => self.try_get::<i64>(key)?.map(PropertyValue::Integer),
            EntryType::Decimal => self.try_get::<f64>(key)?.map(PropertyValue::Decimal),
            EntryType::Array => self
                .try_get::<Vec<PropertyValue>>(key)?
                .map(PropertyValue::Array),
            EntryType::Object => self.try_get::<PropertyBag>(key)?.map(PropertyValue::Bag),
        };
        match lookup {
            Lookup::Found(value) => Ok(value),
            Lookup::Absent | Lookup::Null => Err(Error::invalid_operation(format!(
                "no {} value found",
                tag
            ))),
        }
    }

    // ========== Document Access ==========

    /// Borrow the backing object
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Deep copy of the backing object as a JSON value
    pub fn to_document(&self) -> Value {
        Value::Object((*self.entries).clone())
    }

    /// Write the bag as JSON text using the bag's settings
    pub fn to_json_string(&self) -> Result<String> {
        self.engine.stringify(&self.to_document())
    }
}

fn flatten(value: PropertyValue) -> Result<PropertyValue> {
    Ok(match value {
        PropertyValue::Bag(bag) => PropertyValue::Map(bag.as_dictionary_recursive()?),
        PropertyValue::Array(items) => PropertyValue::Array(
            items.into_iter().map(flatten).collect::<Result<_>>()?,
        ),
        other => other,
    })
}

impl Default for PropertyBag {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for PropertyBag {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries) || self.entries == other.entries
    }
}

impl fmt::Debug for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl fmt::Display for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json_string() {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Serialize for PropertyBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.engine.prepare_object(&self.entries).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Map::<String, Value>::deserialize(deserializer)?;
        let engine = JsonEngine::default();
        engine
            .validate_object(&entries)
            .map_err(serde::de::Error::custom)?;
        Ok(PropertyBag::from_parts(entries, engine))
    }
}
