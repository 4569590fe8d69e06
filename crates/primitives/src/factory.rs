//! PropertyBagFactory: building bags and modified copies
//!
//! ## Design
//!
//! The factory is the only way to construct a bag from caller data. It holds
//! one `JsonEngine`, so every bag it creates reads and writes with the same
//! settings.
//!
//! ## Copy-on-Write
//!
//! `create_modified` never touches its input. It projects the input with
//! `as_dictionary`, merges the request into that projection and builds a new
//! bag:
//!
//! - existing keys keep their position; updated keys take the new value there
//! - removed keys are dropped
//! - keys new to the bag are appended in the order they were set
//!
//! Removing a key that is not present is not an error. Naming the same key
//! in both the set and the remove part is, whether or not the key exists.

use crate::bag::PropertyBag;
use crate::value::PropertyValue;
use propbag_core::{Error, Result};
use propbag_engine::{JsonEngine, SerializerSettings};
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::HashSet;
use tracing::debug;

/// Stored form of a caller value.
///
/// Bags and projected values are copied structurally so that their nulls and
/// nesting survive unchanged; everything else goes through the engine.
fn wrap<V>(engine: &JsonEngine, value: &V) -> Result<Value>
where
    V: Serialize + 'static,
{
    let any = value as &dyn Any;
    if let Some(bag) = any.downcast_ref::<PropertyBag>() {
        return Ok(bag.to_document());
    }
    if let Some(projected) = any.downcast_ref::<PropertyValue>() {
        return Ok(projected.to_tree());
    }
    engine.to_tree(value)
}

// =============================================================================
// PropertyValues
// =============================================================================

/// Ordered set of values waiting to become a bag
///
/// Obtained from [`PropertyBagFactory::values`]. Consumed by `build`, so a
/// half-filled set is never visible as a bag.
#[derive(Debug, Clone)]
pub struct PropertyValues {
    engine: JsonEngine,
    entries: Map<String, Value>,
}

impl PropertyValues {
    fn new(engine: JsonEngine) -> Self {
        Self {
            engine,
            entries: Map::new(),
        }
    }

    /// Set `key` to `value`
    ///
    /// An existing key keeps its position and takes the new value.
    /// `None` and `()` are stored as `null`.
    pub fn set<K, V>(&mut self, key: K, value: V) -> Result<&mut Self>
    where
        K: Into<String>,
        V: Serialize + 'static,
    {
        let stored = wrap(&self.engine, &value)?;
        self.entries.insert(key.into(), stored);
        Ok(self)
    }

    /// Set `key` to `null`
    pub fn set_null(&mut self, key: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), Value::Null);
        self
    }

    /// Drop a pending key. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        if !self.entries.contains_key(key) {
            return false;
        }
        self.entries = std::mem::take(&mut self.entries)
            .into_iter()
            .filter(|(k, _)| k != key)
            .collect();
        true
    }

    /// True if `key` has been set
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Pending keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a bag from the pending entries
    pub fn build(self) -> Result<PropertyBag> {
        self.engine.validate_object(&self.entries)?;
        Ok(PropertyBag::from_parts(self.entries, self.engine))
    }
}

// =============================================================================
// ModificationRequest
// =============================================================================

/// Changes to apply in [`PropertyBagFactory::create_modified`]
///
/// At least one part must be given.
#[derive(Debug, Clone, Default)]
pub struct ModificationRequest {
    set_or_add: Option<PropertyValues>,
    remove: Option<Vec<String>>,
}

impl ModificationRequest {
    /// Empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Values to set or add
    pub fn with_set_or_add(mut self, values: PropertyValues) -> Self {
        self.set_or_add = Some(values);
        self
    }

    /// Keys to remove
    pub fn with_remove<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove = Some(keys.into_iter().map(Into::into).collect());
        self
    }
}

// =============================================================================
// PropertyBagFactory
// =============================================================================

/// Creates property bags
///
/// # Example
///
/// ```ignore
/// use propbag::{ModificationRequest, PropertyBagFactory};
///
/// let factory = PropertyBagFactory::default();
/// let bag = factory.parse(r#"{"a":1,"b":2}"#)?;
///
/// let mut add = factory.values();
/// add.set("c", 1)?;
/// let modified = factory.create_modified(
///     &bag,
///     ModificationRequest::new().with_set_or_add(add).with_remove(["a"]),
/// )?;
/// assert_eq!(modified.to_json_string()?, r#"{"b":2,"c":1}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyBagFactory {
    engine: JsonEngine,
}

impl PropertyBagFactory {
    /// Create a factory for the given settings
    pub fn new(settings: SerializerSettings) -> Self {
        Self {
            engine: JsonEngine::new(settings),
        }
    }

    /// Create a factory sharing an existing engine
    pub fn with_engine(engine: JsonEngine) -> Self {
        Self { engine }
    }

    /// The factory's engine
    pub fn engine(&self) -> &JsonEngine {
        &self.engine
    }

    /// The factory's settings
    pub fn settings(&self) -> &SerializerSettings {
        self.engine.settings()
    }

    /// An empty bag bound to this factory's engine
    pub fn empty(&self) -> PropertyBag {
        PropertyBag::from_parts(Map::new(), self.engine.clone())
    }

    /// An empty value set for building a bag
    pub fn values(&self) -> PropertyValues {
        PropertyValues::new(self.engine.clone())
    }

    /// Create a bag from key/value pairs
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if a key repeats, and
    /// `Error::Serialization` if a value cannot be written.
    pub fn create<I, K, V>(&self, entries: I) -> Result<PropertyBag>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize + 'static,
    {
        let mut values = self.values();
        for (key, value) in entries {
            let key = key.into();
            if values.contains_key(&key) {
                return Err(Error::invalid_argument(format!(
                    "property '{}' is given more than once",
                    key
                )));
            }
            values.set(key, value)?;
        }
        let bag = values.build()?;
        debug!(target: "propbag::factory", entries = bag.len(), "Created property bag");
        Ok(bag)
    }

    /// Create a bag by filling a value set in a callback
    pub fn create_with<F>(&self, build: F) -> Result<PropertyBag>
    where
        F: FnOnce(&mut PropertyValues) -> Result<()>,
    {
        let mut values = self.values();
        build(&mut values)?;
        let bag = values.build()?;
        debug!(target: "propbag::factory", entries = bag.len(), "Created property bag");
        Ok(bag)
    }

    /// Wrap a parsed document
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the document is not an object, and
    /// `Error::Limit` if it exceeds the configured limits.
    pub fn create_from_document(&self, document: Value) -> Result<PropertyBag> {
        match document {
            Value::Object(entries) => {
                self.engine.validate_object(&entries)?;
                debug!(
                    target: "propbag::factory",
                    entries = entries.len(),
                    "Created property bag from document"
                );
                Ok(PropertyBag::from_parts(entries, self.engine.clone()))
            }
            other => Err(Error::invalid_argument(format!(
                "a property bag document must be an object, found {}",
                propbag_core::EntryType::of(&other)
            ))),
        }
    }

    /// Parse JSON text into a bag
    pub fn parse(&self, text: &str) -> Result<PropertyBag> {
        let document = self.engine.parse(text)?;
        self.create_from_document(document)
    }

    /// Build a modified copy of `input`
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if neither part of the request is given, or
    ///   if a key is both set and removed
    /// - any error from projecting `input`
    pub fn create_modified(
        &self,
        input: &PropertyBag,
        request: ModificationRequest,
    ) -> Result<PropertyBag> {
        let ModificationRequest { set_or_add, remove } = request;
        if set_or_add.is_none() && remove.is_none() {
            return Err(Error::invalid_argument(
                "a modification needs values to set or keys to remove",
            ));
        }

        let updates = set_or_add.map(|v| v.entries).unwrap_or_default();
        let removed: HashSet<String> = remove.unwrap_or_default().into_iter().collect();

        let conflicts: Vec<&str> = updates
            .keys()
            .filter(|k| removed.contains(k.as_str()))
            .map(String::as_str)
            .collect();
        if !conflicts.is_empty() {
            return Err(Error::invalid_argument(format!(
                "properties {:?} are both set and removed",
                conflicts
            )));
        }

        // Projection surfaces inconsistent entries; untouched values are
        // carried over from the stored tree as-is.
        input.as_dictionary()?;
        let mut merged = Map::new();
        for (key, value) in input.as_object() {
            if removed.contains(key) {
                continue;
            }
            let stored = match updates.get(key) {
                Some(updated) => updated.clone(),
                None => value.clone(),
            };
            merged.insert(key.clone(), stored);
        }
        for (key, value) in updates {
            if !merged.contains_key(&key) {
                merged.insert(key, value);
            }
        }

        self.engine.validate_object(&merged)?;
        debug!(
            target: "propbag::factory",
            before = input.len(),
            after = merged.len(),
            removed = removed.len(),
            "Created modified property bag"
        );
        Ok(PropertyBag::from_parts(merged, self.engine.clone()))
    }

    /// Build a modified copy of `input`, filling the set part in a callback
    pub fn create_modified_with<F, I, S>(
        &self,
        input: &PropertyBag,
        set_or_add: F,
        remove: I,
    ) -> Result<PropertyBag>
    where
        F: FnOnce(&mut PropertyValues) -> Result<()>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = self.values();
        set_or_add(&mut values)?;
        self.create_modified(
            input,
            ModificationRequest::new()
                .with_set_or_add(values)
                .with_remove(remove),
        )
    }
}
