//! JSON document engine
//!
//! `JsonEngine` pairs `serde_json` with one `SerializerSettings` value. It is
//! the single place that decides how a Rust value becomes a stored tree and
//! back:
//!
//! | Direction | Order of attempts |
//! |-----------|-------------------|
//! | `to_tree` | native tree (deep copy), registered converter, serde |
//! | `from_tree` | registered converter, serde |
//!
//! Engines are cheap to clone (settings are behind an `Arc`).

use crate::config::{Formatting, NullValueHandling, SerializerSettings};
use once_cell::sync::Lazy;
use propbag_core::{limits, Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::{type_name, Any, TypeId};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{trace, warn};

static DEFAULT_ENGINE: Lazy<JsonEngine> =
    Lazy::new(|| JsonEngine::new(SerializerSettings::default()));

/// Serializer bound to explicit settings.
#[derive(Debug, Clone)]
pub struct JsonEngine {
    settings: Arc<SerializerSettings>,
}

impl Default for JsonEngine {
    fn default() -> Self {
        DEFAULT_ENGINE.clone()
    }
}

impl JsonEngine {
    /// Create an engine for the given settings
    pub fn new(settings: SerializerSettings) -> Self {
        JsonEngine {
            settings: Arc::new(settings),
        }
    }

    /// Shared engine built from default settings
    pub fn shared_default() -> &'static JsonEngine {
        &DEFAULT_ENGINE
    }

    /// The active settings
    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Parse JSON text into a tree, enforcing the document limits
    pub fn parse(&self, text: &str) -> Result<Value> {
        let value: Value = serde_json::from_str(text)?;
        self.validate(&value)?;
        Ok(value)
    }

    /// Check a tree against the configured limits
    pub fn validate(&self, value: &Value) -> Result<()> {
        limits::validate(
            value,
            self.settings.max_depth,
            self.settings.max_array_size,
        )?;
        Ok(())
    }

    /// Check an object against the configured limits
    pub fn validate_object(&self, map: &Map<String, Value>) -> Result<()> {
        limits::validate_object(
            map,
            self.settings.max_depth,
            self.settings.max_array_size,
        )?;
        Ok(())
    }

    /// Apply output-side settings to a tree
    ///
    /// Borrows when nothing needs to change.
    pub fn prepare_output<'a>(&self, value: &'a Value) -> Cow<'a, Value> {
        match self.settings.null_value_handling {
            NullValueHandling::Include => Cow::Borrowed(value),
            NullValueHandling::Ignore => Cow::Owned(strip_nulls(value)),
        }
    }

    /// Apply output-side settings to an object
    pub fn prepare_object<'a>(&self, map: &'a Map<String, Value>) -> Cow<'a, Map<String, Value>> {
        match self.settings.null_value_handling {
            NullValueHandling::Include => Cow::Borrowed(map),
            NullValueHandling::Ignore => Cow::Owned(strip_object_nulls(map)),
        }
    }

    /// Write a tree as text, honouring null handling and formatting
    pub fn stringify(&self, value: &Value) -> Result<String> {
        let value = self.prepare_output(value);
        let text = match self.settings.formatting {
            Formatting::Compact => serde_json::to_string(value.as_ref())?,
            Formatting::Indented => serde_json::to_string_pretty(value.as_ref())?,
        };
        Ok(text)
    }

    // =========================================================================
    // Trees
    // =========================================================================

    /// Convert a value to its stored tree
    pub fn to_tree<T>(&self, value: &T) -> Result<Value>
    where
        T: Serialize + 'static,
    {
        let any = value as &dyn Any;
        if let Some(tree) = any.downcast_ref::<Value>() {
            return Ok(tree.clone());
        }
        if let Some(map) = any.downcast_ref::<Map<String, Value>>() {
            return Ok(Value::Object(map.clone()));
        }
        if let Some(converter) = self.settings.converters().find(TypeId::of::<T>()) {
            trace!(
                target: "propbag::engine",
                converter = converter.name(),
                type_name = type_name::<T>(),
                "Writing through converter"
            );
            return converter.write(any, &self.settings);
        }
        Ok(serde_json::to_value(value)?)
    }

    /// Convert a stored tree to a value of type `T`
    pub fn from_tree<T>(&self, value: &Value) -> Result<T>
    where
        T: DeserializeOwned + 'static,
    {
        if let Some(converter) = self.settings.converters().find(TypeId::of::<T>()) {
            trace!(
                target: "propbag::engine",
                converter = converter.name(),
                type_name = type_name::<T>(),
                "Reading through converter"
            );
            let out = converter.read(TypeId::of::<T>(), value, &self.settings)?;
            return out.downcast::<T>().map(|b| *b).map_err(|_| {
                warn!(
                    target: "propbag::engine",
                    converter = converter.name(),
                    type_name = type_name::<T>(),
                    "Converter returned a value of the wrong type"
                );
                Error::invalid_operation(format!(
                    "converter '{}' did not produce a {}",
                    converter.name(),
                    type_name::<T>()
                ))
            });
        }
        Ok(T::deserialize(value)?)
    }
}

/// Remove null-valued object properties at every depth. Array elements are
/// kept, since dropping them would shift indices.
fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(strip_object_nulls(map)),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        other => other.clone(),
    }
}

fn strip_object_nulls(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), strip_nulls(v)))
        .collect()
}
