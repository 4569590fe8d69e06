//! Value converter registry
//!
//! A converter takes over reading and writing for specific Rust types, in
//! place of their serde implementations. The engine asks the registry before
//! falling back to serde, so a converter can give a type a different wire form
//! or make its reading depend on the active settings.
//!
//! ## Contract
//!
//! - `can_convert` is a pure function of the `TypeId`.
//! - `read` must return a box holding exactly the type it was asked for.
//!   The engine reports a mismatch as `Error::InvalidOperation`.
//! - `write` receives a value of a type it claimed.
//!
//! Converters are shared across threads and must be stateless, or at least
//! internally synchronized.

use crate::config::SerializerSettings;
use propbag_core::Result;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Per-type conversion hook.
pub trait ValueConverter: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Whether this converter handles values of the given type
    fn can_convert(&self, type_id: TypeId) -> bool;

    /// Read a stored value as the type identified by `type_id`
    fn read(
        &self,
        type_id: TypeId,
        value: &Value,
        settings: &SerializerSettings,
    ) -> Result<Box<dyn Any>>;

    /// Write a value of a claimed type to its stored form
    fn write(&self, value: &dyn Any, settings: &SerializerSettings) -> Result<Value>;
}

/// Ordered set of converters. Lookup prefers the most recent registration.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn ValueConverter>>,
}

impl ConverterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the standard converters
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(crate::converters::DateTimeOffsetConverter));
        registry.register(Arc::new(crate::converters::CultureConverter));
        registry
    }

    /// Add a converter. Registering a second converter with the same name
    /// replaces the first.
    pub fn register(&mut self, converter: Arc<dyn ValueConverter>) {
        self.converters.retain(|c| c.name() != converter.name());
        self.converters.push(converter);
    }

    /// Find the converter for a type
    pub fn find(&self, type_id: TypeId) -> Option<&Arc<dyn ValueConverter>> {
        self.converters
            .iter()
            .rev()
            .find(|c| c.can_convert(type_id))
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    /// Number of registered converters
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// True if no converter is registered
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("converters", &self.names())
            .finish()
    }
}
