//! Stored value to requested type
//!
//! Called by `PropertyBag::try_get` for every present, non-null entry. Three
//! paths are tried in order:
//!
//! 1. **Structural**: the caller asked for the engine's own tree type
//!    (`Value`, or `Map` / `Vec<Value>` when the shape matches). The
//!    sub-tree is deep-copied, since the stored one is shared.
//! 2. **Tag-directed**: `PropertyBag` from an object, `Vec<PropertyValue>`
//!    from an array, and `PropertyValue` from anything are built directly,
//!    keeping the parent's engine.
//! 3. **General**: `JsonEngine::from_tree`, which tries registered converters
//!    and then serde.
//!
//! Nothing is cached; each call converts afresh.

use crate::bag::PropertyBag;
use crate::value::PropertyValue;
use propbag_core::{Error, Result};
use propbag_engine::JsonEngine;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::any::{type_name, Any, TypeId};
use tracing::trace;

pub(crate) fn coerce<T>(key: &str, value: &Value, engine: &JsonEngine) -> Result<T>
where
    T: DeserializeOwned + 'static,
{
    if let Some(out) = structural::<T>(value)? {
        trace!(target: "propbag::coercion", key, path = "structural", "Coerced property");
        return Ok(out);
    }
    if let Some(out) = tag_directed::<T>(value, engine)? {
        trace!(target: "propbag::coercion", key, path = "tag", "Coerced property");
        return Ok(out);
    }
    trace!(
        target: "propbag::coercion",
        key,
        path = "general",
        type_name = type_name::<T>(),
        "Coerced property"
    );
    engine.from_tree::<T>(value).map_err(|e| match e {
        Error::Serialization {
            source: Some(source),
            ..
        } => Error::conversion(key, type_name::<T>(), source),
        Error::Serialization { message, .. } => {
            Error::conversion(key, type_name::<T>(), message)
        }
        other => other,
    })
}

fn structural<T: 'static>(value: &Value) -> Result<Option<T>> {
    let wanted = TypeId::of::<T>();
    if wanted == TypeId::of::<Value>() {
        return cast(value.clone()).map(Some);
    }
    match value {
        Value::Object(map) if wanted == TypeId::of::<Map<String, Value>>() => {
            cast(map.clone()).map(Some)
        }
        Value::Array(items) if wanted == TypeId::of::<Vec<Value>>() => {
            cast(items.clone()).map(Some)
        }
        _ => Ok(None),
    }
}

fn tag_directed<T: 'static>(value: &Value, engine: &JsonEngine) -> Result<Option<T>> {
    let wanted = TypeId::of::<T>();
    if wanted == TypeId::of::<PropertyValue>() {
        return cast(PropertyValue::from_stored(value, engine)?).map(Some);
    }
    match value {
        Value::Object(map) if wanted == TypeId::of::<PropertyBag>() => {
            cast(PropertyBag::from_parts(map.clone(), engine.clone())).map(Some)
        }
        Value::Array(items) if wanted == TypeId::of::<Vec<PropertyValue>>() => {
            let projected = items
                .iter()
                .map(|item| PropertyValue::from_stored(item, engine))
                .collect::<Result<Vec<_>>>()?;
            cast(projected).map(Some)
        }
        _ => Ok(None),
    }
}

/// Move a value into `T` after the caller has checked the `TypeId`s match
fn cast<T: 'static, U: 'static>(value: U) -> Result<T> {
    let boxed: Box<dyn Any> = Box::new(value);
    boxed.downcast::<T>().map(|b| *b).map_err(|_| {
        Error::invalid_operation(format!(
            "{} is not {}",
            type_name::<U>(),
            type_name::<T>()
        ))
    })
}
