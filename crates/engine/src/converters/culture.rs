//! Culture converter
//!
//! `CultureName` is stored as its canonical name; `Option<CultureName>`
//! additionally maps `None` to `null`.

use crate::config::SerializerSettings;
use crate::converter::ValueConverter;
use propbag_core::{CultureName, Error, Result};
use serde_json::Value;
use std::any::{Any, TypeId};

/// Converter for culture names.
#[derive(Debug, Clone, Copy, Default)]
pub struct CultureConverter;

fn read_name(value: &Value) -> Result<CultureName> {
    match value {
        Value::String(s) => CultureName::new(s).map_err(|e| Error::Serialization {
            message: format!("invalid culture name '{}': {}", s, e),
            source: Some(Box::new(e)),
        }),
        other => Err(Error::serialization(format!(
            "expected a culture name string, found {}",
            other
        ))),
    }
}

impl ValueConverter for CultureConverter {
    fn name(&self) -> &'static str {
        "culture"
    }

    fn can_convert(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<CultureName>() || type_id == TypeId::of::<Option<CultureName>>()
    }

    fn read(
        &self,
        type_id: TypeId,
        value: &Value,
        _settings: &SerializerSettings,
    ) -> Result<Box<dyn Any>> {
        if type_id == TypeId::of::<Option<CultureName>>() {
            if value.is_null() {
                return Ok(Box::new(None::<CultureName>));
            }
            return Ok(Box::new(Some(read_name(value)?)));
        }
        Ok(Box::new(read_name(value)?))
    }

    fn write(&self, value: &dyn Any, _settings: &SerializerSettings) -> Result<Value> {
        if let Some(name) = value.downcast_ref::<CultureName>() {
            return Ok(Value::String(name.as_str().to_string()));
        }
        if let Some(name) = value.downcast_ref::<Option<CultureName>>() {
            return Ok(name
                .as_ref()
                .map_or(Value::Null, |n| Value::String(n.as_str().to_string())));
        }
        Err(Error::invalid_operation(
            "culture converter asked to write an unsupported type",
        ))
    }
}
