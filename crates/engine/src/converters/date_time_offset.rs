//! Timestamp-with-offset converter
//!
//! Claims `DateTimeOffset` and `chrono::DateTime<FixedOffset>`. Both are
//! written in the two-field object form:
//!
//! ```json
//! {"dateTimeOffset":"2018-04-15T09:09:31.2340000+01:00","unixTime":1523779771234}
//! ```
//!
//! Reading accepts that object, or a bare ISO-8601 string when the settings
//! leave date strings alone (`date_parse_handling = "none"`). Under
//! `date_time` the engine owns bare date strings, and reinterpreting one here
//! would disagree with it, so the read fails instead.

use crate::config::{DateParseHandling, SerializerSettings};
use crate::converter::ValueConverter;
use chrono::{DateTime, FixedOffset};
use propbag_core::{DateTimeOffset, Error, Result};
use serde_json::Value;
use std::any::{Any, TypeId};

/// Converter for offset-aware instants.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeOffsetConverter;

impl DateTimeOffsetConverter {
    fn read_instant(value: &Value, settings: &SerializerSettings) -> Result<DateTimeOffset> {
        if value.is_string() && settings.date_parse_handling == DateParseHandling::DateTime {
            return Err(Error::serialization(
                "bare date string cannot be read as a timestamp while date_parse_handling is date_time; store the object form instead",
            ));
        }
        DateTimeOffset::from_wire(value)
    }
}

impl ValueConverter for DateTimeOffsetConverter {
    fn name(&self) -> &'static str {
        "date_time_offset"
    }

    fn can_convert(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<DateTimeOffset>()
            || type_id == TypeId::of::<DateTime<FixedOffset>>()
    }

    fn read(
        &self,
        type_id: TypeId,
        value: &Value,
        settings: &SerializerSettings,
    ) -> Result<Box<dyn Any>> {
        let instant = Self::read_instant(value, settings)?;
        if type_id == TypeId::of::<DateTime<FixedOffset>>() {
            Ok(Box::new(instant.into_inner()))
        } else {
            Ok(Box::new(instant))
        }
    }

    fn write(&self, value: &dyn Any, _settings: &SerializerSettings) -> Result<Value> {
        if let Some(instant) = value.downcast_ref::<DateTimeOffset>() {
            return Ok(instant.to_wire());
        }
        if let Some(dt) = value.downcast_ref::<DateTime<FixedOffset>>() {
            return Ok(DateTimeOffset::from(*dt).to_wire());
        }
        Err(Error::invalid_operation(
            "date_time_offset converter asked to write an unsupported type",
        ))
    }
}
