//! Offset-aware instant type
//!
//! A `DateTimeOffset` is a point in time together with the UTC offset it was
//! observed in. Bags store it as a two-field object so that readers that only
//! care about ordering can use the numeric field while others keep the local
//! wall-clock rendering:
//!
//! ```json
//! {"dateTimeOffset":"2018-04-15T09:09:31.2340000+01:00","unixTime":1523779771234}
//! ```
//!
//! ## Wire Form
//!
//! | Field | Content |
//! |-------|---------|
//! | `dateTimeOffset` | ISO-8601 with exactly 7 fractional digits and `+hh:mm` offset |
//! | `unixTime` | Milliseconds since the Unix epoch (UTC) |
//!
//! On read the object form is preferred; a bare ISO-8601 string is accepted
//! as well. An object carrying only `unixTime` is read as a UTC instant.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Field holding the ISO-8601 rendering
pub const DATE_TIME_OFFSET_FIELD: &str = "dateTimeOffset";

/// Field holding Unix milliseconds
pub const UNIX_TIME_FIELD: &str = "unixTime";

/// Instant with its UTC offset
///
/// Equality and ordering follow `chrono`: two values denoting the same
/// instant in different offsets compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeOffset(DateTime<FixedOffset>);

impl DateTimeOffset {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Wrap a chrono value
    #[inline]
    pub const fn new(inner: DateTime<FixedOffset>) -> Self {
        DateTimeOffset(inner)
    }

    /// Current instant in UTC
    pub fn now_utc() -> Self {
        DateTimeOffset(Utc::now().fixed_offset())
    }

    /// Parse an RFC 3339 / ISO-8601 string with offset
    pub fn parse(text: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(text)
            .map(DateTimeOffset)
            .map_err(|e| Error::Serialization {
                message: format!("'{}' is not an ISO-8601 date with offset: {}", text, e),
                source: Some(Box::new(e)),
            })
    }

    /// Build from Unix milliseconds, rendered in `offset`
    ///
    /// Returns `None` when the instant is out of chrono's range.
    pub fn from_unix_millis(millis: i64, offset: FixedOffset) -> Option<Self> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(|utc| DateTimeOffset(utc.with_timezone(&offset)))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Milliseconds since the Unix epoch
    #[inline]
    pub fn unix_time_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The UTC offset
    #[inline]
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    /// Borrow the chrono value
    #[inline]
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Unwrap into the chrono value
    #[inline]
    pub fn into_inner(self) -> DateTime<FixedOffset> {
        self.0
    }

    /// ISO-8601 rendering with seven fractional digits
    pub fn to_iso_string(&self) -> String {
        let ticks = self.0.timestamp_subsec_nanos() % 1_000_000_000 / 100;
        format!(
            "{}.{:07}{}",
            self.0.format("%Y-%m-%dT%H:%M:%S"),
            ticks,
            self.0.format("%:z")
        )
    }

    // =========================================================================
    // Wire form
    // =========================================================================

    /// Render the two-field object form
    pub fn to_wire(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            DATE_TIME_OFFSET_FIELD.to_string(),
            Value::String(self.to_iso_string()),
        );
        map.insert(
            UNIX_TIME_FIELD.to_string(),
            Value::from(self.unix_time_millis()),
        );
        Value::Object(map)
    }

    /// Read either the object form or a bare ISO-8601 string
    pub fn from_wire(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Object(map) => {
                if let Some(field) = map.get(DATE_TIME_OFFSET_FIELD) {
                    return match field {
                        Value::String(s) => Self::parse(s),
                        other => Err(Error::serialization(format!(
                            "'{}' must be a string, found {}",
                            DATE_TIME_OFFSET_FIELD, other
                        ))),
                    };
                }
                let millis = map
                    .get(UNIX_TIME_FIELD)
                    .and_then(Value::as_i64)
                    .ok_or_else(|| {
                        Error::serialization(format!(
                            "object has neither '{}' nor an integer '{}'",
                            DATE_TIME_OFFSET_FIELD, UNIX_TIME_FIELD
                        ))
                    })?;
                Utc.timestamp_millis_opt(millis)
                    .single()
                    .map(DateTimeOffset::from)
                    .ok_or_else(|| {
                        Error::serialization(format!("unix time {} is out of range", millis))
                    })
            }
            other => Err(Error::serialization(format!(
                "expected a date object or string, found {}",
                other
            ))),
        }
    }
}

impl fmt::Display for DateTimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl FromStr for DateTimeOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DateTimeOffset::parse(s)
    }
}

impl From<DateTime<FixedOffset>> for DateTimeOffset {
    fn from(inner: DateTime<FixedOffset>) -> Self {
        DateTimeOffset(inner)
    }
}

impl From<DateTime<Utc>> for DateTimeOffset {
    fn from(inner: DateTime<Utc>) -> Self {
        DateTimeOffset(inner.fixed_offset())
    }
}

impl From<DateTimeOffset> for DateTime<FixedOffset> {
    fn from(value: DateTimeOffset) -> Self {
        value.0
    }
}

impl Serialize for DateTimeOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DateTimeOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        DateTimeOffset::from_wire(&value).map_err(serde::de::Error::custom)
    }
}
