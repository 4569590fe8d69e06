//! Entry-type tags
//!
//! Every entry in a property bag can report a coarse classification of its
//! stored value. Generic projection code uses the tag to decide which static
//! type to request for the entry, instead of guessing.
//!
//! ## Derivation Rule
//!
//! Tags are derived structurally from the stored JSON value, never stored:
//!
//! | Stored value | Tag |
//! |--------------|-----|
//! | `null` | Null |
//! | string | String |
//! | `true` / `false` | Boolean |
//! | number representable as `i64` | Integer |
//! | any other number | Decimal |
//! | array | Array |
//! | object | Object |
//!
//! Numbers outside the `i64` range (large unsigned values) fall back to
//! `Decimal`, the same way the projection reads them as `f64`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Coarse data type of a property bag entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryType {
    /// A null value
    Null,
    /// A string value
    String,
    /// A true or false value
    Boolean,
    /// A number with no fractional part that fits in an `i64`
    Integer,
    /// Any other number
    Decimal,
    /// An array
    Array,
    /// A nested object
    Object,
}

impl EntryType {
    /// All entry types (for iteration)
    pub const ALL: [EntryType; 7] = [
        EntryType::Null,
        EntryType::String,
        EntryType::Boolean,
        EntryType::Integer,
        EntryType::Decimal,
        EntryType::Array,
        EntryType::Object,
    ];

    /// Classify a stored value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => EntryType::Null,
            Value::String(_) => EntryType::String,
            Value::Bool(_) => EntryType::Boolean,
            Value::Number(n) if n.is_i64() => EntryType::Integer,
            Value::Number(_) => EntryType::Decimal,
            Value::Array(_) => EntryType::Array,
            Value::Object(_) => EntryType::Object,
        }
    }

    /// Short identifier
    pub const fn id(&self) -> &'static str {
        match self {
            EntryType::Null => "null",
            EntryType::String => "string",
            EntryType::Boolean => "boolean",
            EntryType::Integer => "integer",
            EntryType::Decimal => "decimal",
            EntryType::Array => "array",
            EntryType::Object => "object",
        }
    }

    /// Parse from short identifier
    pub fn from_id(id: &str) -> Option<Self> {
        EntryType::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// True for the scalar tags (everything but Array and Object)
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, EntryType::Array | EntryType::Object)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
