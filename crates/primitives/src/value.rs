//! Projection value type
//!
//! `PropertyValue` is what dictionary projection hands out: each stored JSON
//! value is turned into the Rust type its entry-type tag implies.
//!
//! | Tag | Variant |
//! |-----|---------|
//! | Null | `Null` |
//! | String | `String(String)` |
//! | Boolean | `Boolean(bool)` |
//! | Integer | `Integer(i64)` |
//! | Decimal | `Decimal(f64)` |
//! | Array | `Array(Vec<PropertyValue>)` |
//! | Object | `Bag(PropertyBag)` |
//!
//! `Map` never comes out of a single-level projection; recursive flattening
//! replaces every nested `Bag` with a `Map`.
//!
//! Integers that do not fit in an `i64` are tagged Decimal and projected
//! through `f64`, so values above 2^53 lose precision.

use crate::bag::PropertyBag;
use indexmap::IndexMap;
use propbag_core::{EntryType, Error, Result};
use propbag_engine::JsonEngine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Insertion-ordered projection of a bag
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// A projected property value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropertyValue {
    /// JSON null
    #[default]
    Null,
    /// A string
    String(String),
    /// A boolean
    Boolean(bool),
    /// An integer in the `i64` range
    Integer(i64),
    /// Any other number
    Decimal(f64),
    /// An array, elements projected by their own tags
    Array(Vec<PropertyValue>),
    /// A nested object, as a bag
    Bag(PropertyBag),
    /// A nested object, flattened
    Map(PropertyMap),
}

impl PropertyValue {
    /// Project a stored value by its tag
    ///
    /// Nested objects become bags bound to `engine`.
    pub fn from_stored(value: &Value, engine: &JsonEngine) -> Result<Self> {
        Ok(match value {
            Value::Null => PropertyValue::Null,
            Value::String(s) => PropertyValue::String(s.clone()),
            Value::Bool(b) => PropertyValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Integer(i),
                None => PropertyValue::Decimal(n.as_f64().ok_or_else(|| {
                    Error::invalid_operation(format!("number {} has no f64 form", n))
                })?),
            },
            Value::Array(items) => PropertyValue::Array(
                items
                    .iter()
                    .map(|item| PropertyValue::from_stored(item, engine))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(map) => {
                PropertyValue::Bag(PropertyBag::from_parts(map.clone(), engine.clone()))
            }
        })
    }

    /// The stored form of this value
    ///
    /// Non-finite decimals have no JSON form and become `null`.
    pub fn to_tree(&self) -> Value {
        match self {
            PropertyValue::Null => Value::Null,
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::Boolean(b) => Value::Bool(*b),
            PropertyValue::Integer(i) => Value::from(*i),
            PropertyValue::Decimal(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            PropertyValue::Array(items) => {
                Value::Array(items.iter().map(PropertyValue::to_tree).collect())
            }
            PropertyValue::Bag(bag) => Value::Object(bag.as_object().clone()),
            PropertyValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_tree()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    /// The entry-type tag this value projects from
    pub fn entry_type(&self) -> EntryType {
        match self {
            PropertyValue::Null => EntryType::Null,
            PropertyValue::String(_) => EntryType::String,
            PropertyValue::Boolean(_) => EntryType::Boolean,
            PropertyValue::Integer(_) => EntryType::Integer,
            PropertyValue::Decimal(_) => EntryType::Decimal,
            PropertyValue::Array(_) => EntryType::Array,
            PropertyValue::Bag(_) | PropertyValue::Map(_) => EntryType::Object,
        }
    }

    /// True for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// The string, if this is a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is a `Boolean`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an `Integer`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The number as `f64`, for `Integer` and `Decimal`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Decimal(f) => Some(*f),
            _ => None,
        }
    }

    /// The elements, if this is an `Array`
    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The nested bag, if this is a `Bag`
    pub fn as_bag(&self) -> Option<&PropertyBag> {
        match self {
            PropertyValue::Bag(bag) => Some(bag),
            _ => None,
        }
    }

    /// The flattened object, if this is a `Map`
    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i64::from(i))
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Decimal(f)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(items)
    }
}

impl From<PropertyBag> for PropertyValue {
    fn from(bag: PropertyBag) -> Self {
        PropertyValue::Bag(bag)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(map: PropertyMap) -> Self {
        PropertyValue::Map(map)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Null => serializer.serialize_unit(),
            PropertyValue::String(s) => serializer.serialize_str(s),
            PropertyValue::Boolean(b) => serializer.serialize_bool(*b),
            PropertyValue::Integer(i) => serializer.serialize_i64(*i),
            PropertyValue::Decimal(f) => serializer.serialize_f64(*f),
            PropertyValue::Array(items) => items.serialize(serializer),
            PropertyValue::Bag(bag) => bag.serialize(serializer),
            PropertyValue::Map(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        PropertyValue::from_stored(&value, JsonEngine::shared_default())
            .map_err(serde::de::Error::custom)
    }
}
