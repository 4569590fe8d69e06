//! Document limits
//!
//! Bags are backed by in-memory JSON trees. These limits bound the shape of
//! documents accepted from callers so that recursive operations (projection,
//! flattening, serialization) stay within predictable stack and memory use.
//!
//! | Limit | Default | Constant |
//! |-------|---------|----------|
//! | Max nesting depth | 100 levels | [`MAX_NESTING_DEPTH`] |
//! | Max array size | 1M elements | [`MAX_ARRAY_SIZE`] |
//!
//! The defaults can be overridden per factory through the serializer
//! settings; the functions here take the limit as an argument.

use serde_json::{Map, Value};
use thiserror::Error;

/// Maximum nesting depth in a document (100 levels)
pub const MAX_NESTING_DEPTH: usize = 100;

/// Maximum array size in elements (1 million elements)
pub const MAX_ARRAY_SIZE: usize = 1_000_000;

/// Error type for document limit violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Document nesting exceeds maximum depth
    #[error("document nesting depth {depth} exceeds maximum of {max} levels")]
    NestingTooDeep {
        /// Actual nesting depth
        depth: usize,
        /// Maximum allowed depth
        max: usize,
    },

    /// Array exceeds maximum size
    #[error("array size {size} exceeds maximum of {max} elements")]
    ArrayTooLarge {
        /// Actual array size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },
}

/// Calculate the maximum nesting depth of a JSON value
///
/// Returns 0 for scalars (null, bool, number, string) and counts nested
/// objects/arrays.
pub fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 0,
        Value::Array(arr) => 1 + arr.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(obj) => 1 + obj.values().map(nesting_depth).max().unwrap_or(0),
    }
}

/// Find the largest array anywhere in a JSON value (including nested arrays)
pub fn max_array_size(value: &Value) -> usize {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 0,
        Value::Array(arr) => {
            let nested_max = arr.iter().map(max_array_size).max().unwrap_or(0);
            arr.len().max(nested_max)
        }
        Value::Object(obj) => obj.values().map(max_array_size).max().unwrap_or(0),
    }
}

/// Validate both limits, returning the first violation encountered
pub fn validate(value: &Value, max_depth: usize, max_array: usize) -> Result<(), LimitError> {
    check(nesting_depth(value), max_array_size(value), max_depth, max_array)
}

/// Validate an object without wrapping it in a `Value`
///
/// Same accounting as [`validate`] on `Value::Object(map)`.
pub fn validate_object(
    map: &Map<String, Value>,
    max_depth: usize,
    max_array: usize,
) -> Result<(), LimitError> {
    let depth = 1 + map.values().map(nesting_depth).max().unwrap_or(0);
    let size = map.values().map(max_array_size).max().unwrap_or(0);
    check(depth, size, max_depth, max_array)
}

fn check(depth: usize, size: usize, max_depth: usize, max_array: usize) -> Result<(), LimitError> {
    if depth > max_depth {
        return Err(LimitError::NestingTooDeep {
            depth,
            max: max_depth,
        });
    }
    if size > max_array {
        return Err(LimitError::ArrayTooLarge {
            size,
            max: max_array,
        });
    }
    Ok(())
}
