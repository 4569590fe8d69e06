//! Core types and traits for propbag
//!
//! This crate defines the foundational types shared by the engine and the
//! property bag primitives:
//! - Error: Error type hierarchy (serialization, argument, operation, limits)
//! - EntryType: Coarse classification of a stored JSON value
//! - Limits: Document nesting/array limits and their checks
//! - Contract types: DateTimeOffset, CultureName (wire value types with
//!   stable JSON representations)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod entry_type;
pub mod error;
pub mod limits;

pub use contract::{CultureName, CultureNameError, DateTimeOffset};
pub use entry_type::EntryType;
pub use error::{Error, Result};
pub use limits::{LimitError, MAX_ARRAY_SIZE, MAX_NESTING_DEPTH};
