//! Wire value types
//!
//! Value types with a fixed JSON representation that the standard
//! converters read and write:
//!
//! - `DateTimeOffset`: instant plus offset, stored as a two-field object
//! - `CultureName`: canonical locale name, stored as a string

pub mod culture_name;
pub mod date_time_offset;

pub use culture_name::{CultureName, CultureNameError, MAX_CULTURE_NAME_LENGTH};
pub use date_time_offset::{DateTimeOffset, DATE_TIME_OFFSET_FIELD, UNIX_TIME_FIELD};
