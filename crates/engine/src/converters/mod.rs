//! Standard value converters
//!
//! Registered by `SerializerSettings::default()`.

mod culture;
mod date_time_offset;

pub use culture::CultureConverter;
pub use date_time_offset::DateTimeOffsetConverter;
