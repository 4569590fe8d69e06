//! Document engine for propbag
//!
//! This crate adapts `serde_json` into the engine the property bags sit on:
//! - SerializerSettings: explicit, TOML-loadable conversion settings
//! - ValueConverter / ConverterRegistry: per-type conversion hooks
//! - Standard converters: DateTimeOffset (object wire form), CultureName
//! - JsonEngine: parse, stringify, value-to-tree and tree-to-value
//!
//! Settings are always passed explicitly. The only process-wide state is an
//! immutable default engine built from `SerializerSettings::default()`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod converter;
pub mod converters;
pub mod document;

pub use config::{
    DateParseHandling, Formatting, NullValueHandling, SerializerSettings, SETTINGS_FILE_NAME,
};
pub use converter::{ConverterRegistry, ValueConverter};
pub use converters::{CultureConverter, DateTimeOffsetConverter};
pub use document::JsonEngine;
