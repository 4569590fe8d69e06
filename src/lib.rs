//! propbag - typed, lazily-materializing JSON property bags
//!
//! A property bag is an immutable key/value view over a JSON object. Values
//! stay as JSON until read with a concrete type, a present `null` is kept
//! apart from a missing key, and modified copies are produced by a factory
//! without touching the original.
//!
//! # Quick Start
//!
//! ```ignore
//! use propbag::{Lookup, ModificationRequest, PropertyBagFactory};
//!
//! let factory = PropertyBagFactory::default();
//! let bag = factory.create([("hello", "world")])?;
//!
//! assert_eq!(bag.try_get::<String>("hello")?, Lookup::Found("world".into()));
//! assert_eq!(bag.try_get::<String>("goodbye")?, Lookup::Absent);
//!
//! let modified = factory.create_modified_with(&bag, |v| v.set("n", 3).map(|_| ()), ["hello"])?;
//! assert_eq!(modified.to_json_string()?, r#"{"n":3}"#);
//! ```
//!
//! # Architecture
//!
//! - `propbag-core`: errors, entry-type tags, limits, wire value types
//! - `propbag-engine`: settings, value converters, the JSON engine
//! - `propbag-primitives`: the bag, projection and the factory
//!
//! Settings are explicit: build a factory from a [`SerializerSettings`]
//! value (in code or loaded from `propbag.toml`).

pub use propbag_core::{
    contract, limits, CultureName, CultureNameError, DateTimeOffset, EntryType, Error,
    LimitError, Result,
};
pub use propbag_engine::{
    ConverterRegistry, CultureConverter, DateParseHandling, DateTimeOffsetConverter, Formatting,
    JsonEngine, NullValueHandling, SerializerSettings, ValueConverter, SETTINGS_FILE_NAME,
};
pub use propbag_primitives::{
    Entries, Lookup, ModificationRequest, PropertyBag, PropertyBagFactory, PropertyMap,
    PropertyValue, PropertyValues,
};
