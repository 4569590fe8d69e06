//! Property bag primitives for propbag
//!
//! Provides the bag and everything that builds or reads it:
//! - **PropertyBag**: immutable, lazily-typed key/value view over a JSON object
//! - **Lookup**: absent / null / found outcome of a typed read
//! - **PropertyValue**: tag-directed projection of stored values
//! - **PropertyBagFactory**: creation and copy-on-write modification
//!
//! ## Design Principle: Immutable Values
//!
//! Bags are never changed after construction. "Changing" a bag means asking
//! the factory for a new one, which leaves every existing holder of the old
//! bag unaffected. This lets bags be shared across threads without locks.
//!
//! ## Lazy Typing
//!
//! Entries are kept as JSON trees. A value is converted only when a caller
//! reads it with a concrete type, and again on each read:
//!
//! ```rust,ignore
//! use propbag_primitives::{Lookup, PropertyBagFactory};
//!
//! let factory = PropertyBagFactory::default();
//! let bag = factory.parse(r#"{"retries":3,"label":null}"#)?;
//!
//! assert_eq!(bag.try_get::<u32>("retries")?, Lookup::Found(3));
//! assert_eq!(bag.try_get::<String>("label")?, Lookup::Null);
//! assert_eq!(bag.try_get::<String>("owner")?, Lookup::Absent);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bag;
mod coercion;
pub mod factory;
pub mod introspection;
pub mod lookup;
pub mod value;

pub use bag::PropertyBag;
pub use factory::{ModificationRequest, PropertyBagFactory, PropertyValues};
pub use introspection::Entries;
pub use lookup::Lookup;
pub use value::{PropertyMap, PropertyValue};
