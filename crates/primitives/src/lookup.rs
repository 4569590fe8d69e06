//! Outcome of a typed property read

/// Result of [`PropertyBag::try_get`](crate::PropertyBag::try_get).
///
/// A key can be missing, present with a JSON `null`, or present with a value
/// that converted to `T`. The first two are not errors and are kept apart:
///
/// | Stored | Outcome | `is_found()` |
/// |--------|---------|--------------|
/// | key missing | `Absent` | false |
/// | `null` | `Null` | true |
/// | anything else | `Found(v)` | true |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup<T> {
    /// The key is not present
    Absent,
    /// The key is present and holds `null`
    Null,
    /// The key is present and its value converted to `T`
    Found(T),
}

impl<T> Lookup<T> {
    /// True when the key is present, whether or not it holds `null`
    pub fn is_found(&self) -> bool {
        !matches!(self, Lookup::Absent)
    }

    /// True when the key is missing
    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }

    /// True when the key holds `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Lookup::Null)
    }

    /// The converted value, if any. Absent and null both give `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::Absent | Lookup::Null => None,
        }
    }

    /// Borrow the converted value
    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Absent => Lookup::Absent,
            Lookup::Null => Lookup::Null,
            Lookup::Found(v) => Lookup::Found(v),
        }
    }

    /// Map the converted value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Absent => Lookup::Absent,
            Lookup::Null => Lookup::Null,
            Lookup::Found(v) => Lookup::Found(f(v)),
        }
    }
}

impl<T: Default> Lookup<T> {
    /// The converted value, or `T::default()` for absent and null
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }

    /// `(found, value)` with `T::default()` standing in when there is no value
    pub fn into_pair(self) -> (bool, T) {
        let found = self.is_found();
        (found, self.unwrap_or_default())
    }
}

impl<T> From<Lookup<T>> for Option<T> {
    fn from(lookup: Lookup<T>) -> Self {
        lookup.into_option()
    }
}
