//! Entry-type introspection
//!
//! `Entries` walks a bag lazily, yielding each key with the tag derived from
//! its stored value. It borrows the bag and can be restarted by calling
//! `PropertyBag::entries` again.

use propbag_core::EntryType;
use serde_json::{map, Map, Value};

/// Iterator of `(key, tag)` pairs in insertion order
#[derive(Clone)]
pub struct Entries<'a> {
    inner: map::Iter<'a>,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(entries: &'a Map<String, Value>) -> Self {
        Self {
            inner: entries.iter(),
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, EntryType);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| (key.as_str(), EntryType::of(value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl std::fmt::Debug for Entries<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
