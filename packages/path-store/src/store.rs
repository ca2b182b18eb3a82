//! Ordered container of entries keyed by full path string.
//!
//! Keys compare byte-wise, the same order `strcmp` gives. Directory structure
//! is never stored: it is recovered from this order by the hierarchy
//! functions.

use std::collections::btree_map::{self, BTreeMap};
use std::ops::Bound;

use crate::entry::Entry;
use crate::error::{Error, Result};

/// Flat, lexicographically ordered set of entries.
///
/// Lookup, insertion and removal are `O(log n)`.
#[derive(Debug, Clone, Default)]
pub struct PathStore {
    entries: BTreeMap<String, Entry>,
}

impl PathStore {
    /// Create an empty store. Use [`crate::MemFs`] for a store with a root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match lookup.
    pub fn find(&self, path: &str) -> Option<&Entry> {
        self.entries.get(path)
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Entry> {
        self.entries.get_mut(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Insert an entry; fails if its path is already present.
    ///
    /// The existing entry is left untouched on failure.
    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        match self.entries.entry(entry.path().to_string()) {
            btree_map::Entry::Occupied(occupied) => Err(Error::already_exists(occupied.key())),
            btree_map::Entry::Vacant(vacant) => {
                log::debug!("insert {} ({:?})", entry.path(), entry.kind());
                vacant.insert(entry);
                Ok(())
            }
        }
    }

    /// Remove the entry at `path`, dropping its content.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, path: &str) -> bool {
        let removed = self.entries.remove(path).is_some();
        if removed {
            log::debug!("remove {}", path);
        }
        removed
    }

    /// Entries strictly after `path`, in ascending order, to the end of the store.
    ///
    /// `path` itself need not be present.
    pub fn iterate_from(&self, path: &str) -> IterFrom<'_> {
        IterFrom {
            inner: self
                .entries
                .range::<str, _>((Bound::Excluded(path), Bound::Unbounded)),
        }
    }

    /// Every entry in ascending path order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-shot iterator returned by [`PathStore::iterate_from`].
pub struct IterFrom<'a> {
    inner: btree_map::Range<'a, String, Entry>,
}

impl<'a> Iterator for IterFrom<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, entry)| entry)
    }
}
