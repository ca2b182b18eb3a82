//! The single domain entity: a file or directory keyed by its full path.

use std::collections::TryReserveError;

use crate::error::Exhaustion;

/// Whether an entry is a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// Length-tracked, growable file content.
///
/// The occupied length is exactly the length of the backing vector, so reads
/// can never observe bytes past the logical end. Growth zero-fills any gap
/// between the old end and the write offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    bytes: Vec<u8>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Allocated capacity; always `>= len()`.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Up to `size` bytes starting at `offset`, clamped to the logical end.
    ///
    /// Returns an empty slice when `offset` is at or past the end.
    pub fn read_at(&self, offset: usize, size: usize) -> &[u8] {
        if offset >= self.bytes.len() {
            return &[];
        }
        let end = offset.saturating_add(size).min(self.bytes.len());
        &self.bytes[offset..end]
    }

    /// Grow to exactly `new_len` bytes if currently shorter.
    ///
    /// On allocation failure nothing changes.
    pub fn grow_to(&mut self, new_len: usize) -> Result<(), TryReserveError> {
        if new_len <= self.bytes.len() {
            return Ok(());
        }
        self.bytes.try_reserve_exact(new_len - self.bytes.len())?;
        self.bytes.resize(new_len, 0);
        Ok(())
    }

    /// Copy `data` in at `offset`, growing first when it extends past the end.
    ///
    /// On failure nothing changes.
    pub fn write_at(&mut self, offset: usize, data: &[u8]) -> Result<(), Exhaustion> {
        let end = offset
            .checked_add(data.len())
            .ok_or(Exhaustion::Overflow)?;
        self.grow_to(end).map_err(|_| Exhaustion::Allocation)?;
        self.bytes[offset..end].copy_from_slice(data);
        Ok(())
    }
}

/// A file or directory record.
///
/// The path is fixed at creation. Directories never hold content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: String,
    kind: EntryKind,
    content: Content,
}

impl Entry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
            content: Content::new(),
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Logical content length; zero for directories and never-written files.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }
}
