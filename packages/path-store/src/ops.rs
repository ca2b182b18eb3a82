//! Entry operations: the calls a filesystem protocol layer makes.
//!
//! Each operation is one synchronous transition against the [`PathStore`].

use bytes::Bytes;

use crate::config::FsConfig;
use crate::entry::{Entry, EntryKind};
use crate::error::{Error, Exhaustion, Result};
use crate::hierarchy::{self, ROOT};
use crate::store::PathStore;

/// File type bits for a directory.
pub const S_IFDIR: u32 = 0o040000;
/// File type bits for a regular file.
pub const S_IFREG: u32 = 0o100000;

const DIR_MODE: u32 = S_IFDIR | 0o755;
const FILE_MODE: u32 = S_IFREG | 0o444;

/// What `attributes` reports for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub kind: EntryKind,
    /// Content length for files, zero for directories.
    pub size: u64,
    pub mode: u32,
    pub nlink: u32,
}

impl Attributes {
    fn of(entry: &Entry) -> Self {
        match entry.kind() {
            EntryKind::Directory => Self {
                kind: EntryKind::Directory,
                size: 0,
                mode: DIR_MODE,
                nlink: 2,
            },
            EntryKind::File => Self {
                kind: EntryKind::File,
                size: entry.len() as u64,
                mode: FILE_MODE,
                nlink: 1,
            },
        }
    }
}

/// An in-memory filesystem: a [`PathStore`] that always holds the root.
///
/// # Example
///
/// ```rust
/// use pksfs_path_store::MemFs;
///
/// let mut fs = MemFs::new();
/// fs.mkdir("/docs").unwrap();
/// fs.create("/docs/readme").unwrap();
/// fs.write("/docs/readme", 0, b"hi").unwrap();
///
/// assert_eq!(fs.list("/docs").unwrap(), vec![".", "..", "readme"]);
/// assert_eq!(&fs.read("/docs/readme", 0, 16).unwrap()[..], b"hi");
/// ```
#[derive(Debug, Clone)]
pub struct MemFs {
    store: PathStore,
    config: FsConfig,
}

impl MemFs {
    pub fn new() -> Self {
        Self::with_config(FsConfig::default())
    }

    pub fn with_config(config: FsConfig) -> Self {
        let mut store = PathStore::new();
        let inserted = store.insert(Entry::directory(ROOT)).is_ok();
        debug_assert!(inserted, "fresh store already held the root");
        Self { store, config }
    }

    pub fn config(&self) -> &FsConfig {
        &self.config
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &PathStore {
        &self.store
    }

    fn find(&self, path: &str) -> Result<&Entry> {
        self.store.find(path).ok_or_else(|| Error::not_found(path))
    }

    fn find_file_mut(&mut self, path: &str) -> Result<&mut Entry> {
        let entry = self
            .store
            .find_mut(path)
            .ok_or_else(|| Error::not_found(path))?;
        if entry.is_dir() {
            return Err(Error::is_a_directory(path));
        }
        Ok(entry)
    }

    pub fn attributes(&self, path: &str) -> Result<Attributes> {
        self.find(path).map(Attributes::of)
    }

    /// Child names of the directory at `path` with the entries they came from,
    /// in store order.
    ///
    /// The rest of the store after `path` is scanned in full and filtered with
    /// [`hierarchy::is_direct_child`]; children are not assumed contiguous.
    /// A character-prefix sibling such as `/ab` under `/a` is reported with
    /// its own entry, whose path is not `path` joined with the name.
    pub fn children<'a>(
        &'a self,
        path: &'a str,
    ) -> Result<impl Iterator<Item = (&'a str, &'a Entry)> + 'a> {
        let dir = self.find(path)?;
        if !dir.is_dir() {
            return Err(Error::not_a_directory(path));
        }
        Ok(self.store.iterate_from(path).filter_map(move |entry| {
            hierarchy::is_direct_child(path, entry.path()).map(|name| (name, entry))
        }))
    }

    /// Names in the directory at `path`, in store order.
    ///
    /// Starts with `.` and, except for the root, `..`, followed by
    /// [`MemFs::children`].
    pub fn list(&self, path: &str) -> Result<Vec<String>> {
        let children = self.children(path)?;

        let mut names = vec![".".to_string()];
        if path != ROOT {
            names.push("..".to_string());
        }
        names.extend(children.map(|(name, _)| name.to_string()));
        Ok(names)
    }

    /// Create an empty file.
    pub fn create(&mut self, path: &str) -> Result<()> {
        self.store.insert(Entry::file(path))
    }

    pub fn mkdir(&mut self, path: &str) -> Result<()> {
        self.store.insert(Entry::directory(path))
    }

    /// Open a file, creating it empty when absent.
    pub fn open(&mut self, path: &str) -> Result<()> {
        match self.store.find(path) {
            Some(entry) if entry.is_dir() => Err(Error::is_a_directory(path)),
            Some(_) => Ok(()),
            None => {
                log::debug!("open materializes {}", path);
                self.store.insert(Entry::file(path))
            }
        }
    }

    /// Up to `size` bytes from `offset`; empty when `offset` is at or past the end.
    pub fn read(&self, path: &str, offset: u64, size: usize) -> Result<Bytes> {
        let entry = self.find(path)?;
        if entry.is_dir() {
            return Err(Error::is_a_directory(path));
        }
        // An offset beyond usize is necessarily past the end.
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(Bytes::copy_from_slice(entry.content().read_at(offset, size)))
    }

    /// Write `data` at `offset`, growing the file to `offset + data.len()` if
    /// that is past its end. Returns `data.len()`.
    ///
    /// When mirroring is enabled and the path has a mirror
    /// ([`hierarchy::mirror_path`]) naming an existing file, the same write is
    /// applied there too. The mirror's outcome is not reported.
    pub fn write(&mut self, path: &str, offset: u64, data: &[u8]) -> Result<usize> {
        let limit = self.config.max_file_size;
        let entry = self.find_file_mut(path)?;
        write_into(entry, offset, data, limit)?;

        if self.config.mirror_writes {
            self.propagate_to_mirror(path, offset, data);
        }
        Ok(data.len())
    }

    fn propagate_to_mirror(&mut self, path: &str, offset: u64, data: &[u8]) {
        let Some(mirror) = hierarchy::mirror_path(path) else {
            return;
        };
        if mirror == path {
            return;
        }
        let limit = self.config.max_file_size;
        match self.store.find_mut(&mirror) {
            None => log::trace!("no mirror entry {} for {}", mirror, path),
            Some(entry) if entry.is_dir() => {
                log::trace!("mirror {} of {} is a directory, skipped", mirror, path)
            }
            Some(entry) => {
                log::trace!("mirroring {} bytes at {} into {}", data.len(), offset, mirror);
                if let Err(e) = write_into(entry, offset, data, limit) {
                    log::warn!("mirror write {} -> {} failed: {}", path, mirror, e);
                }
            }
        }
    }

    /// Delete an entry of either kind.
    ///
    /// Directories are removed without looking at their descendants, which
    /// stay in the store and remain individually addressable.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        if path == ROOT {
            return Err(Error::RootBusy {
                path: path.to_string(),
            });
        }
        if self.store.remove(path) {
            Ok(())
        } else {
            Err(Error::not_found(path))
        }
    }

    /// Accept a timestamp update. Entries keep no timestamps, so this never
    /// changes anything.
    pub fn touch(&mut self, path: &str) -> Result<()> {
        log::trace!("touch {}", path);
        Ok(())
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

fn exhausted(entry: &Entry, requested: u64, cause: Exhaustion) -> Error {
    Error::ResourceExhausted {
        path: entry.path().to_string(),
        requested,
        cause,
    }
}

/// Grow-and-copy step shared by the primary and mirrored write.
///
/// Every limit is checked before content is touched.
fn write_into(entry: &mut Entry, offset: u64, data: &[u8], limit: Option<u64>) -> Result<()> {
    let Some(end) = offset.checked_add(data.len() as u64) else {
        return Err(exhausted(entry, u64::MAX, Exhaustion::Overflow));
    };
    let grows = end > entry.len() as u64;
    if let Some(max) = limit {
        if grows && end > max {
            return Err(exhausted(entry, end, Exhaustion::SizeLimit));
        }
    }
    let (Ok(start), Ok(_)) = (usize::try_from(offset), usize::try_from(end)) else {
        return Err(exhausted(entry, end, Exhaustion::Overflow));
    };

    if grows {
        log::debug!("grow {} from {} to {} bytes", entry.path(), entry.len(), end);
    }
    if let Err(cause) = entry.content_mut().write_at(start, data) {
        return Err(exhausted(entry, end, cause));
    }
    Ok(())
}
