//! A lock-guarded [`MemFs`] handle for multi-threaded protocol layers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;

use crate::config::FsConfig;
use crate::error::Result;
use crate::ops::{Attributes, MemFs};
use crate::traits::FsCallbacks;

/// Cheaply clonable handle to one filesystem.
///
/// A single lock covers the whole store and is held for the full duration of
/// each callback, so a write and its mirror propagation are applied together
/// and no reader can observe one without the other.
#[derive(Debug, Clone, Default)]
pub struct SharedFs {
    inner: Arc<Mutex<MemFs>>,
}

impl SharedFs {
    pub fn new(config: FsConfig) -> Self {
        Self::from_fs(MemFs::with_config(config))
    }

    pub fn from_fs(fs: MemFs) -> Self {
        Self {
            inner: Arc::new(Mutex::new(fs)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemFs> {
        // Each operation is a single transition, so a panic mid-call cannot
        // leave a half-applied state behind.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the filesystem.
    pub fn with<R>(&self, f: impl FnOnce(&mut MemFs) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    /// Every path in the store, in store order.
    pub fn paths(&self) -> Vec<String> {
        self.lock()
            .store()
            .iter()
            .map(|entry| entry.path().to_string())
            .collect()
    }
}

impl FsCallbacks for SharedFs {
    fn getattr(&self, path: &str) -> Result<Attributes> {
        self.lock().attributes(path)
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>> {
        self.lock().list(path)
    }

    fn open(&self, path: &str) -> Result<()> {
        self.lock().open(path)
    }

    fn read(&self, path: &str, offset: u64, size: usize) -> Result<Bytes> {
        self.lock().read(path, offset, size)
    }

    fn write(&self, path: &str, offset: u64, data: &[u8]) -> Result<usize> {
        self.lock().write(path, offset, data)
    }

    fn mknod(&self, path: &str) -> Result<()> {
        self.lock().create(path)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        self.lock().mkdir(path)
    }

    fn rmdir(&self, path: &str) -> Result<()> {
        self.lock().remove(path)
    }

    fn unlink(&self, path: &str) -> Result<()> {
        self.lock().remove(path)
    }

    fn utimens(&self, path: &str) -> Result<()> {
        self.lock().touch(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use crate::error::ErrorKind;

    #[test]
    fn clones_share_state() {
        let fs = SharedFs::default();
        let other = fs.clone();

        fs.mkdir("/d").unwrap();
        assert_eq!(other.getattr("/d").unwrap().kind, EntryKind::Directory);
    }

    #[test]
    fn unlink_and_rmdir_share_semantics() {
        let fs = SharedFs::default();
        fs.mkdir("/d").unwrap();
        fs.mknod("/f").unwrap();

        // Neither checks the entry kind
        fs.unlink("/d").unwrap();
        fs.rmdir("/f").unwrap();
        assert_eq!(fs.paths(), vec!["/"]);
    }

    #[test]
    fn utimens_never_fails() {
        let fs = SharedFs::default();
        fs.utimens("/").unwrap();
        fs.utimens("/missing").unwrap();
    }

    #[test]
    fn object_safety_works() {
        let fs: Box<dyn FsCallbacks> = Box::new(SharedFs::default());
        fs.open("/hello").unwrap();
        fs.write("/hello", 0, b"hi").unwrap();
        assert_eq!(&fs.read("/hello", 0, 2).unwrap()[..], b"hi");
        assert_eq!(fs.readdir("/").unwrap(), vec![".", "hello"]);
    }

    #[test]
    fn errors_pass_through() {
        let fs = SharedFs::default();
        assert_eq!(fs.getattr("/x").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(fs.readdir("/x").unwrap_err().errno(), 2);
    }

    #[test]
    fn with_gives_direct_access() {
        let fs = SharedFs::new(FsConfig {
            mirror_writes: false,
            ..FsConfig::default()
        });
        let mirrored = fs.with(|inner| inner.config().mirror_writes);
        assert!(!mirrored);
    }
}
