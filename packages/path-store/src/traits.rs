//! The callback set a filesystem protocol layer drives.
//!
//! A bridge to a kernel filesystem interface translates each request into
//! one of these calls and maps the [`Error`](crate::Error) it gets back with
//! [`Error::errno`](crate::Error::errno).

use std::sync::Arc;

use bytes::Bytes;

use crate::error::Result;
use crate::ops::Attributes;

/// Filesystem callbacks, callable from any number of worker threads.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn FsCallbacks>`.
pub trait FsCallbacks: Send + Sync {
    fn getattr(&self, path: &str) -> Result<Attributes>;

    /// Directory entry names, `.` and `..` included.
    fn readdir(&self, path: &str) -> Result<Vec<String>>;

    /// Creates an empty file when `path` is absent.
    fn open(&self, path: &str) -> Result<()>;

    fn read(&self, path: &str, offset: u64, size: usize) -> Result<Bytes>;

    /// Returns the number of bytes written.
    fn write(&self, path: &str, offset: u64, data: &[u8]) -> Result<usize>;

    /// Create an empty regular file.
    fn mknod(&self, path: &str) -> Result<()>;

    fn mkdir(&self, path: &str) -> Result<()>;

    fn rmdir(&self, path: &str) -> Result<()>;

    fn unlink(&self, path: &str) -> Result<()>;

    /// Timestamp update; entries carry no timestamps.
    fn utimens(&self, path: &str) -> Result<()>;
}

// Blanket implementations for references and smart pointers

impl<T: FsCallbacks + ?Sized> FsCallbacks for &T {
    fn getattr(&self, path: &str) -> Result<Attributes> {
        (**self).getattr(path)
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>> {
        (**self).readdir(path)
    }

    fn open(&self, path: &str) -> Result<()> {
        (**self).open(path)
    }

    fn read(&self, path: &str, offset: u64, size: usize) -> Result<Bytes> {
        (**self).read(path, offset, size)
    }

    fn write(&self, path: &str, offset: u64, data: &[u8]) -> Result<usize> {
        (**self).write(path, offset, data)
    }

    fn mknod(&self, path: &str) -> Result<()> {
        (**self).mknod(path)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        (**self).mkdir(path)
    }

    fn rmdir(&self, path: &str) -> Result<()> {
        (**self).rmdir(path)
    }

    fn unlink(&self, path: &str) -> Result<()> {
        (**self).unlink(path)
    }

    fn utimens(&self, path: &str) -> Result<()> {
        (**self).utimens(path)
    }
}

impl<T: FsCallbacks + ?Sized> FsCallbacks for Box<T> {
    fn getattr(&self, path: &str) -> Result<Attributes> {
        self.as_ref().getattr(path)
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>> {
        self.as_ref().readdir(path)
    }

    fn open(&self, path: &str) -> Result<()> {
        self.as_ref().open(path)
    }

    fn read(&self, path: &str, offset: u64, size: usize) -> Result<Bytes> {
        self.as_ref().read(path, offset, size)
    }

    fn write(&self, path: &str, offset: u64, data: &[u8]) -> Result<usize> {
        self.as_ref().write(path, offset, data)
    }

    fn mknod(&self, path: &str) -> Result<()> {
        self.as_ref().mknod(path)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        self.as_ref().mkdir(path)
    }

    fn rmdir(&self, path: &str) -> Result<()> {
        self.as_ref().rmdir(path)
    }

    fn unlink(&self, path: &str) -> Result<()> {
        self.as_ref().unlink(path)
    }

    fn utimens(&self, path: &str) -> Result<()> {
        self.as_ref().utimens(path)
    }
}

impl<T: FsCallbacks + ?Sized> FsCallbacks for Arc<T> {
    fn getattr(&self, path: &str) -> Result<Attributes> {
        self.as_ref().getattr(path)
    }

    fn readdir(&self, path: &str) -> Result<Vec<String>> {
        self.as_ref().readdir(path)
    }

    fn open(&self, path: &str) -> Result<()> {
        self.as_ref().open(path)
    }

    fn read(&self, path: &str, offset: u64, size: usize) -> Result<Bytes> {
        self.as_ref().read(path, offset, size)
    }

    fn write(&self, path: &str, offset: u64, data: &[u8]) -> Result<usize> {
        self.as_ref().write(path, offset, data)
    }

    fn mknod(&self, path: &str) -> Result<()> {
        self.as_ref().mknod(path)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        self.as_ref().mkdir(path)
    }

    fn rmdir(&self, path: &str) -> Result<()> {
        self.as_ref().rmdir(path)
    }

    fn unlink(&self, path: &str) -> Result<()> {
        self.as_ref().unlink(path)
    }

    fn utimens(&self, path: &str) -> Result<()> {
        self.as_ref().utimens(path)
    }
}
