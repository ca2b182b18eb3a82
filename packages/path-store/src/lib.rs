//! pksfs path store: the in-memory backing store of a minimal virtual filesystem.
//!
//! The whole hierarchy lives in one flat, byte-wise ordered set of full path
//! strings. Nothing links a directory to its children; membership is worked
//! out at query time by comparing path prefixes over that order:
//! - `PathStore`: ordered container keyed by path
//! - `hierarchy`: direct-child test and the mirror-path transformation
//! - `MemFs`: the operations a protocol layer calls (attributes, list,
//!   create, open, read, write, remove)
//! - `SharedFs`: a lock-guarded handle implementing `FsCallbacks`
//!
//! # Example
//!
//! ```rust
//! use pksfs_path_store::{FsCallbacks, FsConfig, SharedFs};
//!
//! let fs = SharedFs::new(FsConfig::default());
//! fs.mkdir("/x").unwrap();
//! fs.mkdir("/y").unwrap();
//! fs.mkdir("/x/y").unwrap();
//! fs.mkdir("/y/x").unwrap();
//! fs.mknod("/x/y/f").unwrap();
//! fs.mknod("/y/x/f").unwrap();
//!
//! // Writes to a three-segment path are mirrored onto its segment-swapped twin
//! fs.write("/x/y/f", 0, b"linked").unwrap();
//! assert_eq!(&fs.read("/y/x/f", 0, 6).unwrap()[..], b"linked");
//! ```

pub use bytes::Bytes;

mod config;
mod entry;
mod error;
pub mod hierarchy;
mod ops;
mod shared;
mod store;
mod traits;

pub use config::{ConfigError, FsConfig};
pub use entry::{Content, Entry, EntryKind};
pub use error::{errno, Error, ErrorKind, Exhaustion, Result};
pub use ops::{Attributes, MemFs, S_IFDIR, S_IFREG};
pub use shared::SharedFs;
pub use store::{IterFrom, PathStore};
pub use traits::FsCallbacks;
