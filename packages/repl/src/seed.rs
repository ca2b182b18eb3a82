//! Startup content for a fresh filesystem.

use pksfs_path_store::{FsCallbacks, Result, SharedFs};

/// Contents of the seeded file when none are given.
pub const DEFAULT_CONTENTS: &str = "Hello, World!\n";

/// Create `/<name>` and write `contents` at offset zero.
///
/// The file is made through `open`, so parents are not required: a nested
/// name such as `a/b` leaves `/a/b` in the store with no `/a` to list it.
pub fn seed(fs: &SharedFs, name: &str, contents: &str) -> Result<()> {
    let path = format!("/{}", name);
    fs.open(&path)?;
    let written = fs.write(&path, 0, contents.as_bytes())?;
    log::info!("seeded {} with {} bytes", path, written);
    Ok(())
}
