//! Shell state: the filesystem handle and the current directory.

use pksfs_path_store::{EntryKind, Error, FsCallbacks, Result, SharedFs};

/// Filesystem plus working directory for one shell session.
pub struct ShellContext {
    fs: SharedFs,
    cwd: String,
}

impl ShellContext {
    pub fn new(fs: SharedFs) -> Self {
        Self {
            fs,
            cwd: "/".to_string(),
        }
    }

    pub fn fs(&self) -> &SharedFs {
        &self.fs
    }

    pub fn current_path(&self) -> &str {
        &self.cwd
    }

    /// Resolve `input` against the current directory.
    ///
    /// `.` and `..` are folded and repeated separators collapse, so the
    /// result is always an absolute path with no trailing separator.
    pub fn resolve(&self, input: &str) -> String {
        let base = if input.starts_with('/') { "" } else { self.cwd.as_str() };

        let mut segments: Vec<&str> = Vec::new();
        for segment in base.split('/').chain(input.split('/')) {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name => segments.push(name),
            }
        }

        format!("/{}", segments.join("/"))
    }

    /// Change the current directory. The target must exist and be a directory.
    pub fn change_dir(&mut self, input: &str) -> Result<()> {
        let path = self.resolve(input);
        let attrs = self.fs.getattr(&path)?;
        if attrs.kind != EntryKind::Directory {
            return Err(Error::not_a_directory(path));
        }
        log::debug!("cd {} -> {}", self.cwd, path);
        self.cwd = path;
        Ok(())
    }

    /// Number of entries in the store, root included.
    pub fn entry_count(&self) -> usize {
        self.fs.with(|fs| fs.store().len())
    }
}
