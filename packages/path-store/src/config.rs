//! Tunables for a [`crate::MemFs`].

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {error}")]
    Read {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Filesystem behaviour switches.
///
/// Every field has a default, so `{}` is a valid configuration.
///
/// ```rust
/// use pksfs_path_store::FsConfig;
///
/// let config = FsConfig::from_json_str(r#"{"max_file_size": 1024}"#).unwrap();
/// assert!(config.mirror_writes);
/// assert_eq!(config.max_file_size, Some(1024));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FsConfig {
    /// Replicate writes on `/a/b/c` to `/b/a/c` when that entry exists.
    pub mirror_writes: bool,
    /// Largest length a file may grow to, in bytes.
    pub max_file_size: Option<u64>,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            mirror_writes: true,
            max_file_size: None,
        }
    }
}

impl FsConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        log::debug!("Loading config from {}...", path.display());
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = FsConfig::default();
        assert!(config.mirror_writes);
        assert_eq!(config.max_file_size, None);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(FsConfig::from_json_str("{}").unwrap(), FsConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = FsConfig::from_json_str(r#"{"mirror": false}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mirror_writes": false, "max_file_size": 64}}"#).unwrap();

        let config = FsConfig::from_file(file.path()).unwrap();
        assert!(!config.mirror_writes);
        assert_eq!(config.max_file_size, Some(64));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        let err = FsConfig::from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(format!("{}", err).contains("nope.json"));
    }
}
