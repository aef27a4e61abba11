//! Storage configuration.

use std::path::PathBuf;

/// Default backing file name.
pub const DEFAULT_FILE: &str = "file.json";

/// Configuration for the storage engine.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the backing JSON file.
    pub path: PathBuf,

    /// Write indented JSON instead of a single line.
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FILE),
            pretty: false,
        }
    }
}

impl StorageConfig {
    /// Create a new configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set whether flushed JSON is indented.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sibling path the engine writes before renaming over `path`.
    pub(crate) fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
