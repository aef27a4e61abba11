//! Storage engine implementation.

use super::StorageConfig;
use crate::error::Error;
use crate::record::Record;
use crate::Result;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// The live mapping from `<Kind>.<id>` to record.
pub type Objects = IndexMap<String, Record>;

/// The store: an in-memory mapping persisted to one JSON file.
///
/// The mapping keeps insertion order, so listings come out in creation order
/// and a reload reproduces the order of the file.
#[derive(Debug)]
pub struct FileStorage {
    config: StorageConfig,
    objects: Objects,
}

impl FileStorage {
    /// Create an empty store bound to `config.path` without reading it.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            objects: IndexMap::new(),
        }
    }

    /// Create a store and load the backing file.
    pub fn open(config: StorageConfig) -> Result<Self> {
        let mut storage = Self::new(config);
        storage.load()?;
        Ok(storage)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// The live mapping.
    pub fn all(&self) -> &Objects {
        &self.objects
    }

    /// The live mapping, mutable.
    pub fn all_mut(&mut self) -> &mut Objects {
        &mut self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Insert or overwrite the entry for `record`. Does not flush.
    pub fn register(&mut self, record: Record) {
        let key = record.key();
        debug!(key = %key, "register");
        self.objects.insert(key, record);
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.objects.get_mut(key)
    }

    /// Remove an entry, keeping the order of the rest. Does not flush.
    pub fn remove(&mut self, key: &str) -> Option<Record> {
        let removed = self.objects.shift_remove(key);
        if removed.is_some() {
            debug!(key = %key, "remove");
        }
        removed
    }

    /// Count entries whose key starts with `<kind>.`.
    pub fn count(&self, kind: &str) -> usize {
        let prefix = format!("{}.", kind);
        self.objects.keys().filter(|k| k.starts_with(&prefix)).count()
    }

    /// Records whose key starts with `<kind>.`, or every record.
    pub fn filter<'a>(&'a self, kind: Option<&str>) -> impl Iterator<Item = &'a Record> + 'a {
        let prefix = kind.map(|k| format!("{}.", k));
        self.objects
            .iter()
            .filter(move |(key, _)| prefix.as_ref().map_or(true, |p| key.starts_with(p.as_str())))
            .map(|(_, record)| record)
    }

    /// Serialize every record and replace the backing file.
    ///
    /// The full document is encoded before anything touches the disk, then
    /// written to a sibling file and renamed into place.
    pub fn flush(&self) -> Result<()> {
        let document: serde_json::Map<String, serde_json::Value> = self
            .objects
            .iter()
            .map(|(key, record)| (key.clone(), serde_json::Value::Object(record.to_snapshot())))
            .collect();

        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };

        let staging = self.config.staging_path();
        if let Err(e) = fs::write(&staging, &bytes).and_then(|_| fs::rename(&staging, &self.config.path)) {
            warn!(path = %self.config.path.display(), error = %e, "flush failed");
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        info!(path = %self.config.path.display(), records = self.objects.len(), "flushed store");
        Ok(())
    }

    /// Replace the mapping with the contents of the backing file.
    ///
    /// A missing file leaves the store empty. Any malformed entry, including
    /// one naming an unknown kind, fails the whole load and leaves the
    /// current mapping untouched.
    pub fn load(&mut self) -> Result<()> {
        let path = &self.config.path;
        if !path.exists() {
            info!(path = %path.display(), "no backing file, starting empty");
            self.objects.clear();
            return Ok(());
        }

        let text = fs::read_to_string(path)?;
        let document: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&text).map_err(|e| {
                warn!(path = %path.display(), error = %e, "backing file is not a JSON object");
                Error::from(e)
            })?;

        let mut objects = IndexMap::with_capacity(document.len());
        for (key, value) in document {
            let snapshot = match value {
                serde_json::Value::Object(map) => map,
                _ => return Err(Error::invalid_snapshot(key, "entry is not an object")),
            };
            let record = Record::from_snapshot(snapshot)?;
            if record.key() != key {
                return Err(Error::invalid_snapshot(
                    key,
                    format!("entry describes {}", record.key()),
                ));
            }
            objects.insert(key, record);
        }

        info!(path = %path.display(), records = objects.len(), "loaded store");
        self.objects = objects;
        Ok(())
    }
}
