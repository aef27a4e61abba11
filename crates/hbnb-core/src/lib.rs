//! HBNB Core - Entity schema, records and file-backed storage.
//!
//! This crate provides the object store the HBNB console operates on: a
//! closed set of entity kinds, the [`Record`] type with its two construction
//! paths, and [`FileStorage`], an insertion-ordered in-memory mapping that
//! persists to a single JSON file.

pub mod catalog;
pub mod error;
pub mod record;
pub mod storage;
pub mod value;

pub use catalog::Kind;
pub use error::Error;
pub use record::{Record, Snapshot};
pub use storage::{FileStorage, StorageConfig};
pub use value::{Value, ValueType};

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
