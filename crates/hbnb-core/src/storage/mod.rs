//! Storage layer for the HBNB store.
//!
//! This module provides a JSON-file-backed storage engine: an insertion-ordered
//! in-memory mapping that is loaded once and rewritten in full on every flush.

mod config;
mod engine;

pub use config::{StorageConfig, DEFAULT_FILE};
pub use engine::FileStorage;
