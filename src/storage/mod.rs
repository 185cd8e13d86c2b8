//! Durable key/value storage for form snapshots.

pub mod json_backend;
pub mod memory;
pub mod snapshot;

use crate::errors::StorageResult;

/// Abstraction over string-keyed durable storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use snapshot::{LoadOutcome, Snapshot, CURRENT_VERSION, DEFAULT_KEY, LEGACY_KEY};
