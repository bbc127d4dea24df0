//! Core trait definitions for storage and snapshots
//!
//! - `Storage`: the mutable, versioned key-value backend
//! - `SnapshotView`: an immutable point-in-time read view
//!
//! Both are object safe so the transaction layer can hold them as trait
//! objects without knowing the concrete backend.

use crate::error::Result;
use crate::types::{Address, Key, TypeTag};
use crate::value::{Value, VersionedValue};

/// Versioned key-value storage backend
///
/// Every write is assigned a monotonically increasing version. Batches share
/// one version and are applied atomically.
pub trait Storage: Send + Sync {
    /// Get the latest value for a key
    fn get(&self, key: &Key) -> Result<Option<VersionedValue>>;

    /// Write a single value, returning its version
    fn put(&self, key: Key, value: Value) -> Result<u64>;

    /// Delete a key, returning the previous value if present
    fn delete(&self, key: &Key) -> Result<Option<VersionedValue>>;

    /// Apply writes and deletes atomically under one new version
    ///
    /// Returns the version assigned to the batch.
    fn apply_batch(&self, writes: Vec<(Key, Value)>, deletes: Vec<Key>) -> Result<u64>;

    /// Scan keys of `namespace`/`type_tag` whose user key starts with `prefix`
    ///
    /// Results are in key order.
    fn scan_prefix(
        &self,
        namespace: &Address,
        type_tag: TypeTag,
        prefix: &[u8],
    ) -> Result<Vec<(Key, VersionedValue)>>;

    /// Version of the most recent write (0 if nothing was written)
    fn current_version(&self) -> u64;

    /// Create an immutable snapshot of the current state
    fn snapshot(&self) -> Box<dyn SnapshotView>;
}

/// Immutable point-in-time view of storage
pub trait SnapshotView: Send + Sync {
    /// Get a value as of the snapshot version
    fn get(&self, key: &Key) -> Result<Option<VersionedValue>>;

    /// Scan keys as of the snapshot version, in key order
    fn scan_prefix(
        &self,
        namespace: &Address,
        type_tag: TypeTag,
        prefix: &[u8],
    ) -> Result<Vec<(Key, VersionedValue)>>;

    /// Version this snapshot was taken at
    fn version(&self) -> u64;
}
