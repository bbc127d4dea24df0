//! UnifiedStore: storage backend with BTreeMap and version management
//!
//! This module implements the Storage trait using:
//! - `BTreeMap<Key, VersionedValue>` for ordered key storage
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing version numbers
//!
//! # Design Notes
//!
//! - **No version history**: Each key stores only its latest value
//! - **Copy-on-write**: the map lives in an `Arc`; snapshots share it and a
//!   write clones it only while a snapshot is outstanding
//! - **Batch atomicity**: `apply_batch` holds the write lock for the whole
//!   batch, so no snapshot can observe a partially applied call

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use starnotary_core::{
    Address, Key, Result, SnapshotView, Storage, TypeTag, Value, VersionedValue,
};

use crate::snapshot::ClonedSnapshotView;

/// Unified storage backend using BTreeMap with RwLock
///
/// Thread-safe through `parking_lot::RwLock` and `AtomicU64`.
#[derive(Debug)]
pub struct UnifiedStore {
    /// The main data store: ordered map from Key to its latest versioned value
    data: RwLock<Arc<BTreeMap<Key, VersionedValue>>>,
    /// Global version counter for monotonically increasing versions
    version: AtomicU64,
}

impl UnifiedStore {
    /// Create a new empty UnifiedStore
    ///
    /// Initial version is 0 (no writes have occurred).
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Arc::new(BTreeMap::new())),
            version: AtomicU64::new(0),
        }
    }

    /// Allocate the next version atomically
    fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Create a snapshot of the current state
    ///
    /// The snapshot shares the current map and is immutable. Creation is
    /// O(1); the next write clones the map if the snapshot is still alive.
    pub fn create_snapshot(&self) -> ClonedSnapshotView {
        // Read lock before reading the version, so a concurrent batch cannot
        // land between the two and be hidden by the version bound.
        let data = self.data.read();
        let version = self.current_version();
        ClonedSnapshotView::new(version, Arc::clone(&*data))
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Default for UnifiedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for UnifiedStore {
    fn get(&self, key: &Key) -> Result<Option<VersionedValue>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: Key, value: Value) -> Result<u64> {
        let mut guard = self.data.write();
        let version = self.next_version();
        Arc::make_mut(&mut *guard).insert(key, VersionedValue::new(value, version));
        Ok(version)
    }

    fn delete(&self, key: &Key) -> Result<Option<VersionedValue>> {
        let mut guard = self.data.write();
        if !guard.contains_key(key) {
            return Ok(None);
        }
        let removed = Arc::make_mut(&mut *guard).remove(key);
        if removed.is_some() {
            self.next_version();
        }
        Ok(removed)
    }

    fn apply_batch(&self, writes: Vec<(Key, Value)>, deletes: Vec<Key>) -> Result<u64> {
        let mut guard = self.data.write();
        let data = Arc::make_mut(&mut *guard);
        let version = self.next_version();
        let (puts, dels) = (writes.len(), deletes.len());

        for (key, value) in writes {
            data.insert(key, VersionedValue::new(value, version));
        }
        for key in &deletes {
            data.remove(key);
        }

        trace!(target: "starnotary::storage", version, puts, deletes = dels, "Applied batch");
        Ok(version)
    }

    fn scan_prefix(
        &self,
        namespace: &Address,
        type_tag: TypeTag,
        prefix: &[u8],
    ) -> Result<Vec<(Key, VersionedValue)>> {
        let data = self.data.read();
        let start = Key::new(*namespace, type_tag, prefix.to_vec());
        Ok(data
            .range(start..)
            .take_while(|(k, _)| k.starts_with(namespace, type_tag, prefix))
            .map(|(k, vv)| (k.clone(), vv.clone()))
            .collect())
    }

    fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> Box<dyn SnapshotView> {
        Box::new(self.create_snapshot())
    }
}
