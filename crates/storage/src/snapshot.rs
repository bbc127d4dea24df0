//! ClonedSnapshotView: snapshot implementation via a shared map
//!
//! This module provides version-bounded views of storage for call isolation.
//! A snapshot shares the store's `Arc<BTreeMap>`; the store clones the map
//! on its next write only while some snapshot still holds it.
//!
//! # Design Notes
//!
//! - **O(1) creation**: taking a snapshot is a reference count bump
//! - **Immutable**: Once created, the snapshot never changes
//! - **Version-bounded**: Only returns data visible at snapshot version

use std::collections::BTreeMap;
use std::sync::Arc;

use starnotary_core::{Address, Key, Result, SnapshotView, TypeTag, VersionedValue};

/// A snapshot view over a shared, immutable BTreeMap
///
/// # Example
///
/// ```ignore
/// let store = UnifiedStore::new();
/// // ... write some data ...
/// let snapshot = store.create_snapshot();
///
/// // Writes after snapshot creation are not visible
/// store.put(key, value);
/// assert!(snapshot.get(&key).unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ClonedSnapshotView {
    /// The version at which this snapshot was created
    version: u64,
    /// Storage data as of snapshot time
    data: Arc<BTreeMap<Key, VersionedValue>>,
}

impl ClonedSnapshotView {
    /// Create a new ClonedSnapshotView from existing data
    ///
    /// This is typically called by `UnifiedStore::create_snapshot()`, not directly.
    pub fn new(version: u64, data: impl Into<Arc<BTreeMap<Key, VersionedValue>>>) -> Self {
        Self {
            version,
            data: data.into(),
        }
    }

    /// Number of keys visible in this snapshot
    pub fn len(&self) -> usize {
        self.data
            .values()
            .filter(|vv| vv.version <= self.version)
            .count()
    }

    /// Check whether the snapshot holds no visible keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotView for ClonedSnapshotView {
    fn get(&self, key: &Key) -> Result<Option<VersionedValue>> {
        match self.data.get(key) {
            Some(vv) if vv.version <= self.version => Ok(Some(vv.clone())),
            _ => Ok(None),
        }
    }

    fn scan_prefix(
        &self,
        namespace: &Address,
        type_tag: TypeTag,
        prefix: &[u8],
    ) -> Result<Vec<(Key, VersionedValue)>> {
        let start = Key::new(*namespace, type_tag, prefix.to_vec());
        let results = self
            .data
            .range(start..)
            .take_while(|(k, _)| k.starts_with(namespace, type_tag, prefix))
            .filter(|(_, vv)| vv.version <= self.version)
            .map(|(k, vv)| (k.clone(), vv.clone()))
            .collect();
        Ok(results)
    }

    fn version(&self) -> u64 {
        self.version
    }
}
