//! Transaction context for a single call
//!
//! TransactionContext buffers every write and delete of one call on top of a
//! snapshot taken when the call began. Reads see the call's own writes
//! (read-your-writes); nothing reaches storage until `commit`, which applies
//! the whole write set as one batch. `abort` discards the buffers.
//!
//! Calls are executed one at a time, so no conflict validation is needed at
//! commit: the snapshot is always current when the call starts.

use std::collections::{BTreeMap, BTreeSet};

use starnotary_core::{Error, Key, Result, SnapshotView, Storage, Value};

/// Summary of pending operations that would be rolled back on abort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOperations {
    /// Number of pending put operations
    pub puts: usize,
    /// Number of pending delete operations
    pub deletes: usize,
}

impl PendingOperations {
    /// Total number of pending operations
    pub fn total(&self) -> usize {
        self.puts + self.deletes
    }

    /// Check if there are no pending operations
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Status of a transaction in its lifecycle
///
/// State transitions:
/// - `Active` → `Committed` (commit)
/// - `Active` → `Aborted` (revert, out of gas, or error)
///
/// Terminal states (no transitions allowed):
/// - `Committed`
/// - `Aborted`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Transaction is executing, can read/write
    Active,
    /// Transaction committed successfully
    Committed {
        /// Version assigned to the write set
        version: u64,
    },
    /// Transaction was aborted
    Aborted {
        /// Human-readable reason for abort
        reason: String,
    },
}

/// Buffered read/write state of one call
pub struct TransactionContext {
    /// Transaction id, unique per engine
    pub txn_id: u64,
    /// Storage version the snapshot was taken at
    pub start_version: u64,
    /// Released at commit or abort so the store's shared map is not pinned
    snapshot: Option<Box<dyn SnapshotView>>,
    write_set: BTreeMap<Key, Value>,
    delete_set: BTreeSet<Key>,
    status: TransactionStatus,
}

impl std::fmt::Debug for TransactionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionContext")
            .field("txn_id", &self.txn_id)
            .field("start_version", &self.start_version)
            .field("writes", &self.write_set.len())
            .field("deletes", &self.delete_set.len())
            .field("status", &self.status)
            .finish()
    }
}

impl TransactionContext {
    /// Create a new active transaction over `snapshot`
    pub fn new(txn_id: u64, snapshot: Box<dyn SnapshotView>) -> Self {
        let start_version = snapshot.version();
        Self {
            txn_id,
            start_version,
            snapshot: Some(snapshot),
            write_set: BTreeMap::new(),
            delete_set: BTreeSet::new(),
            status: TransactionStatus::Active,
        }
    }

    /// Current status
    pub fn status(&self) -> &TransactionStatus {
        &self.status
    }

    /// Check whether the transaction accepts reads and writes
    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(Error::TransactionNotActive {
                state: format!("{:?}", self.status),
            })
        }
    }

    /// Read a key, seeing this transaction's own writes and deletes first
    pub fn get(&self, key: &Key) -> Result<Option<Value>> {
        self.ensure_active()?;
        if self.delete_set.contains(key) {
            return Ok(None);
        }
        if let Some(value) = self.write_set.get(key) {
            return Ok(Some(value.clone()));
        }
        match &self.snapshot {
            Some(snapshot) => Ok(snapshot.get(key)?.map(|vv| vv.value)),
            None => Ok(None),
        }
    }

    /// Check whether a key currently holds a value
    pub fn exists(&self, key: &Key) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Buffer a write
    pub fn put(&mut self, key: Key, value: Value) -> Result<()> {
        self.ensure_active()?;
        self.delete_set.remove(&key);
        self.write_set.insert(key, value);
        Ok(())
    }

    /// Buffer a delete
    pub fn delete(&mut self, key: Key) -> Result<()> {
        self.ensure_active()?;
        self.write_set.remove(&key);
        self.delete_set.insert(key);
        Ok(())
    }

    /// Operations that would be applied on commit
    pub fn pending_operations(&self) -> PendingOperations {
        PendingOperations {
            puts: self.write_set.len(),
            deletes: self.delete_set.len(),
        }
    }

    /// Apply the write set to `storage` as one atomic batch
    ///
    /// A transaction with no pending operations commits without touching
    /// storage and reports the start version.
    pub fn commit(&mut self, storage: &dyn Storage) -> Result<u64> {
        self.ensure_active()?;
        self.snapshot = None;
        let version = if self.pending_operations().is_empty() {
            self.start_version
        } else {
            let writes = std::mem::take(&mut self.write_set).into_iter().collect();
            let deletes = std::mem::take(&mut self.delete_set).into_iter().collect();
            storage.apply_batch(writes, deletes)?
        };
        self.status = TransactionStatus::Committed { version };
        Ok(version)
    }

    /// Discard all buffered operations
    pub fn abort(&mut self, reason: impl Into<String>) -> Result<()> {
        self.ensure_active()?;
        self.snapshot = None;
        self.write_set.clear();
        self.delete_set.clear();
        self.status = TransactionStatus::Aborted {
            reason: reason.into(),
        };
        Ok(())
    }
}
