//! Transaction manager for allocating transaction ids
//!
//! The engine runs calls one at a time, so the manager only hands out
//! unique, monotonically increasing transaction ids and opens contexts over
//! a fresh storage snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

use starnotary_core::Storage;
use tracing::trace;

use crate::TransactionContext;

/// Opens transactions over a storage backend
#[derive(Debug)]
pub struct TransactionManager {
    /// Next transaction ID
    next_txn_id: AtomicU64,
}

impl TransactionManager {
    /// Create a new transaction manager; the first id handed out is 1
    pub fn new() -> Self {
        TransactionManager {
            next_txn_id: AtomicU64::new(1),
        }
    }

    /// Open a new transaction over a snapshot of `storage`
    pub fn begin(&self, storage: &dyn Storage) -> TransactionContext {
        let txn_id = self.next_txn_id.fetch_add(1, Ordering::SeqCst);
        let txn = TransactionContext::new(txn_id, storage.snapshot());
        trace!(target: "starnotary::txn", txn_id, start_version = txn.start_version, "Begin");
        txn
    }

    /// Number of transactions opened so far
    pub fn transactions_started(&self) -> u64 {
        self.next_txn_id.load(Ordering::SeqCst) - 1
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}
