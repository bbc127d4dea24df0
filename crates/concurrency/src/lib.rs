//! Transaction layer for StarNotary
//!
//! Every engine call runs inside a `TransactionContext`: reads come from a
//! snapshot, writes are buffered, and the whole write set is either applied
//! to storage as one batch or discarded. This gives each call all-or-nothing
//! semantics without any locking inside contract code.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod transaction;

pub use manager::TransactionManager;
pub use transaction::{PendingOperations, TransactionContext, TransactionStatus};
