//! Storage layer for StarNotary
//!
//! This crate implements the in-memory storage backend with:
//! - UnifiedStore: BTreeMap-based storage with RwLock
//! - Version management with AtomicU64
//! - Atomic batch application (one version per committed call)
//! - ClonedSnapshotView implementation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod snapshot;
pub mod unified;

pub use snapshot::ClonedSnapshotView;
pub use unified::UnifiedStore;
