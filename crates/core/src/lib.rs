//! Core types and traits for StarNotary
//!
//! This crate defines the foundational types used throughout the system:
//! - Address: 20-byte account / contract identifier
//! - StarId: Unique identifier for a star token
//! - Wei: Native value unit and denomination constants
//! - Key: Composite key (namespace + type_tag + user_key)
//! - Value: Unified value enum for stored state
//! - Error: Error type hierarchy
//! - Traits: Core trait definitions (Storage, SnapshotView)
//! - Receipt: Outcome record of an executed call, with emitted logs
//! - Limits: Input size limits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod receipt;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use limits::{LimitError, Limits};
pub use receipt::{ExecutionStatus, Log, Receipt};
pub use traits::{SnapshotView, Storage};
pub use types::{units, Address, Key, StarId, TypeTag, Wei};
pub use value::{Value, Versioned, VersionedValue};
