//! Star registry contracts for StarNotary
//!
//! This crate provides the contract code that runs on the engine:
//! - token: ERC-721 style ownership ledger (owners, counts, approvals)
//! - star_notary: the StarNotary registry and marketplace built on it
//!
//! Contract state lives only in storage slots; the handles here are cheap
//! to clone and hold no cached state.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod slots;
pub mod star_notary;
pub mod token;

pub use star_notary::{reasons, Star, StarNotary};
