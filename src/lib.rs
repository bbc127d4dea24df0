//! StarNotary - a star registry and marketplace contract
//!
//! Users register named stars as unique tokens, list them for sale, buy
//! them with attached value, exchange them and give them away. Every call
//! runs on an in-process, gas-metered execution engine where each call is
//! all-or-nothing.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use starnotary::{units, Call, Chain, StarId, StarNotary};
//!
//! let chain = Arc::new(Chain::ephemeral()?);
//! let [alice, bob] = [chain.accounts()[0], chain.accounts()[1]];
//! let (notary, _) = StarNotary::deploy(chain.clone(), &Call::new(alice))?;
//!
//! notary.create_star(&Call::new(alice), "awesome star", StarId(1))?;
//! notary.put_star_up_for_sale(&Call::new(alice), StarId(1), 10 * units::FINNEY)?;
//! notary.buy_star(&Call::new(bob).value(50 * units::FINNEY), StarId(1))?;
//! assert_eq!(notary.owner_of(StarId(1))?, bob);
//! ```
//!
//! # Architecture
//!
//! Contracts go through the engine's [`Chain`], which owns storage and
//! transactions. Storage and concurrency internals are not exposed.

pub use starnotary_core::{
    units, Address, Error, ExecutionStatus, LimitError, Limits, Log, Receipt, Result, StarId,
    Value, Wei,
};
pub use starnotary_engine::{
    Call, CallContext, Chain, ChainConfig, StateReader, ViewContext, NON_PAYABLE,
};
pub use starnotary_registry::{reasons, star_notary, token, Star, StarNotary};
