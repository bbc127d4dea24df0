//! Execution engine for StarNotary
//!
//! This crate provides the environment contracts run in:
//! - Chain: store ownership, account balances, contract deployment
//! - Call: caller identity, attached value and gas terms
//! - CallContext / ViewContext: what contract code sees while it runs
//! - GasSchedule / GasMeter: flat per-operation metering
//! - ChainConfig: TOML-loadable configuration
//!
//! Every mutating call is all-or-nothing: contract writes, value movements
//! and logs are committed together or not at all. Only the fee survives a
//! failed call.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod call;
pub mod chain;
pub mod config;
pub mod context;
pub mod gas;

pub use call::Call;
pub use chain::{derive_address, Chain, FEE_COLLECTOR, NON_PAYABLE};
pub use config::{ChainConfig, CONFIG_FILE_NAME};
pub use context::{CallContext, StateReader, ViewContext};
pub use gas::{GasMeter, GasSchedule};
