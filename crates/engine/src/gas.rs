//! Gas schedule and metering
//!
//! Every metered call starts with a gas limit. Storage access, value
//! transfers and logs charge a flat cost from the schedule; exceeding the
//! limit aborts the call with `Error::OutOfGas`.

use serde::{Deserialize, Serialize};
use starnotary_core::{Error, Result};

/// Per-operation gas costs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSchedule {
    /// Charged once per call before any contract code runs
    pub intrinsic: u64,
    /// Reading one storage slot or balance
    pub storage_read: u64,
    /// Writing a slot that currently holds no value
    pub storage_write_new: u64,
    /// Overwriting a slot that already holds a value
    pub storage_write_existing: u64,
    /// Deleting a slot
    pub storage_delete: u64,
    /// Moving value out of the contract
    pub value_transfer: u64,
    /// Emitting one log
    pub log_base: u64,
    /// Per byte of log field data
    pub log_byte: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            intrinsic: 21_000,
            storage_read: 2_100,
            storage_write_new: 20_000,
            storage_write_existing: 5_000,
            storage_delete: 5_000,
            value_transfer: 9_000,
            log_base: 375,
            log_byte: 8,
        }
    }
}

/// Tracks gas consumption of one call against its limit
#[derive(Debug, Clone)]
pub struct GasMeter {
    limit: u64,
    used: u64,
}

impl GasMeter {
    /// Create a meter with nothing consumed
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Consume `amount` gas
    ///
    /// On failure nothing is consumed; the caller aborts the call.
    pub fn charge(&mut self, amount: u64) -> Result<()> {
        let required = self.used.saturating_add(amount);
        if required > self.limit {
            return Err(Error::OutOfGas {
                limit: self.limit,
                required,
            });
        }
        self.used = required;
        Ok(())
    }

    /// Gas consumed so far
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Gas still available
    pub fn remaining(&self) -> u64 {
        self.limit - self.used
    }

    /// Gas limit of the call
    pub fn limit(&self) -> u64 {
        self.limit
    }
}
