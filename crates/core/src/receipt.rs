//! Execution receipts and event logs
//!
//! Every metered call produces a `Receipt`, whether it committed or reverted.
//! Logs emitted by a reverted call are discarded with the rest of its effects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Address, Wei};
use crate::value::Value;

/// Final status of an executed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// All effects committed
    Success,
    /// Contract rejected the call; effects discarded, fee charged
    Reverted,
    /// Gas limit exhausted; effects discarded, full limit charged
    OutOfGas,
}

/// An event emitted by a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Emitting contract
    pub address: Address,
    /// Event name (e.g. `"Transfer"`)
    pub event: String,
    /// Named event fields
    pub fields: BTreeMap<String, Value>,
}

impl Log {
    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Outcome record of a metered call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transaction id assigned by the engine
    pub txn_id: u64,
    /// Calling account (pays the fee)
    pub from: Address,
    /// Called contract
    pub to: Address,
    /// Final status
    pub status: ExecutionStatus,
    /// Gas limit of the call
    pub gas_limit: u64,
    /// Gas consumed (equals `gas_limit` on out-of-gas)
    pub gas_used: u64,
    /// Price charged per unit of gas
    pub effective_gas_price: Wei,
    /// Total fee charged to `from`
    pub fee: Wei,
    /// Events emitted (empty unless `status` is `Success`)
    pub logs: Vec<Log>,
    /// Revert reason, if the call reverted
    pub revert_reason: Option<String>,
}

impl Receipt {
    /// Check whether the call committed
    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }

    /// Iterate logs with the given event name
    pub fn logs_named<'a>(&'a self, event: &'a str) -> impl Iterator<Item = &'a Log> + 'a {
        self.logs.iter().filter(move |log| log.event == event)
    }

    /// Export the receipt as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
