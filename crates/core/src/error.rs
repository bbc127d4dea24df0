//! Error types for StarNotary
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Revert vs. pre-execution failures
//!
//! `Reverted` and `OutOfGas` are raised while a call executes: its state
//! changes are discarded but the caller still pays for the gas consumed.
//! `InsufficientFunds`, `FeeTooLow` and `InvalidInput` are raised before
//! execution starts and charge nothing. So is a `Reverted` without a
//! receipt, which the engine raises for value sent to a non-payable call.

use thiserror::Error;

use crate::receipt::Receipt;
use crate::types::Wei;

/// Result type alias for StarNotary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for StarNotary
#[derive(Debug, Error)]
pub enum Error {
    /// The contract rejected the call
    ///
    /// Raised by contract code with `receipt: None`; the engine attaches the
    /// receipt after charging the fee.
    #[error("execution reverted: {reason}")]
    Reverted {
        /// Fixed, human-readable revert reason
        reason: String,
        /// Receipt of the reverted call, once charged
        receipt: Option<Box<Receipt>>,
    },

    /// The call exhausted its gas limit
    #[error("out of gas: limit {limit}, required at least {required}")]
    OutOfGas {
        /// Gas limit of the call
        limit: u64,
        /// Gas that the failing step needed in total
        required: u64,
    },

    /// Caller cannot cover `value + gas_limit * gas_price`
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Maximum cost of the call
        required: Wei,
        /// Caller balance
        available: Wei,
    },

    /// The offered max fee per gas is below the chain base fee
    #[error("max fee per gas {max_fee_per_gas} is below base fee {base_fee}")]
    FeeTooLow {
        /// Offered maximum
        max_fee_per_gas: Wei,
        /// Chain base fee
        base_fee: Wei,
    },

    /// Loud miss of a query that requires the entity to exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input rejected before execution
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage layer error (type mismatch, corrupted slot)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Operation attempted on a finished transaction
    #[error("Transaction not active (state: {state})")]
    TransactionNotActive {
        /// Current transaction state
        state: String,
    },

    /// I/O error (configuration file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a revert with a fixed reason
    pub fn revert(reason: impl Into<String>) -> Self {
        Error::Reverted {
            reason: reason.into(),
            receipt: None,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Revert reason, if this is a revert
    pub fn reason(&self) -> Option<&str> {
        match self {
            Error::Reverted { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Receipt attached by the engine, if any
    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            Error::Reverted { receipt, .. } => receipt.as_deref(),
            _ => None,
        }
    }

    /// Check whether this is a revert
    pub fn is_revert(&self) -> bool {
        matches!(self, Error::Reverted { .. })
    }

    /// Check whether the failed call still charged a fee
    ///
    /// A revert charged the caller only if the engine attached a receipt;
    /// reverts raised before execution (non-payable value) carry none.
    pub fn charges_fee(&self) -> bool {
        match self {
            Error::Reverted { receipt, .. } => receipt.is_some(),
            Error::InsufficientFunds { .. } | Error::FeeTooLow { .. } | Error::InvalidInput(_) => {
                false
            }
            _ => true,
        }
    }
}
