//! Value types stored in the unified store
//!
//! `Value` is the single enum used for balances, contract metadata and
//! contract storage slots. `Versioned<T>` pairs a value with the commit
//! version that wrote it.

use serde::{Deserialize, Serialize};

use crate::types::{Address, Wei};

/// Unified value for all stored state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean flag (operator approvals)
    Bool(bool),
    /// Unsigned integer (balances, prices, counters)
    Uint(u128),
    /// UTF-8 string (star names, metadata)
    Str(String),
    /// Account reference (owners, approvals)
    Address(Address),
}

impl Value {
    /// Get the boolean, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer, if this is a `Uint`
    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string, if this is a `Str`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the address, if this is an `Address`
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// Approximate encoded size in bytes, used for log gas pricing
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::Bool(_) => 1,
            Value::Uint(_) => 16,
            Value::Str(s) => s.len(),
            Value::Address(_) => 20,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Wei> for Value {
    fn from(n: Wei) -> Self {
        Value::Uint(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n as u128)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<Address> for Value {
    fn from(a: Address) -> Self {
        Value::Address(a)
    }
}

/// A value together with the commit version that wrote it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// The stored value
    pub value: T,
    /// Commit version of the write
    pub version: u64,
}

impl<T> Versioned<T> {
    /// Wrap a value with its version
    pub fn new(value: T, version: u64) -> Self {
        Self { value, version }
    }

    /// Discard the version
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Versioned form of [`Value`] as returned by storage reads
pub type VersionedValue = Versioned<Value>;
