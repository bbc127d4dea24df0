//! Core types for StarNotary
//!
//! This module defines the foundational types:
//! - Address: 20-byte account or contract identifier
//! - StarId: Token identifier of a star
//! - Wei: Native value amount
//! - TypeTag: Type discriminator for unified storage
//! - Key: Composite key (namespace + type_tag + user_key)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Native value amount in the smallest denomination
pub type Wei = u128;

/// Denomination constants for [`Wei`] amounts
pub mod units {
    use super::Wei;

    /// 1 wei
    pub const WEI: Wei = 1;
    /// 10^9 wei
    pub const GWEI: Wei = 1_000_000_000;
    /// 10^15 wei (one thousandth of an ether)
    pub const FINNEY: Wei = 1_000_000_000_000_000;
    /// 10^18 wei
    pub const ETHER: Wei = 1_000_000_000_000_000_000;
}

/// 20-byte account identifier
///
/// Addresses identify both externally owned accounts and deployed contracts.
/// The all-zero address is reserved: it never owns a star and is used as the
/// `from` side of mint events.
///
/// Displayed and serialized as a `0x`-prefixed lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The reserved zero address
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create an Address from raw bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Create an Address whose low 8 bytes hold `n` (big-endian)
    ///
    /// Used for deterministic development accounts.
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Get the raw bytes of this Address
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check whether this is the reserved zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 40 || !hex.is_ascii() {
            return Err(Error::invalid_input(format!(
                "address must be 40 hex characters, got '{}'",
                s
            )));
        }
        let mut bytes = [0u8; 20];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| Error::invalid_input(format!("invalid hex in address '{}'", s)))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Token identifier of a star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StarId(pub u64);

impl StarId {
    /// Big-endian encoding, used in storage slots so ids sort numerically
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Decode from the big-endian storage encoding
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; 8] = bytes.try_into().ok()?;
        Some(Self(u64::from_be_bytes(arr)))
    }
}

impl From<u64> for StarId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type tag for storage keys
///
/// Separates account balances, contract metadata, and contract storage slots
/// within one ordered keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeTag {
    /// Native value balance of an account
    Balance = 0x01,
    /// Contract metadata (installed code name)
    Meta = 0x02,
    /// Contract storage slot
    Slot = 0x03,
}

/// Composite storage key
///
/// Ordering is `(namespace, type_tag, user_key)`, so all keys of one account
/// and tag are contiguous and can be range-scanned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    /// Owning account or contract
    pub namespace: Address,
    /// Key kind
    pub type_tag: TypeTag,
    /// Key bytes within the namespace and tag
    pub user_key: Vec<u8>,
}

impl Key {
    /// Create a new key
    pub fn new(namespace: Address, type_tag: TypeTag, user_key: impl Into<Vec<u8>>) -> Self {
        Self {
            namespace,
            type_tag,
            user_key: user_key.into(),
        }
    }

    /// Balance key of an account
    pub fn balance(account: Address) -> Self {
        Self::new(account, TypeTag::Balance, Vec::new())
    }

    /// Metadata key of a contract
    pub fn meta(contract: Address, name: &str) -> Self {
        Self::new(contract, TypeTag::Meta, name.as_bytes())
    }

    /// Storage slot key of a contract
    pub fn slot(contract: Address, slot: impl Into<Vec<u8>>) -> Self {
        Self::new(contract, TypeTag::Slot, slot)
    }

    /// Check whether this key belongs to `namespace`/`type_tag` and its user key
    /// starts with `prefix`
    pub fn starts_with(&self, namespace: &Address, type_tag: TypeTag, prefix: &[u8]) -> bool {
        self.namespace == *namespace
            && self.type_tag == type_tag
            && self.user_key.starts_with(prefix)
    }
}
