//! Chain configuration via `starnotary.toml`
//!
//! All fields have defaults, so an empty document is a valid configuration.
//! Amounts are expressed in gwei / ether in the file to keep them inside the
//! TOML integer range; accessors convert to wei.

use serde::{Deserialize, Serialize};
use std::path::Path;

use starnotary_core::{units, Error, Limits, Result, Wei};

use crate::gas::GasSchedule;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "starnotary.toml";

/// Execution environment configuration
///
/// # Example
///
/// ```toml
/// chain_id = 1337
/// base_fee_gwei = 1
/// default_gas_limit = 500000
///
/// [gas]
/// intrinsic = 21000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Chain identifier, reported in logs
    pub chain_id: u64,
    /// Price charged per unit of gas, in gwei
    pub base_fee_gwei: u64,
    /// Gas limit used when a call does not set one
    pub default_gas_limit: u64,
    /// Upper bound for any call's gas limit
    pub block_gas_limit: u64,
    /// Number of funded development accounts created at startup
    pub dev_accounts: usize,
    /// Starting balance of each development account, in ether
    pub initial_balance_ether: u64,
    /// Gas costs
    pub gas: GasSchedule,
    /// Contract input limits
    pub limits: Limits,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 1337,
            base_fee_gwei: 1,
            default_gas_limit: 500_000,
            block_gas_limit: 30_000_000,
            dev_accounts: 10,
            initial_balance_ether: 100,
            gas: GasSchedule::default(),
            limits: Limits::default(),
        }
    }
}

impl ChainConfig {
    /// Base fee per gas in wei
    pub fn base_fee(&self) -> Wei {
        self.base_fee_gwei as Wei * units::GWEI
    }

    /// Starting balance of each development account in wei
    pub fn initial_balance(&self) -> Wei {
        self.initial_balance_ether as Wei * units::ETHER
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the default gas limit cannot cover the
    /// intrinsic cost or exceeds the block gas limit.
    pub fn validate(&self) -> Result<()> {
        if self.default_gas_limit < self.gas.intrinsic {
            return Err(Error::Config(format!(
                "default_gas_limit {} is below intrinsic gas {}",
                self.default_gas_limit, self.gas.intrinsic
            )));
        }
        if self.default_gas_limit > self.block_gas_limit {
            return Err(Error::Config(format!(
                "default_gas_limit {} exceeds block_gas_limit {}",
                self.default_gas_limit, self.block_gas_limit
            )));
        }
        if self.limits.max_star_name_bytes == 0 {
            return Err(Error::Config(
                "limits.max_star_name_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ChainConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or is inconsistent.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize this config to TOML and write it to the given path
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file content with comments
    pub fn default_toml() -> &'static str {
        r#"# StarNotary chain configuration

# Chain identifier
chain_id = 1337

# Price per unit of gas, in gwei
base_fee_gwei = 1

# Gas limit for calls that do not set one, and the hard upper bound
default_gas_limit = 500000
block_gas_limit = 30000000

# Funded development accounts
dev_accounts = 10
initial_balance_ether = 100

# [gas]
# intrinsic = 21000
# storage_read = 2100
# storage_write_new = 20000
# storage_write_existing = 5000
# storage_delete = 5000
# value_transfer = 9000
# log_base = 375
# log_byte = 8

# [limits]
# max_star_name_bytes = 256
"#
    }
}
