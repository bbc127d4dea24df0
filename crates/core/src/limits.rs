//! Size limits for contract inputs
//!
//! Limits are enforced by contract code before any state is written.
//! Violations surface as reverts with a fixed reason.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input limits for the star registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum star name length in bytes (default: 256)
    pub max_star_name_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_star_name_bytes: 256,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_star_name_bytes: 16,
        }
    }

    /// Validate a star name
    ///
    /// Names must be non-empty and at most `max_star_name_bytes` long.
    pub fn validate_star_name(&self, name: &str) -> Result<(), LimitError> {
        if name.is_empty() {
            return Err(LimitError::EmptyName);
        }
        if name.len() > self.max_star_name_bytes {
            return Err(LimitError::NameTooLong {
                actual: name.len(),
                max: self.max_star_name_bytes,
            });
        }
        Ok(())
    }
}

/// Limit violation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Star name is empty
    #[error("star name is empty")]
    EmptyName,

    /// Star name exceeds the maximum length
    #[error("star name too long: {actual} bytes exceeds maximum {max}")]
    NameTooLong {
        /// Actual length
        actual: usize,
        /// Maximum allowed
        max: usize,
    },
}
