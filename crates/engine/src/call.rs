//! Call options supplied by the caller of a metered operation

use starnotary_core::{Address, Wei};

/// Who is calling, with how much value attached, under what gas terms
///
/// # Example
///
/// ```ignore
/// let call = Call::new(buyer).value(10 * units::FINNEY).max_fee_per_gas(2 * units::GWEI);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    /// Calling account; pays the attached value and the fee
    pub from: Address,
    /// Value moved from `from` to the contract before contract code runs
    pub value: Wei,
    /// Gas limit; the chain default when `None`
    pub gas_limit: Option<u64>,
    /// Highest acceptable price per gas; any price is accepted when `None`
    pub max_fee_per_gas: Option<Wei>,
}

impl Call {
    /// A call from `from` with no value and default gas terms
    pub fn new(from: Address) -> Self {
        Self {
            from,
            value: 0,
            gas_limit: None,
            max_fee_per_gas: None,
        }
    }

    /// Attach value
    pub fn value(mut self, value: Wei) -> Self {
        self.value = value;
        self
    }

    /// Set the gas limit
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set the highest acceptable price per gas
    pub fn max_fee_per_gas(mut self, max_fee_per_gas: Wei) -> Self {
        self.max_fee_per_gas = Some(max_fee_per_gas);
        self
    }
}

impl From<Address> for Call {
    fn from(from: Address) -> Self {
        Call::new(from)
    }
}
