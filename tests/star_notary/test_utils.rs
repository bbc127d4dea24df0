//! Shared helpers for the StarNotary suite

#![allow(dead_code)]

use std::sync::{Arc, Once};

pub use starnotary::{
    reasons, token, units, Address, Call, Chain, ChainConfig, Error, ExecutionStatus, Receipt,
    StarId, StarNotary, Value, Wei, NON_PAYABLE,
};

/// Price used throughout the marketplace tests (.01 ether)
pub const STAR_PRICE: Wei = 10 * units::FINNEY;

static INIT_TRACING: Once = Once::new();

/// Route engine and registry logs to the test harness output
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// A deployed contract plus the chain's development accounts
pub struct TestNotary {
    pub chain: Arc<Chain>,
    pub notary: StarNotary,
    pub accounts: Vec<Address>,
}

impl TestNotary {
    /// Default chain, contract deployed by account 0
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    pub fn with_config(config: ChainConfig) -> Self {
        init_tracing();
        let chain = Arc::new(Chain::new(config).unwrap());
        let accounts = chain.accounts().to_vec();
        let (notary, receipt) = StarNotary::deploy(chain.clone(), &Call::new(accounts[0])).unwrap();
        assert!(receipt.is_success());
        Self {
            chain,
            notary,
            accounts,
        }
    }

    pub fn owner(&self) -> Address {
        self.accounts[0]
    }

    pub fn user1(&self) -> Address {
        self.accounts[1]
    }

    pub fn user2(&self) -> Address {
        self.accounts[2]
    }

    pub fn balance(&self, account: Address) -> Wei {
        self.chain.balance_of(account).unwrap()
    }

    /// Create star `id` owned by `owner`
    pub fn create(&self, owner: Address, name: &str, id: u64) -> Receipt {
        self.notary
            .create_star(&Call::new(owner), name, StarId(id))
            .unwrap()
    }

    /// Create star `id` owned by `owner` and list it at `price`
    pub fn create_listed(&self, owner: Address, name: &str, id: u64, price: Wei) {
        self.create(owner, name, id);
        self.notary
            .put_star_up_for_sale(&Call::new(owner), StarId(id), price)
            .unwrap();
    }

    /// Observable registry state for the given star ids
    pub fn capture(&self, ids: &[u64]) -> Capture {
        let stars = ids
            .iter()
            .map(|&id| {
                let id = StarId(id);
                (
                    self.notary.owner_of(id).ok(),
                    self.notary.lookup_star_name(id).unwrap(),
                    self.notary.stars_for_sale(id).unwrap(),
                    self.notary.get_approved(id).ok().flatten(),
                )
            })
            .collect();
        let counts = self
            .accounts
            .iter()
            .map(|a| self.notary.balance_of(*a).unwrap())
            .collect();
        Capture { stars, counts }
    }
}

/// Registry state snapshot used to check that a failed call changed nothing
#[derive(Debug, PartialEq, Eq)]
pub struct Capture {
    stars: Vec<(Option<Address>, String, Option<Wei>, Option<Address>)>,
    counts: Vec<u64>,
}

/// Assert that `result` is a revert with exactly `reason`
pub fn assert_reverted<T: std::fmt::Debug>(result: starnotary::Result<T>, reason: &str) -> Receipt {
    let err = result.unwrap_err();
    assert_eq!(err.reason(), Some(reason), "unexpected error: {}", err);
    let receipt = err.receipt().expect("revert carries a receipt").clone();
    assert_eq!(receipt.status, ExecutionStatus::Reverted);
    receipt
}
