//! Chain: the in-process execution environment
//!
//! The chain owns the store, account balances and deployed contract markers.
//! Contract code never touches storage directly: every mutating operation is
//! a closure run by [`Chain::execute`] inside one transaction.
//!
//! # Call lifecycle
//!
//! ```text
//! 1. Pre-checks: no value on non-payable calls, gas limit bounds,
//!    max fee >= base fee,
//!    balance >= value + gas_limit * base_fee        (failure: nothing charged)
//! 2. Begin transaction over a fresh snapshot
//! 3. Charge intrinsic gas, move attached value caller -> contract
//! 4. Run contract closure with a CallContext
//! 5. Ok  -> commit write set as one batch
//!    Err -> discard write set
//! 6. Charge gas_used * base_fee to the caller (full limit on out-of-gas)
//!    in a separate batch, credit the fee collector
//! 7. Return the result with a Receipt
//! ```
//!
//! Calls are serialized by `exec_lock`; views read a snapshot and never block
//! on it.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use starnotary_concurrency::TransactionManager;
use starnotary_core::{
    Address, Error, ExecutionStatus, Key, Receipt, Result, Storage, Value, Wei,
};
use starnotary_storage::UnifiedStore;

use crate::call::Call;
use crate::config::ChainConfig;
use crate::context::{decode_balance, CallContext, ViewContext};

/// Account credited with every charged fee
pub const FEE_COLLECTOR: Address = Address::from_bytes([0xfe; 20]);

/// Revert reason for value attached to a non-payable call
pub const NON_PAYABLE: &str = "Function is not payable";

/// Derive an address from arbitrary seed parts (last 20 bytes of SHA-256)
pub fn derive_address(parts: &[&[u8]]) -> Address {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address::from_bytes(bytes)
}

/// In-process execution environment
///
/// # Example
///
/// ```ignore
/// let chain = Arc::new(Chain::ephemeral()?);
/// let alice = chain.accounts()[0];
/// let (contract, _) = chain.deploy(&Call::new(alice), "Counter", |_| Ok(()))?;
/// let (_, receipt) = chain.execute(contract, &Call::new(alice), |ctx| {
///     ctx.sstore(b"count", 1u64)
/// })?;
/// assert!(receipt.is_success());
/// ```
pub struct Chain {
    store: UnifiedStore,
    txn_manager: TransactionManager,
    config: ChainConfig,
    accounts: Vec<Address>,
    deploy_nonce: AtomicU64,
    exec_lock: Mutex<()>,
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("chain_id", &self.config.chain_id)
            .field("accounts", &self.accounts.len())
            .field("version", &self.store.current_version())
            .finish()
    }
}

impl Chain {
    /// Create a chain and fund its development accounts
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is inconsistent.
    pub fn new(config: ChainConfig) -> Result<Self> {
        config.validate()?;
        let store = UnifiedStore::new();

        let accounts: Vec<Address> = (0..config.dev_accounts as u64)
            .map(|i| derive_address(&[b"starnotary:dev-account:", &i.to_be_bytes()]))
            .collect();
        let initial_balance = config.initial_balance();
        if !accounts.is_empty() && initial_balance > 0 {
            let writes = accounts
                .iter()
                .map(|a| (Key::balance(*a), Value::Uint(initial_balance)))
                .collect();
            store.apply_batch(writes, Vec::new())?;
        }

        info!(
            target: "starnotary::chain",
            chain_id = config.chain_id,
            dev_accounts = accounts.len(),
            base_fee = %config.base_fee(),
            "Chain started"
        );

        Ok(Self {
            store,
            txn_manager: TransactionManager::new(),
            config,
            accounts,
            deploy_nonce: AtomicU64::new(0),
            exec_lock: Mutex::new(()),
        })
    }

    /// Create a chain with the default configuration
    pub fn ephemeral() -> Result<Self> {
        Self::new(ChainConfig::default())
    }

    /// Chain configuration
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Funded development accounts, in creation order
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// Version of the most recent committed write
    pub fn current_version(&self) -> u64 {
        self.store.current_version()
    }

    /// Native balance of an account
    pub fn balance_of(&self, account: Address) -> Result<Wei> {
        let value = self.store.get(&Key::balance(account))?.map(|vv| vv.value);
        decode_balance(&account, value)
    }

    /// Total fees charged so far
    pub fn fees_collected(&self) -> Result<Wei> {
        self.balance_of(FEE_COLLECTOR)
    }

    /// Credit `amount` to `account` out of thin air (test faucet)
    pub fn fund(&self, account: Address, amount: Wei) -> Result<()> {
        let _guard = self.exec_lock.lock();
        let balance = self.balance_of(account)?;
        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| Error::invalid_input(format!("balance overflow for {}", account)))?;
        self.store
            .apply_batch(vec![(Key::balance(account), Value::Uint(new_balance))], Vec::new())?;
        Ok(())
    }

    /// Name of the code deployed at `address`, if any
    pub fn code_at(&self, address: Address) -> Result<Option<String>> {
        Ok(self
            .store
            .get(&Key::meta(address, "code"))?
            .and_then(|vv| vv.value.as_str().map(str::to_string)))
    }

    /// Check whether a contract is deployed at `address`
    pub fn is_contract(&self, address: Address) -> Result<bool> {
        Ok(self.code_at(address)?.is_some())
    }

    /// Deploy a contract, running `init` as its constructor
    ///
    /// The contract address is derived from the deployer and a chain-wide
    /// nonce. A reverted constructor leaves nothing deployed. Constructors
    /// are non-payable.
    pub fn deploy<F>(&self, call: &Call, code: &str, init: F) -> Result<(Address, Receipt)>
    where
        F: FnOnce(&mut CallContext<'_>) -> Result<()>,
    {
        let nonce = self.deploy_nonce.fetch_add(1, Ordering::SeqCst);
        let address = derive_address(&[call.from.as_bytes(), &nonce.to_be_bytes()]);
        let ((), receipt) = self.run(address, call, Some(code), false, init)?;
        info!(
            target: "starnotary::chain",
            %address,
            code,
            deployer = %call.from,
            gas_used = receipt.gas_used,
            "Contract deployed"
        );
        Ok((address, receipt))
    }

    /// Run a metered, all-or-nothing, non-payable call against a deployed
    /// contract
    ///
    /// # Errors
    ///
    /// - `InvalidInput`, `FeeTooLow`, `InsufficientFunds`: rejected before
    ///   execution, nothing charged
    /// - `Reverted` without receipt ([`NON_PAYABLE`]): value attached,
    ///   rejected before execution, nothing charged
    /// - `Reverted` (with receipt), `OutOfGas`: effects discarded, fee charged
    pub fn execute<T, F>(&self, contract: Address, call: &Call, f: F) -> Result<(T, Receipt)>
    where
        F: FnOnce(&mut CallContext<'_>) -> Result<T>,
    {
        self.dispatch(contract, call, false, f)
    }

    /// Like [`Chain::execute`], but accepts value attached to the call
    ///
    /// The value is credited to the contract before `f` runs; whatever `f`
    /// does not pay out stays in the contract.
    pub fn execute_payable<T, F>(
        &self,
        contract: Address,
        call: &Call,
        f: F,
    ) -> Result<(T, Receipt)>
    where
        F: FnOnce(&mut CallContext<'_>) -> Result<T>,
    {
        self.dispatch(contract, call, true, f)
    }

    fn dispatch<T, F>(
        &self,
        contract: Address,
        call: &Call,
        payable: bool,
        f: F,
    ) -> Result<(T, Receipt)>
    where
        F: FnOnce(&mut CallContext<'_>) -> Result<T>,
    {
        if !self.is_contract(contract)? {
            return Err(Error::invalid_input(format!("no contract at {}", contract)));
        }
        self.run(contract, call, None, payable, f)
    }

    /// Run a read-only closure against a snapshot of a contract's storage
    pub fn view<T, F>(&self, contract: Address, f: F) -> Result<T>
    where
        F: FnOnce(&mut ViewContext) -> Result<T>,
    {
        let mut ctx = ViewContext::new(self.store.create_snapshot(), contract);
        f(&mut ctx)
    }

    fn run<T, F>(
        &self,
        contract: Address,
        call: &Call,
        install: Option<&str>,
        payable: bool,
        f: F,
    ) -> Result<(T, Receipt)>
    where
        F: FnOnce(&mut CallContext<'_>) -> Result<T>,
    {
        let _guard = self.exec_lock.lock();
        let gas_limit = call.gas_limit.unwrap_or(self.config.default_gas_limit);
        let gas_price = self.config.base_fee();
        self.check_call(call, payable, gas_limit, gas_price)?;

        let mut txn = self.txn_manager.begin(&self.store);
        let txn_id = txn.txn_id;

        let mut ctx = CallContext::new(
            &mut txn,
            &self.config.gas,
            gas_limit,
            call.from,
            call.value,
            contract,
        );
        let result = Self::enter(&mut ctx, call, install, f);
        let (gas_used, logs) = ctx.finish();

        let mut receipt = Receipt {
            txn_id,
            from: call.from,
            to: contract,
            status: ExecutionStatus::Success,
            gas_limit,
            gas_used,
            effective_gas_price: gas_price,
            fee: 0,
            logs: Vec::new(),
            revert_reason: None,
        };

        match result {
            Ok(value) => {
                let version = txn.commit(&self.store)?;
                receipt.fee = self.charge_fee(call.from, gas_used, gas_price)?;
                receipt.logs = logs;
                debug!(
                    target: "starnotary::chain",
                    txn_id,
                    from = %call.from,
                    to = %contract,
                    gas_used,
                    version,
                    "Call committed"
                );
                Ok((value, receipt))
            }
            Err(err) => {
                txn.abort(err.to_string())?;
                let charged = match &err {
                    Error::OutOfGas { .. } => {
                        receipt.status = ExecutionStatus::OutOfGas;
                        gas_limit
                    }
                    _ => {
                        receipt.status = ExecutionStatus::Reverted;
                        receipt.revert_reason =
                            Some(err.reason().map(str::to_string).unwrap_or_else(|| err.to_string()));
                        gas_used
                    }
                };
                receipt.gas_used = charged;
                receipt.fee = self.charge_fee(call.from, charged, gas_price)?;
                debug!(
                    target: "starnotary::chain",
                    txn_id,
                    from = %call.from,
                    to = %contract,
                    gas_used = charged,
                    error = %err,
                    "Call aborted"
                );
                match err {
                    Error::Reverted { reason, .. } => Err(Error::Reverted {
                        reason,
                        receipt: Some(Box::new(receipt)),
                    }),
                    other => Err(other),
                }
            }
        }
    }

    fn enter<T, F>(
        ctx: &mut CallContext<'_>,
        call: &Call,
        install: Option<&str>,
        f: F,
    ) -> Result<T>
    where
        F: FnOnce(&mut CallContext<'_>) -> Result<T>,
    {
        ctx.charge_intrinsic()?;
        let contract = ctx.address();
        ctx.move_value(call.from, contract, call.value)?;
        if let Some(code) = install {
            ctx.install(code)?;
        }
        f(ctx)
    }

    fn check_call(
        &self,
        call: &Call,
        payable: bool,
        gas_limit: u64,
        gas_price: Wei,
    ) -> Result<()> {
        if call.from.is_zero() {
            return Err(Error::invalid_input("calls from the zero address are not allowed"));
        }
        if !payable && call.value > 0 {
            return Err(Error::revert(NON_PAYABLE));
        }
        if gas_limit < self.config.gas.intrinsic {
            return Err(Error::invalid_input(format!(
                "intrinsic gas too low: limit {}, intrinsic {}",
                gas_limit, self.config.gas.intrinsic
            )));
        }
        if gas_limit > self.config.block_gas_limit {
            return Err(Error::invalid_input(format!(
                "gas limit {} exceeds block gas limit {}",
                gas_limit, self.config.block_gas_limit
            )));
        }
        if let Some(max_fee_per_gas) = call.max_fee_per_gas {
            if max_fee_per_gas < gas_price {
                return Err(Error::FeeTooLow {
                    max_fee_per_gas,
                    base_fee: gas_price,
                });
            }
        }
        let required = (gas_limit as Wei)
            .checked_mul(gas_price)
            .and_then(|max_fee| max_fee.checked_add(call.value))
            .ok_or_else(|| Error::invalid_input("call cost overflows"))?;
        let available = self.balance_of(call.from)?;
        if available < required {
            return Err(Error::InsufficientFunds {
                required,
                available,
            });
        }
        Ok(())
    }

    fn charge_fee(&self, payer: Address, gas: u64, gas_price: Wei) -> Result<Wei> {
        let fee = gas as Wei * gas_price;
        if fee == 0 {
            return Ok(0);
        }
        let balance = self.balance_of(payer)?;
        let new_balance = balance.checked_sub(fee).ok_or(Error::InsufficientFunds {
            required: fee,
            available: balance,
        })?;
        let collected = self.fees_collected()?;
        self.store.apply_batch(
            vec![
                (Key::balance(payer), Value::Uint(new_balance)),
                (Key::balance(FEE_COLLECTOR), Value::Uint(collected + fee)),
            ],
            Vec::new(),
        )?;
        Ok(fee)
    }
}
