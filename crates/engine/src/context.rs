//! Execution contexts handed to contract code
//!
//! - `CallContext`: a metered, mutating call. All reads and writes go through
//!   the call's `TransactionContext`, so they commit or vanish together.
//! - `ViewContext`: an unmetered, read-only view over a storage snapshot.
//!
//! Contract read paths are written once against `StateReader` and work in
//! both contexts.

use std::collections::BTreeMap;

use starnotary_concurrency::TransactionContext;
use starnotary_core::{Address, Error, Key, Log, Result, SnapshotView, TypeTag, Value, Wei};
use starnotary_storage::ClonedSnapshotView;

use crate::gas::{GasMeter, GasSchedule};

/// Read access to one contract's storage
pub trait StateReader {
    /// Address of the contract whose storage is read
    fn contract(&self) -> Address;

    /// Read a storage slot
    fn sload(&mut self, slot: &[u8]) -> Result<Option<Value>>;
}

pub(crate) fn decode_balance(account: &Address, value: Option<Value>) -> Result<Wei> {
    match value {
        None => Ok(0),
        Some(Value::Uint(n)) => Ok(n),
        Some(other) => Err(Error::storage(format!(
            "balance of {} holds non-integer value {:?}",
            account, other
        ))),
    }
}

/// Context of a metered, mutating call
pub struct CallContext<'a> {
    txn: &'a mut TransactionContext,
    schedule: &'a GasSchedule,
    meter: GasMeter,
    caller: Address,
    value: Wei,
    contract: Address,
    logs: Vec<Log>,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(
        txn: &'a mut TransactionContext,
        schedule: &'a GasSchedule,
        gas_limit: u64,
        caller: Address,
        value: Wei,
        contract: Address,
    ) -> Self {
        Self {
            txn,
            schedule,
            meter: GasMeter::new(gas_limit),
            caller,
            value,
            contract,
            logs: Vec::new(),
        }
    }

    /// Account that initiated the call
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Value attached to the call (already credited to the contract)
    pub fn value(&self) -> Wei {
        self.value
    }

    /// Address of the executing contract
    pub fn address(&self) -> Address {
        self.contract
    }

    /// Gas consumed so far
    pub fn gas_used(&self) -> u64 {
        self.meter.used()
    }

    /// Write a storage slot
    pub fn sstore(&mut self, slot: &[u8], value: impl Into<Value>) -> Result<()> {
        let key = Key::slot(self.contract, slot);
        let cost = if self.txn.exists(&key)? {
            self.schedule.storage_write_existing
        } else {
            self.schedule.storage_write_new
        };
        self.meter.charge(cost)?;
        self.txn.put(key, value.into())
    }

    /// Clear a storage slot
    pub fn sdelete(&mut self, slot: &[u8]) -> Result<()> {
        self.meter.charge(self.schedule.storage_delete)?;
        self.txn.delete(Key::slot(self.contract, slot))
    }

    /// Pay `amount` out of the contract's balance to `to`
    ///
    /// Reverts if the contract holds less than `amount`.
    pub fn transfer(&mut self, to: Address, amount: Wei) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        self.meter.charge(self.schedule.value_transfer)?;
        let available = decode_balance(
            &self.contract,
            self.txn.get(&Key::balance(self.contract))?,
        )?;
        if available < amount {
            return Err(Error::revert("Insufficient contract balance for transfer"));
        }
        self.move_value(self.contract, to, amount)
    }

    /// Emit an event log
    pub fn emit(&mut self, event: &str, fields: Vec<(&str, Value)>) -> Result<()> {
        let bytes: usize = fields.iter().map(|(_, v)| v.encoded_len()).sum();
        let cost = self.schedule.log_base + self.schedule.log_byte * bytes as u64;
        self.meter.charge(cost)?;
        let fields: BTreeMap<String, Value> = fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self.logs.push(Log {
            address: self.contract,
            event: event.to_string(),
            fields,
        });
        Ok(())
    }

    pub(crate) fn charge_intrinsic(&mut self) -> Result<()> {
        self.meter.charge(self.schedule.intrinsic)
    }

    /// Move value between two accounts without metering
    pub(crate) fn move_value(&mut self, from: Address, to: Address, amount: Wei) -> Result<()> {
        if amount == 0 || from == to {
            return Ok(());
        }
        let from_balance = decode_balance(&from, self.txn.get(&Key::balance(from))?)?;
        let new_from = from_balance.checked_sub(amount).ok_or(Error::InsufficientFunds {
            required: amount,
            available: from_balance,
        })?;
        let to_balance = decode_balance(&to, self.txn.get(&Key::balance(to))?)?;
        let new_to = to_balance
            .checked_add(amount)
            .ok_or_else(|| Error::storage(format!("balance overflow for {}", to)))?;
        self.txn.put(Key::balance(from), Value::Uint(new_from))?;
        self.txn.put(Key::balance(to), Value::Uint(new_to))
    }

    /// Mark the contract address as holding `code`
    pub(crate) fn install(&mut self, code: &str) -> Result<()> {
        let key = Key::meta(self.contract, "code");
        if self.txn.exists(&key)? {
            return Err(Error::invalid_input(format!(
                "a contract is already deployed at {}",
                self.contract
            )));
        }
        self.meter.charge(self.schedule.storage_write_new)?;
        self.txn.put(key, Value::from(code))
    }

    /// Gas used and logs emitted, consuming the context
    pub(crate) fn finish(self) -> (u64, Vec<Log>) {
        (self.meter.used(), self.logs)
    }
}

impl StateReader for CallContext<'_> {
    fn contract(&self) -> Address {
        self.contract
    }

    fn sload(&mut self, slot: &[u8]) -> Result<Option<Value>> {
        self.meter.charge(self.schedule.storage_read)?;
        self.txn.get(&Key::slot(self.contract, slot))
    }
}

/// Read-only, unmetered view of one contract
pub struct ViewContext {
    snapshot: ClonedSnapshotView,
    contract: Address,
}

impl ViewContext {
    pub(crate) fn new(snapshot: ClonedSnapshotView, contract: Address) -> Self {
        Self { snapshot, contract }
    }

    /// All slots whose key starts with `prefix`, in key order
    pub fn scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Value)>> {
        Ok(self
            .snapshot
            .scan_prefix(&self.contract, TypeTag::Slot, prefix)?
            .into_iter()
            .map(|(key, vv)| (key.user_key, vv.value))
            .collect())
    }
}

impl StateReader for ViewContext {
    fn contract(&self) -> Address {
        self.contract
    }

    fn sload(&mut self, slot: &[u8]) -> Result<Option<Value>> {
        Ok(self
            .snapshot
            .get(&Key::slot(self.contract, slot))?
            .map(|vv| vv.value))
    }
}
