//! Storage slot layout of the star registry
//!
//! Every slot key is an ASCII prefix followed by a fixed-width binary
//! suffix. Star ids are big-endian so prefix scans return them in
//! numeric order.

use starnotary_core::{Address, Error, Result, StarId, Value};

pub(crate) const NAME: &[u8] = b"meta:name";
pub(crate) const SYMBOL: &[u8] = b"meta:symbol";

pub(crate) const OWNER_PREFIX: &[u8] = b"owner:";
pub(crate) const BALANCE_PREFIX: &[u8] = b"balance:";
pub(crate) const APPROVAL_PREFIX: &[u8] = b"approval:";
pub(crate) const OPERATOR_PREFIX: &[u8] = b"operator:";
pub(crate) const STAR_NAME_PREFIX: &[u8] = b"star:";
pub(crate) const PRICE_PREFIX: &[u8] = b"price:";

fn join(prefix: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let len = prefix.len() + parts.iter().map(|p| p.len()).sum::<usize>();
    let mut slot = Vec::with_capacity(len);
    slot.extend_from_slice(prefix);
    for part in parts {
        slot.extend_from_slice(part);
    }
    slot
}

pub(crate) fn owner(id: StarId) -> Vec<u8> {
    join(OWNER_PREFIX, &[&id.to_be_bytes()])
}

pub(crate) fn balance(owner: Address) -> Vec<u8> {
    join(BALANCE_PREFIX, &[owner.as_bytes()])
}

pub(crate) fn approval(id: StarId) -> Vec<u8> {
    join(APPROVAL_PREFIX, &[&id.to_be_bytes()])
}

pub(crate) fn operator(owner: Address, operator: Address) -> Vec<u8> {
    join(OPERATOR_PREFIX, &[owner.as_bytes(), operator.as_bytes()])
}

pub(crate) fn star_name(id: StarId) -> Vec<u8> {
    join(STAR_NAME_PREFIX, &[&id.to_be_bytes()])
}

pub(crate) fn price(id: StarId) -> Vec<u8> {
    join(PRICE_PREFIX, &[&id.to_be_bytes()])
}

/// Recover the star id from a `price:` slot key
pub(crate) fn id_from_price_slot(slot: &[u8]) -> Option<StarId> {
    slot.strip_prefix(PRICE_PREFIX).and_then(StarId::from_be_slice)
}

fn mismatch(what: &str, value: &Value) -> Error {
    Error::storage(format!("slot '{}' holds unexpected value {:?}", what, value))
}

pub(crate) fn decode_address(what: &str, value: Option<Value>) -> Result<Option<Address>> {
    match value {
        None => Ok(None),
        Some(Value::Address(a)) => Ok(Some(a)),
        Some(other) => Err(mismatch(what, &other)),
    }
}

pub(crate) fn decode_uint(what: &str, value: Option<Value>) -> Result<Option<u128>> {
    match value {
        None => Ok(None),
        Some(Value::Uint(n)) => Ok(Some(n)),
        Some(other) => Err(mismatch(what, &other)),
    }
}

pub(crate) fn decode_string(what: &str, value: Option<Value>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(Value::Str(s)) => Ok(Some(s)),
        Some(other) => Err(mismatch(what, &other)),
    }
}

pub(crate) fn decode_bool(what: &str, value: Option<Value>) -> Result<bool> {
    match value {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(other) => Err(mismatch(what, &other)),
    }
}
