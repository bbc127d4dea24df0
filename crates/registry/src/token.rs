//! ERC-721 style ownership ledger
//!
//! Ownership, per-owner token counts and approvals, stored in the
//! contract's slots. Read helpers take any [`StateReader`] so they work in
//! both metered calls and views; write helpers need a [`CallContext`].
//!
//! Revert reasons follow the ERC-721 reference wording.

use starnotary_core::{Address, Error, Result, StarId, Value};
use starnotary_engine::{CallContext, StateReader};

use crate::slots;

/// Event emitted on every ownership change, including mint
pub const TRANSFER_EVENT: &str = "Transfer";
/// Event emitted when a single-token approval is set
pub const APPROVAL_EVENT: &str = "Approval";
/// Event emitted when an operator approval changes
pub const APPROVAL_FOR_ALL_EVENT: &str = "ApprovalForAll";

/// Revert reasons raised by the ledger
pub mod reasons {
    /// Owner query for an id that was never created
    pub const NONEXISTENT_TOKEN: &str = "ERC721: owner query for nonexistent token";
    /// Mint of an id that already exists
    pub const ALREADY_MINTED: &str = "ERC721: token already minted";
    /// Mint to the zero address
    pub const MINT_TO_ZERO: &str = "ERC721: mint to the zero address";
    /// Transfer where `from` is not the owner
    pub const TRANSFER_NOT_OWN: &str = "ERC721: transfer of token that is not own";
    /// Transfer to the zero address
    pub const TRANSFER_TO_ZERO: &str = "ERC721: transfer to the zero address";
    /// Transfer by someone neither owner nor approved
    pub const TRANSFER_NOT_APPROVED: &str = "ERC721: transfer caller is not owner nor approved";
    /// Approval of the current owner
    pub const APPROVAL_TO_OWNER: &str = "ERC721: approval to current owner";
    /// Approval by someone neither owner nor operator
    pub const APPROVE_NOT_AUTHORIZED: &str =
        "ERC721: approve caller is not owner nor approved for all";
    /// Operator approval of oneself
    pub const APPROVE_TO_CALLER: &str = "ERC721: approve to caller";
    /// Balance query for the zero address
    pub const BALANCE_OF_ZERO: &str = "ERC721: balance query for the zero address";
}

/// Current owner of `id`, `None` if the star does not exist
pub fn owner_of<R: StateReader>(state: &mut R, id: StarId) -> Result<Option<Address>> {
    let value = state.sload(&slots::owner(id))?;
    slots::decode_address("owner", value)
}

/// Current owner of `id`, reverting if the star does not exist
pub fn require_owner<R: StateReader>(state: &mut R, id: StarId) -> Result<Address> {
    owner_of(state, id)?.ok_or_else(|| Error::revert(reasons::NONEXISTENT_TOKEN))
}

/// Number of stars owned by `owner`
pub fn balance_of<R: StateReader>(state: &mut R, owner: Address) -> Result<u64> {
    let value = state.sload(&slots::balance(owner))?;
    Ok(slots::decode_uint("balance", value)?.unwrap_or(0) as u64)
}

/// Account approved to move `id`, if any
pub fn get_approved<R: StateReader>(state: &mut R, id: StarId) -> Result<Option<Address>> {
    let value = state.sload(&slots::approval(id))?;
    slots::decode_address("approval", value)
}

/// Whether `operator` may manage every star of `owner`
pub fn is_approved_for_all<R: StateReader>(
    state: &mut R,
    owner: Address,
    operator: Address,
) -> Result<bool> {
    let value = state.sload(&slots::operator(owner, operator))?;
    slots::decode_bool("operator", value)
}

/// Whether `spender` is the owner of `id`, approved for it, or an operator
/// of its owner
pub fn is_approved_or_owner<R: StateReader>(
    state: &mut R,
    spender: Address,
    id: StarId,
) -> Result<bool> {
    let owner = require_owner(state, id)?;
    if spender == owner {
        return Ok(true);
    }
    if get_approved(state, id)? == Some(spender) {
        return Ok(true);
    }
    is_approved_for_all(state, owner, spender)
}

fn add_balance(ctx: &mut CallContext<'_>, owner: Address, delta: i64) -> Result<()> {
    let current = balance_of(ctx, owner)?;
    let next = if delta >= 0 {
        current + delta as u64
    } else {
        current
            .checked_sub(delta.unsigned_abs())
            .ok_or_else(|| Error::storage(format!("token count underflow for {}", owner)))?
    };
    ctx.sstore(&slots::balance(owner), next)
}

/// Create `id` owned by `to`
pub fn mint(ctx: &mut CallContext<'_>, to: Address, id: StarId) -> Result<()> {
    if to.is_zero() {
        return Err(Error::revert(reasons::MINT_TO_ZERO));
    }
    if owner_of(ctx, id)?.is_some() {
        return Err(Error::revert(reasons::ALREADY_MINTED));
    }
    ctx.sstore(&slots::owner(id), to)?;
    add_balance(ctx, to, 1)?;
    ctx.emit(
        TRANSFER_EVENT,
        vec![
            ("from", Value::Address(Address::ZERO)),
            ("to", Value::Address(to)),
            ("token_id", Value::from(id.0)),
        ],
    )
}

/// Move `id` from `from` to `to`, clearing its single-token approval
///
/// Does not check who is calling; callers enforce authorization first.
pub fn transfer(ctx: &mut CallContext<'_>, from: Address, to: Address, id: StarId) -> Result<()> {
    if require_owner(ctx, id)? != from {
        return Err(Error::revert(reasons::TRANSFER_NOT_OWN));
    }
    if to.is_zero() {
        return Err(Error::revert(reasons::TRANSFER_TO_ZERO));
    }
    if get_approved(ctx, id)?.is_some() {
        ctx.sdelete(&slots::approval(id))?;
    }
    if from != to {
        add_balance(ctx, from, -1)?;
        add_balance(ctx, to, 1)?;
        ctx.sstore(&slots::owner(id), to)?;
    }
    ctx.emit(
        TRANSFER_EVENT,
        vec![
            ("from", Value::Address(from)),
            ("to", Value::Address(to)),
            ("token_id", Value::from(id.0)),
        ],
    )
}

/// Approve `to` to move `id`; `Address::ZERO` clears the approval
pub fn approve(ctx: &mut CallContext<'_>, to: Address, id: StarId) -> Result<()> {
    let owner = require_owner(ctx, id)?;
    if to == owner {
        return Err(Error::revert(reasons::APPROVAL_TO_OWNER));
    }
    let caller = ctx.caller();
    if caller != owner && !is_approved_for_all(ctx, owner, caller)? {
        return Err(Error::revert(reasons::APPROVE_NOT_AUTHORIZED));
    }
    if to.is_zero() {
        ctx.sdelete(&slots::approval(id))?;
    } else {
        ctx.sstore(&slots::approval(id), to)?;
    }
    ctx.emit(
        APPROVAL_EVENT,
        vec![
            ("owner", Value::Address(owner)),
            ("approved", Value::Address(to)),
            ("token_id", Value::from(id.0)),
        ],
    )
}

/// Grant or revoke `operator` control over all of the caller's stars
pub fn set_approval_for_all(
    ctx: &mut CallContext<'_>,
    operator: Address,
    approved: bool,
) -> Result<()> {
    let owner = ctx.caller();
    if operator == owner {
        return Err(Error::revert(reasons::APPROVE_TO_CALLER));
    }
    let slot = slots::operator(owner, operator);
    if approved {
        ctx.sstore(&slot, true)?;
    } else {
        ctx.sdelete(&slot)?;
    }
    ctx.emit(
        APPROVAL_FOR_ALL_EVENT,
        vec![
            ("owner", Value::Address(owner)),
            ("operator", Value::Address(operator)),
            ("approved", Value::Bool(approved)),
        ],
    )
}
