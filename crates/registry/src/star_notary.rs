//! StarNotary: star registry and marketplace contract
//!
//! ## Design
//!
//! `StarNotary` is a stateless facade over a [`Chain`]. It holds only an
//! `Arc<Chain>` and the contract address; all state lives in the contract's
//! storage slots. Mutating operations run through [`Chain::execute`] and are
//! all-or-nothing; read operations run through [`Chain::view`]. Only
//! `buy_star` accepts attached value ([`Chain::execute_payable`]).
//!
//! ## Per-star state machine
//!
//! ```text
//! (nonexistent) --create--> owned --list--> owned+listed
//!                             ^                  |
//!                             +------buy---------+  (new owner, listing removed)
//! owned / owned+listed --transfer / exchange / transfer_from--> owned (listing removed)
//! ```
//!
//! ## Error policy
//!
//! - Name lookup is a soft miss: a nonexistent star has the empty name.
//! - Ownership queries fail loudly with `Error::NotFound`.
//! - Authorization failures revert with a fixed reason (see [`reasons`]).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use starnotary_core::{Address, Error, LimitError, Limits, Receipt, Result, StarId, Value, Wei};
use starnotary_engine::{Call, CallContext, Chain, StateReader};

use crate::slots;
use crate::token;

/// Collection name set by the constructor
pub const NAME: &str = "StarNotary";
/// Collection symbol set by the constructor
pub const SYMBOL: &str = "SNT";
/// Code name the contract is deployed under
pub const CODE: &str = "StarNotary";

/// Event emitted when a star is created
pub const STAR_CREATED_EVENT: &str = "StarCreated";
/// Event emitted when a star is put up for sale
pub const STAR_LISTED_EVENT: &str = "StarListed";
/// Event emitted when a listed star is bought
pub const STAR_SOLD_EVENT: &str = "StarSold";

/// Revert reasons raised by the registry
pub mod reasons {
    /// `transfer_star` by a non-owner
    pub const NOT_STAR_OWNER: &str = "Sender must own star for tokenId!";
    /// `exchange_stars` by someone owning neither star
    pub const NOT_OWNER_OF_EITHER: &str = "Sender must own star for _tokenId1 or _tokenId2!";
    /// `put_star_up_for_sale` by a non-owner
    pub const NOT_OWNER_FOR_SALE: &str = "You can't sell a star you don't own!";
    /// `buy_star` on a star without a listing
    pub const NOT_FOR_SALE: &str = "The star should be up for sale!";
    /// `buy_star` with less value attached than the price
    pub const INSUFFICIENT_VALUE: &str = "You need to have enough value to buy the star!";
    /// `create_star` with an empty name
    pub const EMPTY_NAME: &str = "Star name must not be empty!";
    /// `create_star` with a name over the configured limit
    pub const NAME_TOO_LONG: &str = "Star name is too long!";
}

/// A created star
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Token identifier
    pub id: StarId,
    /// Name given at creation; never changes
    pub name: String,
}

/// Handle to a deployed StarNotary contract
///
/// # Example
///
/// ```ignore
/// let chain = Arc::new(Chain::ephemeral()?);
/// let alice = chain.accounts()[0];
/// let (notary, _) = StarNotary::deploy(chain.clone(), &Call::new(alice))?;
///
/// notary.create_star(&Call::new(alice), "Awesome Star!", StarId(1))?;
/// assert_eq!(notary.lookup_star_name(StarId(1))?, "Awesome Star!");
/// assert_eq!(notary.lookup_star_name(StarId(667))?, "");
/// ```
#[derive(Clone)]
pub struct StarNotary {
    chain: Arc<Chain>,
    address: Address,
    limits: Limits,
}

impl std::fmt::Debug for StarNotary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarNotary")
            .field("address", &self.address)
            .finish()
    }
}

impl StarNotary {
    /// Deploy a new contract; the constructor records name and symbol
    pub fn deploy(chain: Arc<Chain>, call: &Call) -> Result<(Self, Receipt)> {
        let (address, receipt) = chain.deploy(call, CODE, |ctx| {
            ctx.sstore(slots::NAME, NAME)?;
            ctx.sstore(slots::SYMBOL, SYMBOL)
        })?;
        info!(target: "starnotary::registry", %address, "StarNotary deployed");
        let limits = chain.config().limits.clone();
        Ok((
            Self {
                chain,
                address,
                limits,
            },
            receipt,
        ))
    }

    /// Attach to an already deployed contract
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if no StarNotary is deployed at `address`.
    pub fn at(chain: Arc<Chain>, address: Address) -> Result<Self> {
        match chain.code_at(address)? {
            Some(code) if code == CODE => {}
            _ => {
                return Err(Error::invalid_input(format!(
                    "no {} contract at {}",
                    CODE, address
                )))
            }
        }
        let limits = chain.config().limits.clone();
        Ok(Self {
            chain,
            address,
            limits,
        })
    }

    /// Contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Chain the contract is deployed on
    pub fn chain(&self) -> &Arc<Chain> {
        &self.chain
    }

    // ========== Views ==========

    /// Collection name (`"StarNotary"`)
    pub fn name(&self) -> Result<String> {
        self.chain.view(self.address, |v| {
            Ok(slots::decode_string("name", v.sload(slots::NAME)?)?.unwrap_or_default())
        })
    }

    /// Collection symbol (`"SNT"`)
    pub fn symbol(&self) -> Result<String> {
        self.chain.view(self.address, |v| {
            Ok(slots::decode_string("symbol", v.sload(slots::SYMBOL)?)?.unwrap_or_default())
        })
    }

    /// Name of star `id`, or the empty string if it does not exist
    pub fn lookup_star_name(&self, id: StarId) -> Result<String> {
        self.chain
            .view(self.address, |v| Ok(star_name(v, id)?.unwrap_or_default()))
    }

    /// Public mapping getter for star names; same soft-miss policy as
    /// [`StarNotary::lookup_star_name`]
    pub fn token_id_to_star_info(&self, id: StarId) -> Result<String> {
        self.lookup_star_name(id)
    }

    /// Typed star record, `None` if the star does not exist
    pub fn star_info(&self, id: StarId) -> Result<Option<Star>> {
        self.chain.view(self.address, |v| {
            Ok(star_name(v, id)?.map(|name| Star { id, name }))
        })
    }

    /// Listed price of star `id`, `None` if it is not for sale
    pub fn stars_for_sale(&self, id: StarId) -> Result<Option<Wei>> {
        self.chain.view(self.address, |v| listed_price(v, id))
    }

    /// All current listings in ascending id order
    pub fn listings(&self) -> Result<Vec<(StarId, Wei)>> {
        self.chain.view(self.address, |v| {
            v.scan(slots::PRICE_PREFIX)?
                .into_iter()
                .map(|(slot, value)| -> Result<(StarId, Wei)> {
                    let id = slots::id_from_price_slot(&slot)
                        .ok_or_else(|| Error::storage("malformed listing slot"))?;
                    let price = slots::decode_uint("price", Some(value))?.unwrap_or_default();
                    Ok((id, price))
                })
                .collect()
        })
    }

    /// Owner of star `id`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the star does not exist.
    pub fn owner_of(&self, id: StarId) -> Result<Address> {
        self.chain
            .view(self.address, |v| token::owner_of(v, id))?
            .ok_or_else(|| Error::not_found(token::reasons::NONEXISTENT_TOKEN))
    }

    /// Number of stars owned by `owner`
    pub fn balance_of(&self, owner: Address) -> Result<u64> {
        if owner.is_zero() {
            return Err(Error::invalid_input(token::reasons::BALANCE_OF_ZERO));
        }
        self.chain.view(self.address, |v| token::balance_of(v, owner))
    }

    /// Account approved to move star `id`, if any
    pub fn get_approved(&self, id: StarId) -> Result<Option<Address>> {
        self.chain.view(self.address, |v| {
            if token::owner_of(v, id)?.is_none() {
                return Err(Error::not_found(token::reasons::NONEXISTENT_TOKEN));
            }
            token::get_approved(v, id)
        })
    }

    /// Whether `operator` may manage every star of `owner`
    pub fn is_approved_for_all(&self, owner: Address, operator: Address) -> Result<bool> {
        self.chain
            .view(self.address, |v| token::is_approved_for_all(v, owner, operator))
    }

    // ========== Calls ==========

    /// Only `buy_star` is payable; value sent to any other call is rejected
    /// by the engine before the call runs
    fn execute<F>(&self, op: &'static str, payable: bool, call: &Call, f: F) -> Result<Receipt>
    where
        F: FnOnce(&mut CallContext<'_>) -> Result<()>,
    {
        let result = if payable {
            self.chain.execute_payable(self.address, call, f)
        } else {
            self.chain.execute(self.address, call, f)
        };
        match &result {
            Ok(((), receipt)) => debug!(
                target: "starnotary::registry",
                op,
                from = %call.from,
                gas_used = receipt.gas_used,
                "Operation succeeded"
            ),
            Err(err) => debug!(
                target: "starnotary::registry",
                op,
                from = %call.from,
                error = %err,
                "Operation failed"
            ),
        }
        result.map(|((), receipt)| receipt)
    }

    /// Register star `id` named `name`, owned by the caller
    pub fn create_star(&self, call: &Call, name: &str, id: StarId) -> Result<Receipt> {
        let limits = &self.limits;
        self.execute("create_star", false, call, |ctx| {
            limits.validate_star_name(name).map_err(|e| match e {
                LimitError::EmptyName => Error::revert(reasons::EMPTY_NAME),
                LimitError::NameTooLong { .. } => Error::revert(reasons::NAME_TOO_LONG),
            })?;
            let caller = ctx.caller();
            token::mint(ctx, caller, id)?;
            ctx.sstore(&slots::star_name(id), name)?;
            ctx.emit(
                STAR_CREATED_EVENT,
                vec![("token_id", Value::from(id.0)), ("name", Value::from(name))],
            )
        })
    }

    /// List star `id` for sale at `price`; caller must own it
    ///
    /// Listing an already listed star replaces its price.
    pub fn put_star_up_for_sale(&self, call: &Call, id: StarId, price: Wei) -> Result<Receipt> {
        self.execute("put_star_up_for_sale", false, call, |ctx| {
            let caller = ctx.caller();
            if token::owner_of(ctx, id)? != Some(caller) {
                return Err(Error::revert(reasons::NOT_OWNER_FOR_SALE));
            }
            ctx.sstore(&slots::price(id), price)?;
            ctx.emit(
                STAR_LISTED_EVENT,
                vec![
                    ("token_id", Value::from(id.0)),
                    ("seller", Value::Address(caller)),
                    ("price", Value::Uint(price)),
                ],
            )
        })
    }

    /// Buy listed star `id` with the value attached to `call`
    ///
    /// Exactly the listed price goes to the seller; any excess is refunded
    /// to the buyer. Gas is charged to the buyer separately.
    pub fn buy_star(&self, call: &Call, id: StarId) -> Result<Receipt> {
        self.execute("buy_star", true, call, |ctx| {
            let price = listed_price(ctx, id)?.ok_or_else(|| Error::revert(reasons::NOT_FOR_SALE))?;
            let paid = ctx.value();
            if paid < price {
                return Err(Error::revert(reasons::INSUFFICIENT_VALUE));
            }
            let seller = token::require_owner(ctx, id)?;
            let buyer = ctx.caller();

            move_star(ctx, seller, buyer, id)?;
            ctx.transfer(seller, price)?;
            ctx.transfer(buyer, paid - price)?;
            ctx.emit(
                STAR_SOLD_EVENT,
                vec![
                    ("token_id", Value::from(id.0)),
                    ("seller", Value::Address(seller)),
                    ("buyer", Value::Address(buyer)),
                    ("price", Value::Uint(price)),
                ],
            )
        })
    }

    /// Swap the owners of stars `a` and `b`; caller must own at least one
    pub fn exchange_stars(&self, call: &Call, a: StarId, b: StarId) -> Result<Receipt> {
        self.execute("exchange_stars", false, call, |ctx| {
            let owner_a = token::require_owner(ctx, a)?;
            let owner_b = token::require_owner(ctx, b)?;
            let caller = ctx.caller();
            if owner_a != caller && owner_b != caller {
                return Err(Error::revert(reasons::NOT_OWNER_OF_EITHER));
            }
            move_star(ctx, owner_a, owner_b, a)?;
            move_star(ctx, owner_b, owner_a, b)
        })
    }

    /// Give star `id` to `to`; caller must own it
    pub fn transfer_star(&self, call: &Call, to: Address, id: StarId) -> Result<Receipt> {
        self.execute("transfer_star", false, call, |ctx| {
            let caller = ctx.caller();
            if token::require_owner(ctx, id)? != caller {
                return Err(Error::revert(reasons::NOT_STAR_OWNER));
            }
            move_star(ctx, caller, to, id)
        })
    }

    /// Approve `to` to move star `id` (`Address::ZERO` clears)
    pub fn approve(&self, call: &Call, to: Address, id: StarId) -> Result<Receipt> {
        self.execute("approve", false, call, |ctx| token::approve(ctx, to, id))
    }

    /// Grant or revoke `operator` control over all of the caller's stars
    pub fn set_approval_for_all(
        &self,
        call: &Call,
        operator: Address,
        approved: bool,
    ) -> Result<Receipt> {
        self.execute("set_approval_for_all", false, call, |ctx| {
            token::set_approval_for_all(ctx, operator, approved)
        })
    }

    /// Move star `id` from `from` to `to` as owner, approved account or
    /// operator
    pub fn transfer_from(
        &self,
        call: &Call,
        from: Address,
        to: Address,
        id: StarId,
    ) -> Result<Receipt> {
        self.execute("transfer_from", false, call, |ctx| {
            let caller = ctx.caller();
            if !token::is_approved_or_owner(ctx, caller, id)? {
                return Err(Error::revert(token::reasons::TRANSFER_NOT_APPROVED));
            }
            move_star(ctx, from, to, id)
        })
    }
}

fn star_name<R: StateReader>(state: &mut R, id: StarId) -> Result<Option<String>> {
    let value = state.sload(&slots::star_name(id))?;
    slots::decode_string("star name", value)
}

fn listed_price<R: StateReader>(state: &mut R, id: StarId) -> Result<Option<Wei>> {
    let value = state.sload(&slots::price(id))?;
    slots::decode_uint("price", value)
}

/// Every ownership change goes through here so a stale listing never
/// survives its seller
fn move_star(ctx: &mut CallContext<'_>, from: Address, to: Address, id: StarId) -> Result<()> {
    if listed_price(ctx, id)?.is_some() {
        ctx.sdelete(&slots::price(id))?;
    }
    token::transfer(ctx, from, to, id)
}
