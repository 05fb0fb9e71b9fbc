//! Minimal permission-unit ledger: balance lookup, admin mint, burn-one.
//!
//! There is no transfer or approval machinery here; units only enter an
//! account through [`mint`] and only leave it through [`burn_one`].

use tracing::{debug, info};

use crate::error::{GateError, GateResult};
use crate::events::GateEvent;
use crate::roles;
use crate::store::{StateKey, StateRead, StateValue, StateWrite};
use crate::types::{Address, RoleId, TokenMetadata};

pub fn balance_of<R: StateRead + ?Sized>(state: &R, account: &Address) -> GateResult<u128> {
    Ok(state.read_amount(&StateKey::balance(*account))?)
}

pub fn total_supply<R: StateRead + ?Sized>(state: &R) -> GateResult<u128> {
    Ok(state.read_amount(&StateKey::TotalSupply)?)
}

pub fn token_metadata<R: StateRead + ?Sized>(state: &R) -> GateResult<TokenMetadata> {
    Ok(state.read_metadata()?.unwrap_or_default())
}

/// Mint `amount` units to `to`. Admin only; returns the new balance.
pub fn mint<W: StateWrite + ?Sized>(
    state: &mut W,
    sender: &Address,
    to: &Address,
    amount: u128,
) -> GateResult<u128> {
    roles::require_role(&*state, RoleId::DEFAULT_ADMIN, sender)?;
    if amount == 0 {
        return Err(GateError::InvalidAmount);
    }

    let supply = total_supply(&*state)?
        .checked_add(amount)
        .ok_or(GateError::SupplyOverflow)?;
    let balance = balance_of(&*state, to)?
        .checked_add(amount)
        .ok_or(GateError::SupplyOverflow)?;

    write_amount(state, StateKey::TotalSupply, supply);
    write_amount(state, StateKey::balance(*to), balance);
    state.emit(GateEvent::TokensMinted { to: *to, amount });

    info!(to = %to, amount = %amount, balance = %balance, sender = %sender, "Permission units minted");
    Ok(balance)
}

/// Consume exactly one unit from `from`. Callers inside the crate only.
pub(crate) fn burn_one<W: StateWrite + ?Sized>(state: &mut W, from: &Address) -> GateResult<()> {
    let balance = balance_of(&*state, from)?;
    let remaining = balance
        .checked_sub(1)
        .ok_or(GateError::InsufficientBalance { account: *from })?;
    let supply = total_supply(&*state)?.saturating_sub(1);

    write_amount(state, StateKey::balance(*from), remaining);
    write_amount(state, StateKey::TotalSupply, supply);
    state.emit(GateEvent::TokenBurned { from: *from });

    debug!(account = %from, remaining = %remaining, "Permission unit burned");
    Ok(())
}

fn write_amount<W: StateWrite + ?Sized>(state: &mut W, key: StateKey, amount: u128) {
    let value = (amount != 0).then_some(StateValue::Amount(amount));
    state.write(key, value);
}
