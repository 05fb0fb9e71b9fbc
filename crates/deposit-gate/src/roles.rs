//! Role registry: (role, account) grants with a permanence flag.
//!
//! Every function validates the role prefix before reading anything, then
//! checks the sender's authority, then mutates. Granting is restricted to
//! holders of [`RoleId::DEFAULT_ADMIN`]; grants seeded at genesis are
//! permanent and cannot be revoked by any third party. The holder of a
//! permanent grant may still renounce it.

use tracing::{debug, info, warn};

use crate::error::{GateError, GateResult};
use crate::events::GateEvent;
use crate::store::{RoleGrant, StateKey, StateRead, StateValue, StateWrite};
use crate::types::{Address, RoleId};

pub fn ensure_valid(role: RoleId) -> GateResult<()> {
    if role.has_valid_prefix() {
        Ok(())
    } else {
        Err(GateError::InvalidRole(role))
    }
}

pub fn has_role<R: StateRead + ?Sized>(
    state: &R,
    role: RoleId,
    account: &Address,
) -> GateResult<bool> {
    ensure_valid(role)?;
    Ok(state.read_role(role, account)?.is_some())
}

pub fn is_permanent<R: StateRead + ?Sized>(
    state: &R,
    role: RoleId,
    account: &Address,
) -> GateResult<bool> {
    ensure_valid(role)?;
    Ok(state
        .read_role(role, account)?
        .map(|grant| grant.permanent)
        .unwrap_or(false))
}

/// Fail with `Unauthorized` unless `account` holds `role`.
pub fn require_role<R: StateRead + ?Sized>(
    state: &R,
    role: RoleId,
    account: &Address,
) -> GateResult<()> {
    if has_role(state, role, account)? {
        Ok(())
    } else {
        debug!(role = %role, account = %account, "Role check failed");
        Err(GateError::unauthorized(account, role))
    }
}

/// Grant `role` to `account`. Returns `false` if it was already held, in
/// which case the existing grant (and its permanence) is left as is.
pub fn grant_role<W: StateWrite + ?Sized>(
    state: &mut W,
    sender: &Address,
    role: RoleId,
    account: &Address,
) -> GateResult<bool> {
    ensure_valid(role)?;
    require_role(&*state, RoleId::DEFAULT_ADMIN, sender)?;

    if state.read_role(role, account)?.is_some() {
        debug!(role = %role, account = %account, "Role already granted");
        return Ok(false);
    }

    write_grant(state, sender, role, account, false);
    Ok(true)
}

/// Genesis-only: grant without an authority check and mark it permanent.
pub(crate) fn seed_permanent<W: StateWrite + ?Sized>(
    state: &mut W,
    role: RoleId,
    account: &Address,
) -> GateResult<()> {
    ensure_valid(role)?;
    write_grant(state, &Address::ZERO, role, account, true);
    Ok(())
}

fn write_grant<W: StateWrite + ?Sized>(
    state: &mut W,
    sender: &Address,
    role: RoleId,
    account: &Address,
    permanent: bool,
) {
    state.write(
        StateKey::role(role, *account),
        Some(StateValue::Role(RoleGrant { permanent })),
    );
    state.emit(GateEvent::RoleGranted {
        role,
        account: *account,
        sender: *sender,
        permanent,
    });
    info!(
        role = %role,
        account = %account,
        sender = %sender,
        permanent,
        "Role granted"
    );
}

/// Revoke `role` from `account` on behalf of an admin. Returns `false` if
/// the role was not held.
pub fn revoke_role<W: StateWrite + ?Sized>(
    state: &mut W,
    sender: &Address,
    role: RoleId,
    account: &Address,
) -> GateResult<bool> {
    ensure_valid(role)?;
    require_role(&*state, RoleId::DEFAULT_ADMIN, sender)?;

    match state.read_role(role, account)? {
        None => Ok(false),
        Some(grant) if grant.permanent => {
            warn!(role = %role, account = %account, sender = %sender, "Refusing to revoke permanent role");
            Err(GateError::PermanentRole {
                role,
                account: *account,
            })
        }
        Some(_) => {
            remove_grant(state, sender, role, account);
            Ok(true)
        }
    }
}

/// Give up one's own role. Permanence does not apply: an account can always
/// step down, it just cannot be pushed out.
pub fn renounce_role<W: StateWrite + ?Sized>(
    state: &mut W,
    sender: &Address,
    role: RoleId,
    account: &Address,
) -> GateResult<bool> {
    ensure_valid(role)?;
    if sender != account {
        return Err(GateError::unauthorized(sender, role));
    }

    if state.read_role(role, account)?.is_none() {
        return Ok(false);
    }
    remove_grant(state, sender, role, account);
    Ok(true)
}

fn remove_grant<W: StateWrite + ?Sized>(
    state: &mut W,
    sender: &Address,
    role: RoleId,
    account: &Address,
) {
    state.write(StateKey::role(role, *account), None);
    state.emit(GateEvent::RoleRevoked {
        role,
        account: *account,
        sender: *sender,
    });
    warn!(role = %role, account = %account, sender = %sender, "Role revoked");
}
