//! Admin role management

use deposit_gate::{Address, RoleId};

use super::{log_events, GateContext};
use crate::error::CliError;
use crate::output::{print_info, print_success};

pub fn grant(ctx: &GateContext, account: Address) -> anyhow::Result<()> {
    let caller = ctx.caller()?;
    let mut gate = ctx.open_gate()?;
    ctx.require_admin(&gate, &caller)?;

    if gate.has_role(RoleId::DEFAULT_ADMIN, &account)? {
        print_info(&format!("{account} is already an admin; nothing to do."));
        return Ok(());
    }

    gate.grant_role(&caller, RoleId::DEFAULT_ADMIN, &account)
        .map_err(CliError::from)?;
    log_events(&mut gate);
    print_success(&format!("Granted admin role to {account}"));
    Ok(())
}

pub fn revoke(ctx: &GateContext, account: Address) -> anyhow::Result<()> {
    let caller = ctx.caller()?;
    let mut gate = ctx.open_gate()?;
    ctx.require_admin(&gate, &caller)?;

    if !gate.has_role(RoleId::DEFAULT_ADMIN, &account)? {
        print_info(&format!("{account} is not an admin; nothing to do."));
        return Ok(());
    }
    if gate.is_permanent(RoleId::DEFAULT_ADMIN, &account)? {
        return Err(CliError::InvalidInput(format!(
            "{account} holds a sticky admin grant from genesis; it can only be renounced by its holder"
        ))
        .into());
    }

    gate.revoke_role(&caller, RoleId::DEFAULT_ADMIN, &account)
        .map_err(CliError::from)?;
    log_events(&mut gate);
    print_success(&format!("Revoked admin role from {account}"));
    Ok(())
}
