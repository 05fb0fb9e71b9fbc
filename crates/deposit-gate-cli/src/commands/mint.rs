//! Mint permission units

use deposit_gate::Address;

use super::{log_events, GateContext};
use crate::error::CliError;
use crate::output::{print_field, print_success};

pub fn execute(ctx: &GateContext, amount: u128, to: Option<Address>) -> anyhow::Result<()> {
    if amount == 0 {
        return Err(CliError::InvalidInput("amount must be greater than 0".into()).into());
    }
    let caller = ctx.caller()?;
    let to = to.unwrap_or(caller);

    let mut gate = ctx.open_gate()?;
    ctx.require_admin(&gate, &caller)?;
    let symbol = gate.token_metadata()?.symbol;
    let balance = gate.mint(&caller, &to, amount).map_err(CliError::from)?;
    log_events(&mut gate);

    print_success(&format!("Minted {amount} {symbol} to {to}"));
    print_field("New balance", format!("{balance} {symbol}"));
    print_field("Total supply", gate.total_supply()?);
    Ok(())
}
