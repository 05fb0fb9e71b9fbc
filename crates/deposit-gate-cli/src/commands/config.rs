//! Per-type deposit policy updates

use deposit_gate::{DepositPolicy, DepositType};

use super::{log_events, GateContext};
use crate::error::CliError;
use crate::output::{describe_policy, print_field, print_info, print_success, print_warning};

/// Parse an operator boolean: true/false, yes/no, 1/0, y/n.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "y" => Ok(true),
        "false" | "no" | "0" | "n" => Ok(false),
        other => Err(format!(
            "invalid boolean '{other}' (use true/false, yes/no, 1/0 or y/n)"
        )),
    }
}

/// Overlay the flags that were given onto the current policy.
pub fn merge(current: DepositPolicy, blocked: Option<bool>, no_token: Option<bool>) -> DepositPolicy {
    DepositPolicy::new(
        blocked.unwrap_or(current.blocked),
        no_token.unwrap_or(current.no_token),
    )
}

pub fn set(
    ctx: &GateContext,
    deposit_type: DepositType,
    blocked: Option<bool>,
    no_token: Option<bool>,
) -> anyhow::Result<()> {
    let caller = ctx.caller()?;
    let mut gate = ctx.open_gate()?;
    ctx.require_admin(&gate, &caller)?;

    let name = deposit_type
        .label()
        .map(|label| format!("{label} ({deposit_type})"))
        .unwrap_or_else(|| deposit_type.to_string());
    if blocked.is_none() && no_token.is_none() {
        print_warning("Neither --blocked nor --no-token given.");
    }

    let current = gate.get_policy(deposit_type)?;
    let next = merge(current, blocked, no_token);
    println!("Deposit type: {name}");
    print_field("Current", describe_policy(current));
    print_field("New", describe_policy(next));

    if next == current {
        print_info("No changes to apply.");
        return Ok(());
    }

    gate.set_policy(&caller, deposit_type, next)
        .map_err(CliError::from)?;
    log_events(&mut gate);

    let verified = gate.get_policy(deposit_type)?;
    if verified != next {
        return Err(CliError::InvalidInput(format!(
            "read back {} after update, expected {}",
            describe_policy(verified),
            describe_policy(next)
        ))
        .into());
    }
    print_success(&format!("Updated {name}"));
    print_field("Verified", describe_policy(verified));
    Ok(())
}
