//! Gate status overview

use colored::*;
use deposit_gate::{Address, GateStatus};

use super::GateContext;
use crate::error::CliError;
use crate::output::{print_field, print_heading, print_policy_table};

pub fn execute(ctx: &GateContext, account: Option<Address>, json: bool) -> anyhow::Result<()> {
    let gate = ctx.open_gate()?;
    let account = account.or(ctx.caller);
    let status = gate.status(account.as_ref())?;

    if json {
        let rendered = serde_json::to_string_pretty(&status).map_err(CliError::from)?;
        println!("{rendered}");
        return Ok(());
    }

    render(ctx, &status);
    Ok(())
}

fn render(ctx: &GateContext, status: &GateStatus) {
    print_heading("Deposit Gate Status");
    print_field(
        "State",
        format!("{} ({})", ctx.state_path().display(), status.backend),
    );
    println!();

    println!("{}", "Token".bold());
    print_field("Name", &status.token.name);
    print_field("Symbol", &status.token.symbol);
    print_field("Total supply", status.total_supply);
    println!();

    if let Some(account) = &status.account {
        println!("{} {}", "Account".bold(), account.address);
        let admin = match (account.is_admin, account.admin_permanent) {
            (true, true) => "yes (sticky)".green(),
            (true, false) => "yes".green(),
            (false, _) => "no".dimmed(),
        };
        print_field("Admin", admin);
        if account.is_deposit_caller {
            print_field("Deposit caller", "yes".green());
        }
        print_field(
            "Balance",
            format!("{} {}", account.balance, status.token.symbol),
        );
        println!();
    }

    let gater = match status.custom_gater {
        Some(address) => address.to_string().yellow(),
        None => "none".dimmed(),
    };
    print_field("Custom gater", gater);
    println!();

    println!("{}", "Deposit type configuration".bold());
    print_policy_table(&status.policies);
}
