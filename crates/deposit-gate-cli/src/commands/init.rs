//! Create a new gate from a genesis file

use std::path::Path;

use anyhow::Context;
use deposit_gate::{is_initialized, FileStore, GateEngine, GenesisConfig};

use super::{log_events, GateContext};
use crate::error::CliError;
use crate::output::{print_field, print_success};

pub fn execute(ctx: &GateContext, genesis: &Path) -> anyhow::Result<()> {
    let config = GenesisConfig::load(genesis)
        .map_err(CliError::from)
        .with_context(|| format!("failed to load genesis file {}", genesis.display()))?;

    let store = FileStore::open(ctx.state_path())
        .map_err(CliError::from)
        .with_context(|| format!("failed to read state file {}", ctx.state_path().display()))?;
    if is_initialized(&store)? {
        return Err(CliError::InvalidInput(format!(
            "{} already holds a deposit gate",
            ctx.state_path().display()
        ))
        .into());
    }

    let mut gate = GateEngine::genesis(store, &config).map_err(CliError::from)?;
    log_events(&mut gate);

    print_success(&format!(
        "Initialized deposit gate at {}",
        ctx.state_path().display()
    ));
    print_field("Deposit caller", config.deposit_contract);
    for admin in &config.admins {
        print_field("Admin", format!("{admin} (sticky)"));
    }
    print_field(
        "Token",
        format!("{} ({})", config.token.name, config.token.symbol),
    );
    if let Some(gater) = config.custom_gater {
        print_field("Custom gater", gater);
    }
    if !config.policies.is_empty() {
        print_field("Policies", config.policies.len());
    }
    Ok(())
}
