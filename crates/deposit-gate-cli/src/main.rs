//! gatectl - operator tooling for a deposit gate
//!
//! Acts on a local state file and lets operators:
//! - Create a gate from a genesis file
//! - Inspect token supply, account roles and per-type deposit policy
//! - Mint permission units
//! - Grant and revoke admin roles
//! - Update deposit policy for one deposit type

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use deposit_gate::{Address, DepositType};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{admin, config, init, mint, status, GateContext};

/// gatectl application
#[derive(Parser)]
#[command(name = "gatectl")]
#[command(about = "Deposit gate operator CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Gate state file
    #[arg(long, global = true, env = "GATE_STATE", default_value = "gate-state.json")]
    state: PathBuf,

    /// Acting account for mutating commands
    #[arg(long, global = true, env = "GATE_CALLER")]
    caller: Option<Address>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `status` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Create a new gate state file from a genesis file
    Init {
        /// Genesis TOML file
        #[arg(long)]
        genesis: PathBuf,
    },

    /// Show token, account and deposit type status
    Status {
        /// Account to report on (defaults to the caller)
        #[arg(long)]
        account: Option<Address>,

        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Mint permission units
    Mint {
        /// Number of units
        amount: u128,

        /// Recipient (defaults to the caller)
        #[arg(long)]
        to: Option<Address>,
    },

    /// Grant the admin role
    GrantAdmin {
        /// Account to promote
        account: Address,
    },

    /// Revoke the admin role
    RevokeAdmin {
        /// Account to demote
        account: Address,
    },

    /// Update the policy of one deposit type
    SetConfig {
        /// Deposit type: bls, execution, compounding, builder, topup, or a code
        #[arg(long)]
        prefix: DepositType,

        /// Block deposits of this type
        #[arg(long, value_parser = config::parse_bool)]
        blocked: Option<bool>,

        /// Let deposits of this type through without a permission unit
        #[arg(long, value_parser = config::parse_bool)]
        no_token: Option<bool>,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(cli) {
        output::print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = GateContext {
        state: cli.state,
        caller: cli.caller,
    };

    let Some(command) = cli.command else {
        return status::execute(&ctx, None, false);
    };

    match command {
        Commands::Init { genesis } => init::execute(&ctx, &genesis),
        Commands::Status { account, json } => status::execute(&ctx, account, json),
        Commands::Mint { amount, to } => mint::execute(&ctx, amount, to),
        Commands::GrantAdmin { account } => admin::grant(&ctx, account),
        Commands::RevokeAdmin { account } => admin::revoke(&ctx, account),
        Commands::SetConfig {
            prefix,
            blocked,
            no_token,
        } => config::set(&ctx, prefix, blocked, no_token),
    }
}
