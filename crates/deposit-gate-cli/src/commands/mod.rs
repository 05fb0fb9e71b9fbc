//! CLI command implementations

pub mod admin;
pub mod config;
pub mod init;
pub mod mint;
pub mod status;

use std::path::{Path, PathBuf};

use anyhow::Context;
use deposit_gate::{Address, FileStore, GateEngine, GateError, RoleId};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Settings shared by every command
pub struct GateContext {
    pub state: PathBuf,
    pub caller: Option<Address>,
}

impl GateContext {
    pub fn state_path(&self) -> &Path {
        &self.state
    }

    /// The acting account; required by every mutating command.
    pub fn caller(&self) -> CliResult<Address> {
        self.caller.ok_or(CliError::MissingCaller)
    }

    /// Open an initialized gate from the state file.
    pub fn open_gate(&self) -> anyhow::Result<GateEngine<FileStore>> {
        let store = FileStore::open(&self.state)
            .map_err(CliError::from)
            .with_context(|| format!("failed to read state file {}", self.state.display()))?;
        GateEngine::open(store).map_err(CliError::from).with_context(|| {
            format!(
                "{} holds no deposit gate; run `gatectl init` first",
                self.state.display()
            )
        })
    }

    /// Fail unless `caller` holds the admin role. Mutating commands check
    /// this before deciding there is nothing to do.
    pub fn require_admin(&self, gate: &GateEngine<FileStore>, caller: &Address) -> CliResult<()> {
        if gate.has_role(RoleId::DEFAULT_ADMIN, caller)? {
            Ok(())
        } else {
            Err(GateError::Unauthorized {
                account: *caller,
                role: RoleId::DEFAULT_ADMIN,
            }
            .into())
        }
    }
}

/// Log the events a command committed.
pub fn log_events(gate: &mut GateEngine<FileStore>) {
    for event in gate.drain_events() {
        debug!(event = event.name(), detail = ?event, "Committed");
    }
}
