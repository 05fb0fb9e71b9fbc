//! Genesis configuration.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Address, DepositPolicy, DepositType, TokenMetadata};

/// Initial state of a new gate, normally loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenesisConfig {
    /// Sole holder of the deposit-caller role.
    pub deposit_contract: Address,

    /// Permanent administrators. At least one is required.
    pub admins: Vec<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_gater: Option<Address>,

    #[serde(default)]
    pub token: TokenMetadata,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<PolicyEntry>,
}

/// One `[[policies]]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyEntry {
    pub deposit_type: DepositType,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub no_token: bool,
}

impl PolicyEntry {
    pub fn policy(&self) -> DepositPolicy {
        DepositPolicy::new(self.blocked, self.no_token)
    }
}

impl GenesisConfig {
    pub fn new(deposit_contract: Address, admins: impl IntoIterator<Item = Address>) -> Self {
        Self {
            deposit_contract,
            admins: admins.into_iter().collect(),
            custom_gater: None,
            token: TokenMetadata::default(),
            policies: Vec::new(),
        }
    }

    pub fn with_token(mut self, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.token = TokenMetadata {
            name: name.into(),
            symbol: symbol.into(),
        };
        self
    }

    pub fn with_policy(mut self, deposit_type: DepositType, policy: DepositPolicy) -> Self {
        self.policies.push(PolicyEntry {
            deposit_type,
            blocked: policy.blocked,
            no_token: policy.no_token,
        });
        self
    }

    pub fn with_custom_gater(mut self, gater: Address) -> Self {
        self.custom_gater = Some(gater);
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GenesisConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admins.is_empty() {
            return Err(invalid("at least one admin is required"));
        }
        if self.admins.iter().any(Address::is_zero) {
            return Err(invalid("admin address must not be zero"));
        }
        if self.deposit_contract.is_zero() {
            return Err(invalid("deposit_contract must not be zero"));
        }

        let mut seen = BTreeSet::new();
        for admin in &self.admins {
            if !seen.insert(*admin) {
                return Err(invalid(format!("duplicate admin {admin}")));
            }
        }

        let mut types = BTreeSet::new();
        for entry in &self.policies {
            if !types.insert(entry.deposit_type) {
                return Err(invalid(format!(
                    "duplicate policy for deposit type {}",
                    entry.deposit_type
                )));
            }
        }

        if self.token.name.trim().is_empty() {
            return Err(invalid("token name must not be empty"));
        }
        if self.token.symbol.trim().is_empty() {
            return Err(invalid("token symbol must not be empty"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
