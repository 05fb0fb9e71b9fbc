use serde::{Deserialize, Serialize};

use crate::types::{Address, DepositPolicy, DepositType, RoleId, TokenMetadata};

/// Typed lookup key. Each variant is one namespace of gate state.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "ns", rename_all = "snake_case")]
pub enum StateKey {
    Role { role: RoleId, account: Address },
    Policy { deposit_type: DepositType },
    Balance { account: Address },
    TotalSupply,
    CustomGater,
    Metadata,
}

impl StateKey {
    pub fn role(role: RoleId, account: Address) -> Self {
        Self::Role { role, account }
    }

    pub fn policy(deposit_type: DepositType) -> Self {
        Self::Policy { deposit_type }
    }

    pub fn balance(account: Address) -> Self {
        Self::Balance { account }
    }
}

/// A role held by an account. Absence of the key means not granted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    /// Seeded at genesis; immune to third-party revocation.
    pub permanent: bool,
}

/// Typed value stored under a [`StateKey`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateValue {
    Role(RoleGrant),
    Policy(DepositPolicy),
    Amount(#[serde(with = "crate::types::amount_string")] u128),
    Address(Address),
    Metadata(TokenMetadata),
}

impl StateValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Role(_) => "role",
            Self::Policy(_) => "policy",
            Self::Amount(_) => "amount",
            Self::Address(_) => "address",
            Self::Metadata(_) => "metadata",
        }
    }
}
