use serde::{Deserialize, Serialize};

use crate::types::{Address, DepositType, RoleId};

/// Change notification emitted by a committed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GateEvent {
    RoleGranted {
        role: RoleId,
        account: Address,
        sender: Address,
        permanent: bool,
    },
    RoleRevoked {
        role: RoleId,
        account: Address,
        sender: Address,
    },
    PolicyUpdated {
        deposit_type: DepositType,
        blocked: bool,
        no_token: bool,
    },
    TokensMinted {
        to: Address,
        #[serde(with = "crate::types::amount_string")]
        amount: u128,
    },
    TokenBurned {
        from: Address,
    },
    CustomGaterChanged {
        previous: Option<Address>,
        current: Option<Address>,
    },
}

impl GateEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoleGranted { .. } => "role_granted",
            Self::RoleRevoked { .. } => "role_revoked",
            Self::PolicyUpdated { .. } => "policy_updated",
            Self::TokensMinted { .. } => "tokens_minted",
            Self::TokenBurned { .. } => "token_burned",
            Self::CustomGaterChanged { .. } => "custom_gater_changed",
        }
    }
}
