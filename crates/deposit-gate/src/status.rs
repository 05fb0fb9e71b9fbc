use serde::{Deserialize, Serialize};

use crate::types::{Address, DepositPolicy, DepositType, TokenMetadata};

/// Read-only snapshot of the gate, as rendered by operator tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStatus {
    pub backend: String,
    pub token: TokenMetadata,
    #[serde(with = "crate::types::amount_string")]
    pub total_supply: u128,
    pub custom_gater: Option<Address>,
    /// Policy of every conventional deposit type, in display order.
    pub policies: Vec<PolicyRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRow {
    pub deposit_type: DepositType,
    pub label: String,
    pub blocked: bool,
    pub no_token: bool,
}

impl PolicyRow {
    pub fn new(deposit_type: DepositType, policy: DepositPolicy) -> Self {
        Self {
            deposit_type,
            label: deposit_type
                .label()
                .map(str::to_string)
                .unwrap_or_else(|| deposit_type.to_string()),
            blocked: policy.blocked,
            no_token: policy.no_token,
        }
    }

    pub fn policy(&self) -> DepositPolicy {
        DepositPolicy::new(self.blocked, self.no_token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub address: Address,
    pub is_admin: bool,
    /// The admin grant was seeded at genesis and cannot be revoked.
    pub admin_permanent: bool,
    pub is_deposit_caller: bool,
    #[serde(with = "crate::types::amount_string")]
    pub balance: u128,
}

impl GateStatus {
    pub fn policy(&self, deposit_type: DepositType) -> Option<&PolicyRow> {
        self.policies
            .iter()
            .find(|row| row.deposit_type == deposit_type)
    }
}
