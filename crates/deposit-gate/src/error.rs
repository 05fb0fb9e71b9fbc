use thiserror::Error;

use crate::store::StorageError;
use crate::types::{Address, DepositType, RoleId};

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

/// Errors returned by the deposit gate.
///
/// Every error aborts the whole operation; nothing it staged is committed.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("account {account} lacks role {role}")]
    Unauthorized { account: Address, role: RoleId },

    #[error("invalid role {0:?}: reserved prefix is all zero")]
    InvalidRole(RoleId),

    #[error("role {role} is permanent for {account} and cannot be revoked")]
    PermanentRole { role: RoleId, account: Address },

    #[error("deposits of type {0} are blocked")]
    DepositTypeBlocked(DepositType),

    #[error("insufficient permission balance for {account}")]
    InsufficientBalance { account: Address },

    #[error("withdrawal credentials are empty")]
    InvalidCredentials,

    #[error("mint amount must be positive")]
    InvalidAmount,

    #[error("permission supply overflow")]
    SupplyOverflow,

    #[error("no gater implementation registered for {0}")]
    GaterUnavailable(Address),

    #[error("custom gater failed: {0}")]
    Delegate(String),

    #[error("gate state is already initialized")]
    AlreadyInitialized,

    #[error("gate state is not initialized")]
    NotInitialized,

    #[error("invalid genesis configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Coarse grouping of [`GateError`] for callers that only need to know which
/// kind of rejection happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller lacks the role required, or the role itself is malformed.
    Authorization,
    /// Administrator policy forbids the request.
    Policy,
    /// A scarce resource (permission units, supply) is exhausted.
    Resource,
    /// The request itself is malformed.
    Input,
    /// State could not be read or persisted.
    Storage,
}

impl GateError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Unauthorized { .. } | Self::InvalidRole(_) | Self::PermanentRole { .. } => {
                ErrorClass::Authorization
            }
            Self::DepositTypeBlocked(_) | Self::GaterUnavailable(_) | Self::Delegate(_) => {
                ErrorClass::Policy
            }
            Self::InsufficientBalance { .. } | Self::SupplyOverflow => ErrorClass::Resource,
            Self::InvalidCredentials | Self::InvalidAmount | Self::Config(_) => ErrorClass::Input,
            Self::AlreadyInitialized | Self::NotInitialized | Self::Storage(_) => {
                ErrorClass::Storage
            }
        }
    }

    pub(crate) fn unauthorized(account: &Address, role: RoleId) -> Self {
        Self::Unauthorized {
            account: *account,
            role,
        }
    }
}

/// Errors loading or validating a genesis configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Errors parsing identities and deposit types from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid hex value: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("invalid deposit type: {0} (use 0x00, 0x01, 0x02, 0x03 or 0xffff)")]
    InvalidDepositType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_separate_policy_from_authorization_from_resources() {
        let unauthorized = GateError::unauthorized(&Address::repeat_byte(1), RoleId::DEFAULT_ADMIN);
        assert_eq!(unauthorized.class(), ErrorClass::Authorization);
        assert_eq!(
            GateError::DepositTypeBlocked(DepositType::BUILDER).class(),
            ErrorClass::Policy
        );
        assert_eq!(
            GateError::InsufficientBalance {
                account: Address::ZERO
            }
            .class(),
            ErrorClass::Resource
        );
        assert_eq!(GateError::InvalidCredentials.class(), ErrorClass::Input);
    }

    #[test]
    fn display_names_the_offending_values() {
        let err = GateError::DepositTypeBlocked(DepositType::BUILDER);
        assert_eq!(err.to_string(), "deposits of type 0x0003 are blocked");

        let err = GateError::PermanentRole {
            role: RoleId::DEFAULT_ADMIN,
            account: Address::repeat_byte(0xaa),
        };
        assert!(err.to_string().contains("permanent"));
        assert!(err.to_string().contains("admin"));
    }
}
