//! Deposit gate: permissioned access to a validator deposit pipeline.
//!
//! Before a deposit reaches the deposit ledger, the gate classifies it,
//! consults administrator policy for its category, and charges the sender
//! one permission unit unless the category is exempt. An optional custom
//! gater is consulted first and may approve a deposit outright.
//!
//! ## Components
//!
//! - **Role registry** ([`roles`]): (role, account) grants. Genesis grants
//!   are permanent: they can be renounced by their holder, never revoked.
//! - **Policy store** ([`policy`]): `{ blocked, no_token }` per 16-bit
//!   deposit type; unset types are allowed and token-gated.
//! - **Classifier** ([`classifier`]): top-up detection and first-byte
//!   categorization of withdrawal credentials.
//! - **Permission balance** ([`balance`]): admin mint, burn-one on use.
//! - **Decision engine** ([`GateEngine`]): orchestrates the above.
//!
//! ## Atomicity
//!
//! Every mutating operation runs against a staged overlay of the store. A
//! failed operation discards the overlay: no writes, no events.

#![deny(unsafe_code)]

pub mod balance;
pub mod classifier;
pub mod config;
pub mod delegate;
pub mod engine;
pub mod error;
pub mod events;
pub mod mocks;
pub mod policy;
pub mod roles;
pub mod status;
pub mod store;
pub mod types;

pub use classifier::classify;
pub use config::{GenesisConfig, PolicyEntry};
pub use delegate::{DelegateRegistry, DepositGater};
pub use engine::{is_initialized, GateEngine};
pub use error::{ConfigError, ErrorClass, GateError, GateResult, ParseError};
pub use events::GateEvent;
pub use mocks::{FailingGater, StaticGater};
pub use status::{AccountStatus, GateStatus, PolicyRow};
pub use store::{FileStore, MemoryStore, StateStore, StorageError, StorageResult};
pub use types::{
    Address, DepositPolicy, DepositRequest, DepositType, RoleId, TokenMetadata, PUBKEY_LEN,
    ROLE_PREFIX_LEN, SIGNATURE_LEN, WITHDRAWAL_CREDENTIALS_LEN,
};
