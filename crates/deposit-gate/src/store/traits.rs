use std::collections::BTreeMap;

use super::error::{StorageError, StorageResult};
use super::keys::{RoleGrant, StateKey, StateValue};
use crate::events::GateEvent;
use crate::types::{Address, DepositPolicy, DepositType, RoleId, TokenMetadata};

/// Writes produced by one successful operation. `None` deletes the key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    pub writes: BTreeMap<StateKey, Option<StateValue>>,
}

impl WriteBatch {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }
}

/// Backing store for gate state.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &StateKey) -> StorageResult<Option<StateValue>>;

    /// Apply every write in the batch, or none of them.
    fn apply(&mut self, batch: WriteBatch) -> StorageResult<()>;

    /// All stored entries in key order.
    fn entries(&self) -> StorageResult<Vec<(StateKey, StateValue)>>;

    fn backend_label(&self) -> &'static str;
}

/// Read access with typed accessors per namespace.
pub trait StateRead {
    fn read(&self, key: &StateKey) -> StorageResult<Option<StateValue>>;

    fn read_role(&self, role: RoleId, account: &Address) -> StorageResult<Option<RoleGrant>> {
        let key = StateKey::role(role, *account);
        match self.read(&key)? {
            None => Ok(None),
            Some(StateValue::Role(grant)) => Ok(Some(grant)),
            Some(other) => Err(StorageError::type_mismatch(&key, &other)),
        }
    }

    /// Absent entries read back as the default policy.
    fn read_policy(&self, deposit_type: DepositType) -> StorageResult<DepositPolicy> {
        let key = StateKey::policy(deposit_type);
        match self.read(&key)? {
            None => Ok(DepositPolicy::default()),
            Some(StateValue::Policy(policy)) => Ok(policy),
            Some(other) => Err(StorageError::type_mismatch(&key, &other)),
        }
    }

    /// Absent amounts read back as zero.
    fn read_amount(&self, key: &StateKey) -> StorageResult<u128> {
        match self.read(key)? {
            None => Ok(0),
            Some(StateValue::Amount(amount)) => Ok(amount),
            Some(other) => Err(StorageError::type_mismatch(key, &other)),
        }
    }

    fn read_address(&self, key: &StateKey) -> StorageResult<Option<Address>> {
        match self.read(key)? {
            None => Ok(None),
            Some(StateValue::Address(address)) => Ok(Some(address)),
            Some(other) => Err(StorageError::type_mismatch(key, &other)),
        }
    }

    fn read_metadata(&self) -> StorageResult<Option<TokenMetadata>> {
        match self.read(&StateKey::Metadata)? {
            None => Ok(None),
            Some(StateValue::Metadata(metadata)) => Ok(Some(metadata)),
            Some(other) => Err(StorageError::type_mismatch(&StateKey::Metadata, &other)),
        }
    }
}

impl<S: StateStore + ?Sized> StateRead for S {
    fn read(&self, key: &StateKey) -> StorageResult<Option<StateValue>> {
        self.get(key)
    }
}

/// Buffered write access used inside one operation.
pub trait StateWrite: StateRead {
    fn write(&mut self, key: StateKey, value: Option<StateValue>);

    fn emit(&mut self, event: GateEvent);
}
