//! In-memory reference implementation of [`StateStore`].
//!
//! Deterministic and test-friendly; state is lost with the process.

use std::collections::BTreeMap;

use super::error::StorageResult;
use super::keys::{StateKey, StateValue};
use super::traits::{StateStore, WriteBatch};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<StateKey, StateValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn apply_to_map(map: &mut BTreeMap<StateKey, StateValue>, batch: WriteBatch) {
    for (key, value) in batch.writes {
        match value {
            Some(value) => {
                map.insert(key, value);
            }
            None => {
                map.remove(&key);
            }
        }
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &StateKey) -> StorageResult<Option<StateValue>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, batch: WriteBatch) -> StorageResult<()> {
        apply_to_map(&mut self.entries, batch);
        Ok(())
    }

    fn entries(&self) -> StorageResult<Vec<(StateKey, StateValue)>> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn backend_label(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, DepositPolicy, DepositType};

    #[test]
    fn apply_inserts_and_deletes() {
        let mut store = MemoryStore::new();
        let key = StateKey::policy(DepositType::BUILDER);

        let mut batch = WriteBatch::default();
        batch.writes.insert(
            key.clone(),
            Some(StateValue::Policy(DepositPolicy::new(true, false))),
        );
        batch.writes.insert(
            StateKey::balance(Address::repeat_byte(1)),
            Some(StateValue::Amount(3)),
        );
        store.apply(batch).unwrap();
        assert_eq!(store.len(), 2);

        let mut batch = WriteBatch::default();
        batch.writes.insert(key.clone(), None);
        store.apply(batch).unwrap();
        assert_eq!(store.get(&key).unwrap(), None);
        assert_eq!(store.len(), 1);
    }
}
