use std::collections::BTreeMap;

use super::error::StorageResult;
use super::keys::{StateKey, StateValue};
use super::traits::{StateRead, StateStore, StateWrite, WriteBatch};
use crate::events::GateEvent;

/// Transaction overlay for a single operation.
///
/// Reads see the operation's own writes first, then the base store. Nothing
/// reaches the base store until [`StagedState::into_parts`] is applied by the
/// caller; dropping the overlay discards every staged write and event.
pub struct StagedState<'s> {
    base: &'s dyn StateStore,
    writes: BTreeMap<StateKey, Option<StateValue>>,
    events: Vec<GateEvent>,
}

impl<'s> StagedState<'s> {
    pub fn new(base: &'s dyn StateStore) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    pub fn into_parts(self) -> (WriteBatch, Vec<GateEvent>) {
        (
            WriteBatch {
                writes: self.writes,
            },
            self.events,
        )
    }
}

impl StateRead for StagedState<'_> {
    fn read(&self, key: &StateKey) -> StorageResult<Option<StateValue>> {
        match self.writes.get(key) {
            Some(staged) => Ok(staged.clone()),
            None => self.base.get(key),
        }
    }
}

impl StateWrite for StagedState<'_> {
    fn write(&mut self, key: StateKey, value: Option<StateValue>) {
        self.writes.insert(key, value);
    }

    fn emit(&mut self, event: GateEvent) {
        self.events.push(event);
    }
}
