//! Optional external gate consulted before local policy.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{GateError, GateResult};
use crate::types::{Address, DepositRequest};

/// An external authority that may approve a deposit outright.
///
/// Returning `Ok(true)` lets the deposit proceed without consulting local
/// policy or balances. `Ok(false)` hands the decision back to the gate. An
/// error aborts the whole check.
pub trait DepositGater: Send + Sync {
    fn check_deposit(&self, request: &DepositRequest) -> GateResult<bool>;
}

/// Binds gater addresses to in-process implementations.
///
/// The engine's custom gater slot only stores an [`Address`]; the
/// implementation behind it is looked up here at call time.
#[derive(Default, Clone)]
pub struct DelegateRegistry {
    gaters: HashMap<Address, Arc<dyn DepositGater>>,
}

impl DelegateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the implementation behind `address`.
    pub fn register(&mut self, address: Address, gater: Arc<dyn DepositGater>) {
        self.gaters.insert(address, gater);
    }

    pub fn unregister(&mut self, address: &Address) -> Option<Arc<dyn DepositGater>> {
        self.gaters.remove(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.gaters.contains_key(address)
    }

    pub fn resolve(&self, address: &Address) -> GateResult<&dyn DepositGater> {
        self.gaters
            .get(address)
            .map(|gater| gater.as_ref())
            .ok_or(GateError::GaterUnavailable(*address))
    }
}

impl fmt::Debug for DelegateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut addresses: Vec<_> = self.gaters.keys().collect();
        addresses.sort();
        f.debug_struct("DelegateRegistry")
            .field("gaters", &addresses)
            .finish()
    }
}
