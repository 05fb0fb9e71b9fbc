use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::delegate::DepositGater;
use crate::error::{GateError, GateResult};
use crate::types::DepositRequest;

/// Mock gater for testing.
///
/// Answers every request with the same decision and records what it saw.
pub struct StaticGater {
    decision: bool,
    calls: AtomicUsize,
    last: Mutex<Option<DepositRequest>>,
}

impl StaticGater {
    /// Create a gater that approves everything.
    pub fn approve_all() -> Self {
        Self::with_decision(true)
    }

    /// Create a gater that defers every request to local policy.
    pub fn decline_all() -> Self {
        Self::with_decision(false)
    }

    pub fn with_decision(decision: bool) -> Self {
        Self {
            decision,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request forwarded to this gater.
    pub fn last_request(&self) -> Option<DepositRequest> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }
}

impl DepositGater for StaticGater {
    fn check_deposit(&self, request: &DepositRequest) -> GateResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(request.clone());
        }
        Ok(self.decision)
    }
}

/// Mock gater whose every call fails.
pub struct FailingGater {
    reason: String,
}

impl FailingGater {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl DepositGater for FailingGater {
    fn check_deposit(&self, _request: &DepositRequest) -> GateResult<bool> {
        Err(GateError::Delegate(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;

    #[test]
    fn static_gater_records_calls() {
        let gater = StaticGater::decline_all();
        let request = DepositRequest::top_up(Address::repeat_byte(4), vec![1u8; 48], 32);
        assert!(!gater.check_deposit(&request).unwrap());
        assert_eq!(gater.calls(), 1);
        assert_eq!(gater.last_request(), Some(request));
    }

    #[test]
    fn failing_gater_errors() {
        let gater = FailingGater::new("unreachable");
        let request = DepositRequest::top_up(Address::repeat_byte(4), vec![1u8; 48], 32);
        assert!(gater.check_deposit(&request).is_err());
    }
}
