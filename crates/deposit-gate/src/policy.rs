//! Per-category deposit policy.
//!
//! Categories are independent and never enumerated: an unset category reads
//! back as `{ blocked: false, no_token: false }`, and storing that default
//! removes the entry.

use tracing::info;

use crate::error::GateResult;
use crate::events::GateEvent;
use crate::roles;
use crate::store::{StateKey, StateRead, StateValue, StateWrite};
use crate::types::{Address, DepositPolicy, DepositType, RoleId};

pub fn get_policy<R: StateRead + ?Sized>(
    state: &R,
    deposit_type: DepositType,
) -> GateResult<DepositPolicy> {
    Ok(state.read_policy(deposit_type)?)
}

/// Overwrite both flags for `deposit_type`. Admin only.
pub fn set_policy<W: StateWrite + ?Sized>(
    state: &mut W,
    sender: &Address,
    deposit_type: DepositType,
    policy: DepositPolicy,
) -> GateResult<()> {
    roles::require_role(&*state, RoleId::DEFAULT_ADMIN, sender)?;
    store_policy(state, deposit_type, policy);
    info!(
        deposit_type = %deposit_type,
        blocked = policy.blocked,
        no_token = policy.no_token,
        sender = %sender,
        "Deposit policy updated"
    );
    Ok(())
}

pub(crate) fn store_policy<W: StateWrite + ?Sized>(
    state: &mut W,
    deposit_type: DepositType,
    policy: DepositPolicy,
) {
    let value = (!policy.is_default()).then_some(StateValue::Policy(policy));
    state.write(StateKey::policy(deposit_type), value);
    state.emit(GateEvent::PolicyUpdated {
        deposit_type,
        blocked: policy.blocked,
        no_token: policy.no_token,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;
    use crate::store::{MemoryStore, StagedState, StateStore};

    const ADMIN: Address = Address::repeat_byte(0x0a);

    fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        let mut staged = StagedState::new(&store);
        roles::seed_permanent(&mut staged, RoleId::DEFAULT_ADMIN, &ADMIN).unwrap();
        let (batch, _) = staged.into_parts();
        store.apply(batch).unwrap();
        store
    }

    #[test]
    fn unset_categories_default_to_allowed_and_token_required() {
        let store = MemoryStore::new();
        for ty in [DepositType(0x00), DepositType(0x7f), DepositType(0xfffe)] {
            assert_eq!(get_policy(&store, ty).unwrap(), DepositPolicy::default());
        }
    }

    #[test]
    fn setting_one_category_leaves_others_alone() {
        let store = seeded();
        let mut staged = StagedState::new(&store);
        set_policy(&mut staged, &ADMIN, DepositType::BUILDER, DepositPolicy::new(true, false)).unwrap();

        assert!(get_policy(&staged, DepositType::BUILDER).unwrap().blocked);
        assert_eq!(
            get_policy(&staged, DepositType::COMPOUNDING).unwrap(),
            DepositPolicy::default()
        );
    }

    #[test]
    fn restoring_the_default_deletes_the_entry() {
        let mut store = seeded();
        let mut staged = StagedState::new(&store);
        set_policy(&mut staged, &ADMIN, DepositType::TOP_UP, DepositPolicy::new(false, true)).unwrap();
        let (batch, _) = staged.into_parts();
        store.apply(batch).unwrap();
        let before = store.len();

        let mut staged = StagedState::new(&store);
        set_policy(&mut staged, &ADMIN, DepositType::TOP_UP, DepositPolicy::default()).unwrap();
        let (batch, events) = staged.into_parts();
        store.apply(batch).unwrap();

        assert_eq!(store.len(), before - 1);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn non_admin_cannot_set_policy() {
        let store = seeded();
        let mut staged = StagedState::new(&store);
        let err = set_policy(
            &mut staged,
            &Address::repeat_byte(0x0b),
            DepositType::BLS,
            DepositPolicy::new(true, true),
        )
        .unwrap_err();
        assert!(matches!(err, GateError::Unauthorized { .. }));
        assert_eq!(staged.pending_writes(), 0);
    }
}
