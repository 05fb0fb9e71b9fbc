//! End-to-end gate scenarios: mint, check, block, exempt, revoke, exhaust.

use deposit_gate::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ADMIN: Address = Address::repeat_byte(0xa0);
const PIPELINE: Address = Address::repeat_byte(0xd0);
const ACCOUNT_A: Address = Address::repeat_byte(0x0a);
const ACCOUNT_B: Address = Address::repeat_byte(0x0b);
const ACCOUNT_C: Address = Address::repeat_byte(0x0c);

fn gate() -> GateEngine<MemoryStore> {
    let config = GenesisConfig::new(PIPELINE, [ADMIN]);
    GateEngine::genesis(MemoryStore::new(), &config).unwrap()
}

fn deposit_with_prefix(sender: Address, prefix: u8) -> DepositRequest {
    let mut credentials = vec![0x5au8; WITHDRAWAL_CREDENTIALS_LEN];
    credentials[0] = prefix;
    DepositRequest::new(
        sender,
        vec![0x77; PUBKEY_LEN],
        credentials,
        vec![0x33; SIGNATURE_LEN],
        32_000_000_000,
    )
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn minted_unit_is_consumed_by_an_execution_deposit() {
    let mut gate = gate();
    gate.mint(&ADMIN, &ACCOUNT_A, 1).unwrap();

    let allowed = gate
        .check_deposit(&PIPELINE, &deposit_with_prefix(ACCOUNT_A, 0x01))
        .unwrap();

    assert!(allowed);
    assert_eq!(gate.balance_of(&ACCOUNT_A).unwrap(), 0);
}

#[test]
fn deposit_without_units_is_rejected_and_balance_stays_zero() {
    let mut gate = gate();

    let err = gate
        .check_deposit(&PIPELINE, &deposit_with_prefix(ACCOUNT_A, 0x01))
        .unwrap_err();

    assert!(matches!(err, GateError::InsufficientBalance { account } if account == ACCOUNT_A));
    assert_eq!(err.class(), ErrorClass::Resource);
    assert_eq!(gate.balance_of(&ACCOUNT_A).unwrap(), 0);
}

#[test]
fn exempt_top_up_passes_without_units() {
    let mut gate = gate();
    gate.set_policy(&ADMIN, DepositType::TOP_UP, DepositPolicy::new(false, true))
        .unwrap();

    let top_up = DepositRequest::top_up(ACCOUNT_A, vec![0x77; PUBKEY_LEN], 1_000_000_000);
    assert!(gate.check_deposit(&PIPELINE, &top_up).unwrap());
    assert_eq!(gate.balance_of(&ACCOUNT_A).unwrap(), 0);
}

#[test]
fn blocked_type_is_rejected_regardless_of_balance() {
    let mut gate = gate();
    gate.set_policy(&ADMIN, DepositType::BUILDER, DepositPolicy::new(true, true))
        .unwrap();

    let err = gate
        .check_deposit(&PIPELINE, &deposit_with_prefix(ACCOUNT_A, 0x03))
        .unwrap_err();
    assert!(matches!(err, GateError::DepositTypeBlocked(ty) if ty == DepositType::BUILDER));
    assert_eq!(err.class(), ErrorClass::Policy);

    gate.mint(&ADMIN, &ACCOUNT_A, 10).unwrap();
    let err = gate
        .check_deposit(&PIPELINE, &deposit_with_prefix(ACCOUNT_A, 0x03))
        .unwrap_err();
    assert!(matches!(err, GateError::DepositTypeBlocked(_)));
    assert_eq!(gate.balance_of(&ACCOUNT_A).unwrap(), 10);
}

#[test]
fn revoked_admin_can_no_longer_mint() {
    let mut gate = gate();
    assert!(gate.grant_role(&ADMIN, RoleId::DEFAULT_ADMIN, &ACCOUNT_B).unwrap());
    assert!(!gate.is_permanent(RoleId::DEFAULT_ADMIN, &ACCOUNT_B).unwrap());

    gate.mint(&ACCOUNT_B, &ACCOUNT_C, 2).unwrap();
    assert_eq!(gate.balance_of(&ACCOUNT_C).unwrap(), 2);

    assert!(gate.revoke_role(&ADMIN, RoleId::DEFAULT_ADMIN, &ACCOUNT_B).unwrap());

    let err = gate.mint(&ACCOUNT_B, &ACCOUNT_C, 1).unwrap_err();
    assert!(matches!(
        err,
        GateError::Unauthorized { account, role }
            if account == ACCOUNT_B && role == RoleId::DEFAULT_ADMIN
    ));
    assert_eq!(err.class(), ErrorClass::Authorization);
    assert_eq!(gate.balance_of(&ACCOUNT_C).unwrap(), 2);
}

#[test]
fn three_units_allow_exactly_three_deposits() {
    let mut gate = gate();
    gate.mint(&ADMIN, &ACCOUNT_A, 3).unwrap();

    for remaining in (0..3).rev() {
        assert!(gate
            .check_deposit(&PIPELINE, &deposit_with_prefix(ACCOUNT_A, 0x01))
            .unwrap());
        assert_eq!(gate.balance_of(&ACCOUNT_A).unwrap(), remaining);
    }

    let err = gate
        .check_deposit(&PIPELINE, &deposit_with_prefix(ACCOUNT_A, 0x01))
        .unwrap_err();
    assert!(matches!(err, GateError::InsufficientBalance { .. }));
    assert_eq!(gate.total_supply().unwrap(), 0);
}

#[test]
fn genesis_policies_apply_from_the_first_deposit() {
    let config = GenesisConfig::new(PIPELINE, [ADMIN])
        .with_token("Validator Pass", "VPASS")
        .with_policy(DepositType::COMPOUNDING, DepositPolicy::new(false, true));
    let mut gate = GateEngine::genesis(MemoryStore::new(), &config).unwrap();

    assert!(gate
        .check_deposit(&PIPELINE, &deposit_with_prefix(ACCOUNT_A, 0x02))
        .unwrap());
    assert_eq!(gate.token_metadata().unwrap().symbol, "VPASS");
}

#[test]
fn every_committed_change_is_reported_in_order() {
    let mut gate = gate();
    gate.drain_events();

    gate.mint(&ADMIN, &ACCOUNT_A, 1).unwrap();
    gate.set_policy(&ADMIN, DepositType::BLS, DepositPolicy::new(true, false))
        .unwrap();
    gate.check_deposit(&PIPELINE, &deposit_with_prefix(ACCOUNT_A, 0x01))
        .unwrap();

    let events = gate.drain_events();
    assert_eq!(
        events,
        vec![
            GateEvent::TokensMinted {
                to: ACCOUNT_A,
                amount: 1
            },
            GateEvent::PolicyUpdated {
                deposit_type: DepositType::BLS,
                blocked: true,
                no_token: false
            },
            GateEvent::TokenBurned { from: ACCOUNT_A },
        ]
    );
    assert!(gate.events().is_empty());
}
