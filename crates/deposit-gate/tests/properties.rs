//! Property tests: classification, policy independence, role prefixes and
//! permission-unit accounting.

use deposit_gate::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const ADMIN: Address = Address::repeat_byte(0xa0);
const PIPELINE: Address = Address::repeat_byte(0xd0);

fn gate() -> GateEngine<MemoryStore> {
    GateEngine::genesis(MemoryStore::new(), &GenesisConfig::new(PIPELINE, [ADMIN])).unwrap()
}

fn arb_address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::new)
}

fn arb_policy() -> impl Strategy<Value = DepositPolicy> {
    (any::<bool>(), any::<bool>()).prop_map(|(blocked, no_token)| DepositPolicy::new(blocked, no_token))
}

fn arb_deposit_type() -> impl Strategy<Value = DepositType> {
    prop_oneof![
        Just(DepositType::BLS),
        Just(DepositType::EXECUTION),
        Just(DepositType::COMPOUNDING),
        Just(DepositType::BUILDER),
        Just(DepositType::TOP_UP),
        any::<u16>().prop_map(DepositType),
    ]
}

/// Credentials that never form a top-up: the last byte is non-zero.
fn arb_credentials() -> impl Strategy<Value = Vec<u8>> {
    (any::<u8>(), prop::collection::vec(any::<u8>(), 30), 1u8..=255).prop_map(
        |(prefix, middle, last)| {
            let mut wc = Vec::with_capacity(WITHDRAWAL_CREDENTIALS_LEN);
            wc.push(prefix);
            wc.extend(middle);
            wc.push(last);
            wc
        },
    )
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Zeroed signature and credentials are a top-up whatever the pubkey.
    #[test]
    fn zeroed_fields_always_classify_as_top_up(
        pubkey in prop::collection::vec(any::<u8>(), 0..64),
        sender in arb_address(),
    ) {
        let request = DepositRequest::top_up(sender, pubkey, 1);
        let ty = classify(&request.withdrawal_credentials, &request.signature).unwrap();
        prop_assert_eq!(ty, DepositType::TOP_UP);
    }

    /// Anything else is classified by the first credential byte, repeatably.
    #[test]
    fn classification_follows_first_byte(
        wc in arb_credentials(),
        sig in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let first = classify(&wc, &sig).unwrap();
        prop_assert_eq!(first, DepositType(u16::from(wc[0])));
        prop_assert_eq!(classify(&wc, &sig).unwrap(), first);
    }

    /// Writing one category's policy never changes another's.
    #[test]
    fn policies_are_independent(
        target in arb_deposit_type(),
        policy in arb_policy(),
    ) {
        let mut gate = gate();
        let before: Vec<_> = DepositType::KNOWN
            .iter()
            .map(|ty| gate.get_policy(*ty).unwrap())
            .collect();

        gate.set_policy(&ADMIN, target, policy).unwrap();

        prop_assert_eq!(gate.get_policy(target).unwrap(), policy);
        for (ty, old) in DepositType::KNOWN.iter().zip(before) {
            if *ty != target {
                prop_assert_eq!(gate.get_policy(*ty).unwrap(), old);
            }
        }
    }

    /// A category that was never configured reads back as the default.
    #[test]
    fn unset_categories_read_as_default(code in any::<u16>()) {
        let gate = gate();
        prop_assert_eq!(gate.get_policy(DepositType(code)).unwrap(), DepositPolicy::default());
    }

    /// Any role with an all-zero prefix is rejected, whatever its scope.
    #[test]
    fn zero_prefix_roles_are_always_invalid(
        scope in any::<[u8; 20]>(),
        account in arb_address(),
    ) {
        let mut gate = gate();
        let role = RoleId::from_parts([0u8; ROLE_PREFIX_LEN], scope);

        prop_assert!(matches!(gate.has_role(role, &account), Err(GateError::InvalidRole(_))));
        prop_assert!(matches!(gate.grant_role(&ADMIN, role, &account), Err(GateError::InvalidRole(_))));
        prop_assert!(matches!(gate.revoke_role(&ADMIN, role, &account), Err(GateError::InvalidRole(_))));
        prop_assert!(matches!(gate.renounce_role(&account, role, &account), Err(GateError::InvalidRole(_))));
    }

    /// N minted units pay for exactly N token-gated deposits.
    #[test]
    fn minted_units_pay_for_exactly_that_many_deposits(
        units in 1u128..12,
        holder in arb_address(),
        wc in arb_credentials(),
    ) {
        let mut gate = gate();
        gate.mint(&ADMIN, &holder, units).unwrap();

        let request = DepositRequest::new(holder, vec![1u8; PUBKEY_LEN], wc, vec![2u8; SIGNATURE_LEN], 1);
        let ty = classify(&request.withdrawal_credentials, &request.signature).unwrap();
        gate.set_policy(&ADMIN, ty, DepositPolicy::default()).unwrap();

        for _ in 0..units {
            prop_assert!(gate.check_deposit(&PIPELINE, &request).unwrap());
        }
        prop_assert!(
            matches!(
                gate.check_deposit(&PIPELINE, &request),
                Err(GateError::InsufficientBalance { .. })
            ),
            "deposit beyond the minted units must be rejected"
        );
        prop_assert_eq!(gate.balance_of(&holder).unwrap(), 0);
        prop_assert_eq!(gate.total_supply().unwrap(), 0);
    }
}
