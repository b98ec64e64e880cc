#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for level-3 approval bookkeeping.
//!
//! Random sequences of approvals, cancellations and level resets are
//! replayed against a controller requiring `REQUIRED` approvals. The model
//! tracks the set of distinct approvers of the current round; after every
//! step the controller must agree on the approval count, and escalation
//! must be in progress exactly when the threshold has been reached within
//! the round.

use std::collections::BTreeSet;

use access_control::{AccessControlContract, AccessControlContractClient};
use common::roles;
use emergency::{EmergencyControllerContract, EmergencyControllerContractClient};
use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

const GUARDIANS: usize = 5;
const REQUIRED: u32 = 3;

#[derive(Clone, Debug)]
enum Op {
    Approve(usize),
    Cancel,
    Normalize,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0usize..GUARDIANS).prop_map(Op::Approve),
        1 => Just(Op::Cancel),
        1 => Just(Op::Normalize),
    ]
}

fn setup() -> (Env, EmergencyControllerContractClient<'static>, Vec<Address>) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(10_000);

    let admin = Address::generate(&env);
    let registry_id = env.register(AccessControlContract, ());
    let registry = AccessControlContractClient::new(&env, &registry_id);
    registry.initialize(&admin);

    let guardians: Vec<Address> = (0..GUARDIANS)
        .map(|_| {
            let g = Address::generate(&env);
            registry.grant_role(&admin, &roles::emergency_role(&env), &g);
            g
        })
        .collect();

    let contract_id = env.register(EmergencyControllerContract, ());
    let client = EmergencyControllerContractClient::new(&env, &contract_id);
    client.initialize(&admin, &registry_id);
    client.set_required_approvals(&admin, &REQUIRED);

    (env, client, guardians)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn approval_count_matches_distinct_approvers(
        ops in proptest::collection::vec(op_strategy(), 1..24)
    ) {
        let (_env, client, guardians) = setup();
        let mut round: BTreeSet<usize> = BTreeSet::new();
        let mut in_progress = false;

        for op in &ops {
            match op {
                Op::Approve(i) => {
                    client.approve_level3_emergency(&guardians[*i]);
                    round.insert(*i);
                    if round.len() as u32 >= REQUIRED {
                        in_progress = true;
                    }
                }
                Op::Cancel => {
                    let result = client.try_cancel_level3_emergency(&guardians[0]);
                    prop_assert_eq!(result.is_ok(), in_progress);
                    if in_progress {
                        round.clear();
                        in_progress = false;
                    }
                }
                Op::Normalize => {
                    client.set_emergency_level(&guardians[0], &0);
                    round.clear();
                    in_progress = false;
                }
            }

            let state = client.get_emergency_state();
            prop_assert_eq!(state.approval_count, round.len() as u32);
            prop_assert_eq!(state.level3_in_progress, in_progress);
            prop_assert_eq!(state.level, 0);
        }
    }

    #[test]
    fn approval_pages_cover_every_approver(
        approvers in proptest::collection::btree_set(0usize..GUARDIANS, 0..=GUARDIANS),
        limit in 1u32..4,
    ) {
        let (_env, client, guardians) = setup();
        for i in &approvers {
            client.approve_level3_emergency(&guardians[*i]);
        }

        let mut seen = 0u32;
        let mut offset = 0u32;
        loop {
            let status = client.get_approval_status(&offset, &limit);
            prop_assert_eq!(status.total, approvers.len() as u32);
            if status.approvers.is_empty() {
                break;
            }
            seen += status.approvers.len();
            offset = status.next_offset;
        }
        prop_assert_eq!(seen, approvers.len() as u32);
    }
}
