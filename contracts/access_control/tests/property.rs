#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the role ledger.
//!
//! Random sequences of grants, revocations and renunciations are replayed
//! against a fresh registry. After every step:
//! - the default admin role still has at least one member;
//! - each role's member count equals the number of distinct accounts for
//!   which `has_role` is true;
//! - every enumerated member actually holds the role.
//!
//! Run with more cases via `PROPTEST_CASES=512 cargo test --test property`.

use access_control::{AccessControlContract, AccessControlContractClient};
use common::roles;
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, BytesN, Env};

const ACTORS: usize = 4;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Grant(#[proptest(strategy = "0usize..ACTORS")] usize),
    Revoke(#[proptest(strategy = "0usize..ACTORS")] usize),
    Renounce(#[proptest(strategy = "0usize..ACTORS")] usize),
    GrantAdmin(#[proptest(strategy = "0usize..ACTORS")] usize),
    RevokeAdmin(#[proptest(strategy = "0usize..ACTORS")] usize),
    RenounceAdmin(#[proptest(strategy = "0usize..ACTORS")] usize),
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, AccessControlContractClient<'static>, Vec<Address>) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(AccessControlContract, ());
    let client = AccessControlContractClient::new(&env, &contract_id);

    let actors: Vec<Address> = (0..ACTORS).map(|_| Address::generate(&env)).collect();
    client.initialize(&actors[0]);

    (env, client, actors)
}

fn apply(env: &Env, client: &AccessControlContractClient<'_>, actors: &[Address], op: &Op) {
    let default_admin = roles::default_admin_role(env);
    let minter = roles::role_id(env, "MINTER_ROLE");
    let admin = client.get_role_member(&default_admin, &0);

    // Failures are part of the explored space; only the invariants matter.
    let _ = match op {
        Op::Grant(i) => client.try_grant_role(&admin, &minter, &actors[*i]).map(|_| ()),
        Op::Revoke(i) => client.try_revoke_role(&admin, &minter, &actors[*i]).map(|_| ()),
        Op::Renounce(i) => client.try_renounce_role(&actors[*i], &minter).map(|_| ()),
        Op::GrantAdmin(i) => client
            .try_grant_role(&admin, &default_admin, &actors[*i])
            .map(|_| ()),
        Op::RevokeAdmin(i) => client
            .try_revoke_role(&admin, &default_admin, &actors[*i])
            .map(|_| ()),
        Op::RenounceAdmin(i) => client
            .try_renounce_role(&actors[*i], &default_admin)
            .map(|_| ()),
    };
}

fn holders(
    client: &AccessControlContractClient<'_>,
    role: &BytesN<32>,
    actors: &[Address],
) -> u32 {
    actors.iter().filter(|a| client.has_role(role, a)).count() as u32
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Member counts and enumeration always agree with `has_role`, and the
    /// default admin role is never emptied.
    #[test]
    fn prop_ledger_stays_consistent(ops in proptest::collection::vec(any::<Op>(), 1..24)) {
        let (env, client, actors) = setup();
        let default_admin = roles::default_admin_role(&env);
        let minter = roles::role_id(&env, "MINTER_ROLE");

        for op in ops.iter() {
            apply(&env, &client, &actors, op);

            let admin_count = client.get_role_member_count(&default_admin);
            prop_assert!(admin_count >= 1, "default admin role emptied by {:?}", op);

            for role in [&default_admin, &minter] {
                let count = client.get_role_member_count(role);
                prop_assert_eq!(count, holders(&client, role, &actors));

                let page = client.get_role_members_paginated(role, &0, &(ACTORS as u32));
                prop_assert_eq!(page.total, count);
                prop_assert_eq!(page.members.len(), count);
                for member in page.members.iter() {
                    prop_assert!(client.has_role(role, &member));
                }
            }
        }
    }

    /// Re-granting a held role never changes the member count.
    #[test]
    fn prop_grant_is_idempotent(i in 0usize..ACTORS, repeats in 1usize..5) {
        let (env, client, actors) = setup();
        let minter = roles::role_id(&env, "MINTER_ROLE");

        for _ in 0..repeats {
            client.grant_role(&actors[0], &minter, &actors[i]);
        }
        prop_assert_eq!(client.get_role_member_count(&minter), 1);
        prop_assert!(client.has_role(&minter, &actors[i]));
    }

    /// Pages never exceed `limit` and an offset past the end is empty.
    #[test]
    fn prop_page_length(members in 0usize..6, offset in 0u32..8, limit in 1u32..8) {
        let (env, client, actors) = setup();
        let minter = roles::role_id(&env, "MINTER_ROLE");
        for _ in 0..members {
            client.grant_role(&actors[0], &minter, &Address::generate(&env));
        }

        let page = client.get_role_members_paginated(&minter, &offset, &limit);
        let total = members as u32;
        let expected = if offset >= total { 0 } else { limit.min(total - offset) };
        prop_assert_eq!(page.total, total);
        prop_assert_eq!(page.members.len(), expected);
    }
}
