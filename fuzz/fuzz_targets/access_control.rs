#![no_main]

use access_control::{AccessControlContract, AccessControlContractClient};
use arbitrary::Arbitrary;
use common::roles;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, BytesN, Env};

const ACTORS: usize = 5;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Grant { caller: u8, role: u8, account: u8 },
    Revoke { caller: u8, role: u8, account: u8 },
    Renounce { caller: u8, role: u8 },
    SetRoleAdmin { caller: u8, role: u8, admin_role: u8 },
    Page { role: u8, offset: u8, limit: u8 },
}

fn role(env: &Env, tag: u8) -> BytesN<32> {
    match tag % 3 {
        0 => roles::default_admin_role(env),
        1 => roles::emergency_role(env),
        _ => roles::pauser_role(env),
    }
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(AccessControlContract, ());
    let client = AccessControlContractClient::new(&env, &contract_id);

    let actors: Vec<Address> = (0..ACTORS).map(|_| Address::generate(&env)).collect();
    client.initialize(&actors[0]);
    let pick = |i: u8| &actors[i as usize % ACTORS];

    for action in actions {
        match action {
            FuzzAction::Grant { caller, role: r, account } => {
                let _ = client.try_grant_role(pick(caller), &role(&env, r), pick(account));
            }
            FuzzAction::Revoke { caller, role: r, account } => {
                let _ = client.try_revoke_role(pick(caller), &role(&env, r), pick(account));
            }
            FuzzAction::Renounce { caller, role: r } => {
                let _ = client.try_renounce_role(pick(caller), &role(&env, r));
            }
            FuzzAction::SetRoleAdmin { caller, role: r, admin_role } => {
                let _ = client.try_set_role_admin(
                    pick(caller),
                    &role(&env, r),
                    &role(&env, admin_role),
                );
            }
            FuzzAction::Page { role: r, offset, limit } => {
                let _ = client.try_get_role_members_paginated(
                    &role(&env, r),
                    &(offset as u32),
                    &(limit as u32),
                );
            }
        }

        // The root role is never left without a holder, and the member
        // count always matches the holders.
        let default_admin = roles::default_admin_role(&env);
        assert!(client.get_role_member_count(&default_admin) >= 1);
        for tag in 0..3u8 {
            let r = role(&env, tag);
            let holders = actors.iter().filter(|a| client.has_role(&r, a)).count() as u32;
            assert_eq!(client.get_role_member_count(&r), holders);
        }
    }
});
