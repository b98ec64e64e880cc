#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]

extern crate std;

use soroban_sdk::{
    symbol_short, testutils::Address as _, vec, Address, Env, IntoVal, Symbol, TryFromVal, Val,
    Vec,
};

use crate::{ManagedProxyContract, ManagedProxyContractClient, ProxyError};

// ── Test implementations ─────────────────────────────────────────────────────

mod impls {
    use soroban_sdk::{contract, contracterror, contractimpl, symbol_short, Env, Symbol};

    const VALUE: Symbol = symbol_short!("VALUE");

    #[contracterror]
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    #[repr(u32)]
    pub enum ImplError {
        MigrationFailed = 1,
    }

    #[contract]
    pub struct ImplV1;

    #[contractimpl]
    impl ImplV1 {
        pub fn version(_env: Env) -> u32 {
            1
        }
    }

    #[contract]
    pub struct ImplV2;

    #[contractimpl]
    impl ImplV2 {
        pub fn version(_env: Env) -> u32 {
            2
        }

        pub fn init_v2(env: Env, value: u32) -> u32 {
            env.storage().instance().set(&VALUE, &value);
            value
        }

        pub fn value(env: Env) -> u32 {
            env.storage().instance().get(&VALUE).unwrap_or(0)
        }

        pub fn fail_migration(_env: Env) -> Result<u32, ImplError> {
            Err(ImplError::MigrationFailed)
        }
    }
}

use impls::{ImplV1, ImplV2};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, ManagedProxyContractClient<'static>, Address, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let v1 = env.register(ImplV1, ());
    let v2 = env.register(ImplV2, ());
    let admin = Address::generate(&env);

    let proxy_id = env.register(ManagedProxyContract, ());
    let client = ManagedProxyContractClient::new(&env, &proxy_id);
    client.initialize(&admin, &v1);

    (env, client, admin, v1, v2)
}

fn version_via(env: &Env, client: &ManagedProxyContractClient<'_>) -> u32 {
    let out: Val = client.forward(&symbol_short!("version"), &Vec::new(env));
    u32::try_from_val(env, &out).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_initialize_and_forward() {
    let (env, client, admin, v1, _v2) = setup();

    assert_eq!(client.admin(), admin);
    assert_eq!(client.implementation(), v1);
    assert_eq!(version_via(&env, &client), 1);
}

#[test]
fn test_initialize_twice_fails() {
    let (env, client, _admin, v1, _v2) = setup();

    let result = client.try_initialize(&Address::generate(&env), &v1);
    assert_eq!(result.unwrap_err().unwrap(), ProxyError::AlreadyInitialized);
}

#[test]
fn test_admin_upgrades() {
    let (env, client, admin, _v1, v2) = setup();

    client.upgrade_to(&admin, &v2);

    assert_eq!(client.implementation(), v2);
    assert_eq!(version_via(&env, &client), 2);
}

#[test]
fn test_non_admin_cannot_upgrade() {
    let (env, client, _admin, v1, v2) = setup();

    let result = client.try_upgrade_to(&Address::generate(&env), &v2);
    assert_eq!(result.unwrap_err().unwrap(), ProxyError::NotAdmin);
    assert_eq!(client.implementation(), v1);
}

#[test]
fn test_upgrade_and_call_runs_migration() {
    let (env, client, admin, _v1, v2) = setup();
    let args: Vec<Val> = vec![&env, 42u32.into_val(&env)];

    let out = client.upgrade_to_and_call(&admin, &v2, &symbol_short!("init_v2"), &args);

    assert_eq!(u32::try_from_val(&env, &out).unwrap(), 42);
    assert_eq!(client.implementation(), v2);

    let stored: Val = client.forward(&symbol_short!("value"), &Vec::new(&env));
    assert_eq!(u32::try_from_val(&env, &stored).unwrap(), 42);
}

#[test]
fn test_failed_call_rolls_back_upgrade() {
    let (env, client, admin, v1, v2) = setup();

    let result = client.try_upgrade_to_and_call(
        &admin,
        &v2,
        &Symbol::new(&env, "fail_migration"),
        &Vec::new(&env),
    );

    assert!(result.is_err());
    assert_eq!(client.implementation(), v1);
}

#[test]
fn test_change_admin() {
    let (env, client, admin, _v1, v2) = setup();
    let successor = Address::generate(&env);

    client.change_admin(&admin, &successor);
    assert_eq!(client.admin(), successor);

    let result = client.try_upgrade_to(&admin, &v2);
    assert_eq!(result.unwrap_err().unwrap(), ProxyError::NotAdmin);

    client.upgrade_to(&successor, &v2);
    assert_eq!(client.implementation(), v2);
}
