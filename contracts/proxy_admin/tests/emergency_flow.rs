#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! End-to-end flows across the role registry, the emergency controller,
//! the upgrade controller and a managed proxy.

use access_control::{AccessControlContract, AccessControlContractClient};
use common::roles;
use emergency::{EmergencyControllerContract, EmergencyControllerContractClient};
use proxy::{ManagedProxyContract, ManagedProxyContractClient};
use proxy_admin::{ContractError, ProxyAdminContract, ProxyAdminContractClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{contract, contractimpl, Address, Env};

#[contract]
pub struct Implementation;

#[contractimpl]
impl Implementation {
    pub fn version(_env: Env) -> u32 {
        1
    }
}

struct World {
    env: Env,
    controller: EmergencyControllerContractClient<'static>,
    upgrades: ProxyAdminContractClient<'static>,
    proxy: ManagedProxyContractClient<'static>,
    admin: Address,
    upgrader: Address,
    guardians: [Address; 2],
    next: Address,
}

fn world() -> World {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(50_000);

    let admin = Address::generate(&env);
    let upgrader = Address::generate(&env);
    let guardians = [Address::generate(&env), Address::generate(&env)];

    let registry_id = env.register(AccessControlContract, ());
    let registry = AccessControlContractClient::new(&env, &registry_id);
    registry.initialize(&admin);
    registry.grant_role(&admin, &roles::upgrader_role(&env), &upgrader);
    for g in &guardians {
        registry.grant_role(&admin, &roles::emergency_role(&env), g);
    }

    let controller_id = env.register(EmergencyControllerContract, ());
    let controller = EmergencyControllerContractClient::new(&env, &controller_id);
    controller.initialize(&admin, &registry_id);
    controller.set_required_approvals(&admin, &2);

    let upgrades_id = env.register(ProxyAdminContract, ());
    let upgrades = ProxyAdminContractClient::new(&env, &upgrades_id);
    upgrades.initialize(&admin, &registry_id, &controller_id);

    let current = env.register(Implementation, ());
    let next = env.register(Implementation, ());
    let proxy_id = env.register(ManagedProxyContract, ());
    let proxy = ManagedProxyContractClient::new(&env, &proxy_id);
    proxy.initialize(&upgrades_id, &current);

    controller.register_aware_contract(&guardians[0], &upgrades_id);

    World {
        env,
        controller,
        upgrades,
        proxy,
        admin,
        upgrader,
        guardians,
        next,
    }
}

#[test]
fn pushed_shutdown_suspends_upgrades_until_cleared() {
    let w = world();

    w.controller.set_emergency_level(&w.guardians[0], &2);
    w.controller
        .process_emergency_for_contract(&w.guardians[0], &w.upgrades.address, &2);
    assert!(w.controller.is_processed(&w.upgrades.address, &2));
    assert_eq!(w.upgrades.get_shutdown_level(), 2);

    let result = w
        .upgrades
        .try_propose_upgrade(&w.upgrader, &w.proxy.address, &w.next);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::UpgradesSuspended);

    // Lowering the controller level alone does not lift the local shutdown.
    w.controller.set_emergency_level(&w.guardians[0], &0);
    let result = w
        .upgrades
        .try_propose_upgrade(&w.upgrader, &w.proxy.address, &w.next);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::UpgradesSuspended);

    w.upgrades.clear_emergency_shutdown(&w.admin);
    w.upgrades
        .propose_upgrade(&w.upgrader, &w.proxy.address, &w.next);
    assert!(w.upgrades.get_upgrade_proposal(&w.proxy.address).is_some());
}

#[test]
fn critical_escalation_freezes_pending_upgrade() {
    let w = world();
    w.upgrades
        .propose_upgrade(&w.upgrader, &w.proxy.address, &w.next);

    w.controller.approve_level3_emergency(&w.guardians[0]);
    w.controller.approve_level3_emergency(&w.guardians[1]);
    let unlock = w.controller.get_emergency_state().level3_unlock_time;
    w.env.ledger().set_timestamp(unlock);
    w.controller.execute_level3_emergency(&w.guardians[0]);
    w.controller
        .process_emergency_for_contract(&w.guardians[1], &w.upgrades.address, &3);

    // Past the upgrade timelock, but the system is paused at Critical.
    w.env
        .ledger()
        .set_timestamp(unlock + w.upgrades.get_upgrade_timelock());
    let result = w.upgrades.try_execute_upgrade(&w.upgrader, &w.proxy.address);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::UpgradesSuspended);

    let result = w.upgrades.try_clear_emergency_shutdown(&w.admin);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::EmergencyActive);

    // The proposer can still withdraw the pending upgrade.
    w.upgrades.cancel_upgrade(&w.upgrader, &w.proxy.address);
    assert_eq!(w.upgrades.get_upgrade_proposal(&w.proxy.address), None);
    assert_ne!(w.proxy.implementation(), w.next);
}
