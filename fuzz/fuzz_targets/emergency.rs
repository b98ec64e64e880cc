#![no_main]

use access_control::{AccessControlContract, AccessControlContractClient};
use arbitrary::Arbitrary;
use common::roles;
use emergency::{EmergencyControllerContract, EmergencyControllerContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Ledger},
    Address, Env,
};

const GUARDIANS: usize = 4;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    SetLevel { guardian: u8, level: u8 },
    Approve { guardian: u8 },
    Cancel { guardian: u8 },
    Execute { guardian: u8 },
    Pause,
    Unpause,
    Restrict { threshold: u8 },
    Withdrawal { enabled: bool, penalty_bps: u16 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let pauser = Address::generate(&env);
    let registry_id = env.register(AccessControlContract, ());
    let registry = AccessControlContractClient::new(&env, &registry_id);
    registry.initialize(&admin);
    registry.grant_role(&admin, &roles::pauser_role(&env), &pauser);

    let guardians: Vec<Address> = (0..GUARDIANS)
        .map(|_| {
            let g = Address::generate(&env);
            registry.grant_role(&admin, &roles::emergency_role(&env), &g);
            g
        })
        .collect();
    let pick = |i: u8| &guardians[i as usize % GUARDIANS];

    let contract_id = env.register(EmergencyControllerContract, ());
    let client = EmergencyControllerContractClient::new(&env, &contract_id);
    client.initialize(&admin, &registry_id);
    client.set_required_approvals(&admin, &2);
    client.set_level3_timelock(&admin, &3_600);

    let selector = symbol_short!("withdraw");

    for action in actions {
        match action {
            FuzzAction::SetLevel { guardian, level } => {
                let _ = client.try_set_emergency_level(pick(guardian), &(level as u32));
            }
            FuzzAction::Approve { guardian } => {
                let _ = client.try_approve_level3_emergency(pick(guardian));
            }
            FuzzAction::Cancel { guardian } => {
                let _ = client.try_cancel_level3_emergency(pick(guardian));
            }
            FuzzAction::Execute { guardian } => {
                let _ = client.try_execute_level3_emergency(pick(guardian));
            }
            FuzzAction::Pause => {
                let _ = client.try_pause_system(&pauser);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause_system(&pauser);
            }
            FuzzAction::Restrict { threshold } => {
                let _ = client.try_update_function_restriction(
                    &guardians[0],
                    &selector,
                    &(threshold as u32),
                );
            }
            FuzzAction::Withdrawal { enabled, penalty_bps } => {
                let _ = client.try_set_emergency_withdrawal(
                    &guardians[0],
                    &enabled,
                    &(penalty_bps as u32),
                );
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
        }

        let state = client.get_emergency_state();
        assert!(state.level <= 3);
        assert!(state.withdrawal_penalty_bps <= 5_000);
        if state.level == 3 {
            assert!(state.paused);
            assert!(state.withdrawal_enabled);
            assert!(!state.level3_in_progress);
        }
        if state.level3_in_progress {
            assert!(state.approval_count >= state.required_approvals);
        }
        if state.paused {
            assert!(!client.check_emergency_status(&selector));
        }
    }
});
