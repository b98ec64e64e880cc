#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradedEvent {
    pub previous: Option<Address>,
    pub implementation: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChangedEvent {
    pub previous_admin: Option<Address>,
    pub new_admin: Address,
    pub timestamp: u64,
}

pub fn publish_upgraded(env: &Env, previous: Option<Address>, implementation: Address) {
    env.events().publish(
        (symbol_short!("UPGRADED"), implementation.clone()),
        UpgradedEvent {
            previous,
            implementation,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_changed(env: &Env, previous_admin: Option<Address>, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_CHG"), new_admin.clone()),
        AdminChangedEvent {
            previous_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
