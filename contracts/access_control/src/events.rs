#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the registry is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Fired when `account` newly receives `role`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleGrantedEvent {
    pub role: BytesN<32>,
    pub account: Address,
    pub sender: Address,
    pub timestamp: u64,
}

/// Fired when `account` loses `role`. `sender` equals `account` on renounce.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRevokedEvent {
    pub role: BytesN<32>,
    pub account: Address,
    pub sender: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleAdminChangedEvent {
    pub role: BytesN<32>,
    pub previous_admin_role: BytesN<32>,
    pub new_admin_role: BytesN<32>,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, role: BytesN<32>, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRT"), role.clone(), account.clone()),
        RoleGrantedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: BytesN<32>, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_REV"), role.clone(), account.clone()),
        RoleRevokedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_admin_changed(
    env: &Env,
    role: BytesN<32>,
    previous_admin_role: BytesN<32>,
    new_admin_role: BytesN<32>,
) {
    env.events().publish(
        (symbol_short!("ROLE_ADM"), role.clone()),
        RoleAdminChangedEvent {
            role,
            previous_admin_role,
            new_admin_role,
            timestamp: env.ledger().timestamp(),
        },
    );
}
