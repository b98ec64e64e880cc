#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::UpgradeProposal;

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub access_control: Address,
    pub emergency_controller: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImplementationEvent {
    pub implementation: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeProposedEvent {
    pub proxy: Address,
    pub implementation: Address,
    pub proposer: Address,
    pub with_call: bool,
    pub verified: bool,
    pub timestamp: u64,
}

/// Shared payload for execution and cancellation; `actor` is the caller.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeResolvedEvent {
    pub proxy: Address,
    pub implementation: Address,
    pub actor: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimelockUpdatedEvent {
    pub previous: u64,
    pub current: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProxyAdminChangedEvent {
    pub proxy: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShutdownReceivedEvent {
    pub level: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShutdownClearedEvent {
    pub caller: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    access_control: Address,
    emergency_controller: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            access_control,
            emergency_controller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_implementation_added(env: &Env, implementation: Address) {
    env.events().publish(
        (symbol_short!("IMPL_ADD"), implementation.clone()),
        ImplementationEvent {
            implementation,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_implementation_removed(env: &Env, implementation: Address) {
    env.events().publish(
        (symbol_short!("IMPL_REM"), implementation.clone()),
        ImplementationEvent {
            implementation,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgrade_proposed(env: &Env, proxy: Address, proposal: &UpgradeProposal) {
    env.events().publish(
        (symbol_short!("UPG_PROP"), proxy.clone()),
        UpgradeProposedEvent {
            proxy,
            implementation: proposal.implementation.clone(),
            proposer: proposal.proposer.clone(),
            with_call: !proposal.call.is_empty(),
            verified: proposal.verified,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgrade_executed(
    env: &Env,
    proxy: Address,
    implementation: Address,
    actor: Address,
) {
    env.events().publish(
        (symbol_short!("UPG_EXEC"), proxy.clone()),
        UpgradeResolvedEvent {
            proxy,
            implementation,
            actor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgrade_cancelled(
    env: &Env,
    proxy: Address,
    implementation: Address,
    actor: Address,
) {
    env.events().publish(
        (symbol_short!("UPG_CNCL"), proxy.clone()),
        UpgradeResolvedEvent {
            proxy,
            implementation,
            actor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_timelock_updated(env: &Env, previous: u64, current: u64) {
    env.events().publish(
        (symbol_short!("TL_UPD"),),
        TimelockUpdatedEvent {
            previous,
            current,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_proxy_admin_changed(env: &Env, proxy: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("PRX_ADM"), proxy.clone()),
        ProxyAdminChangedEvent {
            proxy,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_shutdown_received(env: &Env, level: u32) {
    env.events().publish(
        (symbol_short!("SHUTDOWN"), level),
        ShutdownReceivedEvent {
            level,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_shutdown_cleared(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("SHUT_CLR"),),
        ShutdownClearedEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}
