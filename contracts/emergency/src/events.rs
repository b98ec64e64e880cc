#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub access_control: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyLevelSetEvent {
    pub caller: Address,
    pub previous_level: u32,
    pub new_level: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Level3ApprovedEvent {
    pub approver: Address,
    pub approvals: u32,
    pub required: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Level3TimelockStartedEvent {
    pub approvals: u32,
    pub unlock_time: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Level3CancelledEvent {
    pub caller: Address,
    pub timestamp: u64,
}

/// Shared payload for pause and unpause.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub caller: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalUpdatedEvent {
    pub enabled: bool,
    pub penalty_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AwareContractEvent {
    pub contract: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyProcessedEvent {
    pub contract: Address,
    pub level: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionRestrictionEvent {
    pub selector: Symbol,
    pub threshold: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensRecoveredEvent {
    pub token: Address,
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Numeric configuration change; `key` names the setting.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub key: Symbol,
    pub value: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryAdminSetEvent {
    pub recovery_admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, access_control: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            access_control,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_level_set(env: &Env, caller: Address, previous_level: u32, new_level: u32) {
    env.events().publish(
        (symbol_short!("LVL_SET"), new_level),
        EmergencyLevelSetEvent {
            caller,
            previous_level,
            new_level,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_level3_approved(env: &Env, approver: Address, approvals: u32, required: u32) {
    env.events().publish(
        (symbol_short!("L3_APPR"), approver.clone()),
        Level3ApprovedEvent {
            approver,
            approvals,
            required,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_level3_timelock_started(env: &Env, approvals: u32, unlock_time: u64) {
    env.events().publish(
        (symbol_short!("L3_LOCK"),),
        Level3TimelockStartedEvent {
            approvals,
            unlock_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_level3_cancelled(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("L3_CANCL"),),
        Level3CancelledEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PauseEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        PauseEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawal_updated(env: &Env, enabled: bool, penalty_bps: u32) {
    env.events().publish(
        (symbol_short!("WDR_UPD"),),
        WithdrawalUpdatedEvent {
            enabled,
            penalty_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_aware_registered(env: &Env, contract: Address) {
    env.events().publish(
        (symbol_short!("AWARE_ADD"), contract.clone()),
        AwareContractEvent {
            contract,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_aware_removed(env: &Env, contract: Address) {
    env.events().publish(
        (symbol_short!("AWARE_REM"), contract.clone()),
        AwareContractEvent {
            contract,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_processed(env: &Env, contract: Address, level: u32) {
    env.events().publish(
        (symbol_short!("PROCESSED"), contract.clone(), level),
        EmergencyProcessedEvent {
            contract,
            level,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_function_restriction(env: &Env, selector: Symbol, threshold: u32) {
    env.events().publish(
        (symbol_short!("F_RESTR"), selector.clone()),
        FunctionRestrictionEvent {
            selector,
            threshold,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tokens_recovered(env: &Env, token: Address, recipient: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RECOVER"), token.clone()),
        TokensRecoveredEvent {
            token,
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_config_updated(env: &Env, key: Symbol, value: u64) {
    env.events().publish(
        (symbol_short!("CFG_UPD"), key.clone()),
        ConfigUpdatedEvent {
            key,
            value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_recovery_admin_set(env: &Env, recovery_admin: Address) {
    env.events().publish(
        (symbol_short!("RCV_ADMIN"),),
        RecoveryAdminSetEvent {
            recovery_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
