#![no_std]

//! Global emergency controller.
//!
//! Owns the protocol-wide emergency level (Normal, Alert, Restricted,
//! Critical), the pause flag, emergency-withdrawal settings, per-function
//! restriction thresholds and the registry of emergency-aware dependents.
//!
//! Levels 0–2 are set directly by an emergency-role holder. Critical is only
//! reachable through [`approve_level3_emergency`]: once `required_approvals`
//! distinct holders have approved, a timelock starts, and after it elapses
//! [`execute_level3_emergency`] enters Critical, pauses the system and forces
//! emergency withdrawal on.
//!
//! Role checks are answered by the role registry injected at
//! initialisation.
//!
//! [`approve_level3_emergency`]: EmergencyControllerContract::approve_level3_emergency
//! [`execute_level3_emergency`]: EmergencyControllerContract::execute_level3_emergency

mod escalation;
pub mod events;

use common::{
    guard, roles, AccessControlClient, AddressSet, EmergencyAwareClient, EmergencyLevel,
    ErrorCategory,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, BytesN, Env, Symbol, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const ACCESS_CONTROL: Symbol = symbol_short!("ACCESS");
const RECOVERY_ADMIN: Symbol = symbol_short!("RECOVERY");
const LEVEL: Symbol = symbol_short!("LEVEL");
const PAUSED: Symbol = symbol_short!("PAUSED");
const WITHDRAWAL_ENABLED: Symbol = symbol_short!("WDR_ON");
const WITHDRAWAL_PENALTY: Symbol = symbol_short!("WDR_BPS");
const REQUIRED_APPROVALS: Symbol = symbol_short!("REQ_APPR");
const LEVEL3_TIMELOCK: Symbol = symbol_short!("L3_DELAY");

// Persistent tuple keys: (prefix, ...)
const FUNCTION_RESTRICTION: Symbol = symbol_short!("F_RESTR");
const PROCESSED: Symbol = symbol_short!("PROCESSED");

// ── Configuration ────────────────────────────────────────────────────────────

pub const MAX_LEVEL: u32 = 3;

pub const DEFAULT_REQUIRED_APPROVALS: u32 = 3;
pub const MIN_REQUIRED_APPROVALS: u32 = 1;
pub const MAX_REQUIRED_APPROVALS: u32 = 20;

pub const DEFAULT_LEVEL3_TIMELOCK: u64 = 86_400;
pub const MIN_LEVEL3_TIMELOCK: u64 = 3_600;
pub const MAX_LEVEL3_TIMELOCK: u64 = 604_800;

pub const DEFAULT_WITHDRAWAL_PENALTY_BPS: u32 = 1_000;
pub const MAX_WITHDRAWAL_PENALTY_BPS: u32 = 5_000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    InvalidEmergencyLevel = 20,
    UseApproveForLevel3 = 21,
    LevelNotInEmergency = 22,
    ThresholdInvalid = 23,
    InvalidApprovalCount = 24,
    InvalidTimelockDuration = 25,
    InvalidPenalty = 26,
    InvalidAmount = 27,
    AlreadyAtLevel3 = 30,
    NoLevel3EscalationInProgress = 31,
    AlreadyPaused = 32,
    NotPaused = 33,
    CannotUnpauseAtLevel3 = 34,
    ContractNotRegistered = 35,
    AlreadyProcessed = 36,
    InsufficientBalance = 37,
    Reentrant = 38,
    WithdrawalLockedAtLevel3 = 39,
    Level3TimelockNotExpired = 50,
    EmergencyShutdownCallFailed = 60,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidEmergencyLevel
            | ContractError::UseApproveForLevel3
            | ContractError::LevelNotInEmergency
            | ContractError::ThresholdInvalid
            | ContractError::InvalidApprovalCount
            | ContractError::InvalidTimelockDuration
            | ContractError::InvalidPenalty
            | ContractError::InvalidAmount => ErrorCategory::Validation,
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::AlreadyAtLevel3
            | ContractError::NoLevel3EscalationInProgress
            | ContractError::AlreadyPaused
            | ContractError::NotPaused
            | ContractError::CannotUnpauseAtLevel3
            | ContractError::ContractNotRegistered
            | ContractError::AlreadyProcessed
            | ContractError::InsufficientBalance
            | ContractError::Reentrant
            | ContractError::WithdrawalLockedAtLevel3 => ErrorCategory::StateConflict,
            ContractError::Level3TimelockNotExpired => ErrorCategory::Timing,
            ContractError::EmergencyShutdownCallFailed => ErrorCategory::ExternalCall,
        }
    }

    pub fn retryable(&self) -> bool {
        self.category().retryable()
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Snapshot of the controller returned by `get_emergency_state`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyState {
    pub level: u32,
    pub paused: bool,
    pub withdrawal_enabled: bool,
    pub withdrawal_penalty_bps: u32,
    pub level3_in_progress: bool,
    pub level3_unlock_time: u64,
    pub approval_count: u32,
    pub required_approvals: u32,
}

/// Paginated view of the current level-3 approval round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalStatus {
    pub current_count: u32,
    pub required: u32,
    pub approvers: Vec<Address>,
    pub next_offset: u32,
    pub total: u32,
    pub in_progress: bool,
    pub unlock_time: u64,
}

/// One page of registered emergency-aware contracts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractPage {
    pub contracts: Vec<Address>,
    pub total: u32,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct EmergencyControllerContract;

#[contractimpl]
impl EmergencyControllerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the controller.
    ///
    /// * `admin`          – initial recovery admin for swept tokens.
    /// * `access_control` – role registry answering every role check.
    pub fn initialize(
        env: Env,
        admin: Address,
        access_control: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&ACCESS_CONTROL, &access_control);
        env.storage().instance().set(&RECOVERY_ADMIN, &admin);
        env.storage()
            .instance()
            .set(&LEVEL, &EmergencyLevel::Normal.as_u32());
        env.storage().instance().set(&PAUSED, &false);
        env.storage().instance().set(&WITHDRAWAL_ENABLED, &false);
        env.storage()
            .instance()
            .set(&WITHDRAWAL_PENALTY, &DEFAULT_WITHDRAWAL_PENALTY_BPS);
        env.storage()
            .instance()
            .set(&REQUIRED_APPROVALS, &DEFAULT_REQUIRED_APPROVALS);
        env.storage()
            .instance()
            .set(&LEVEL3_TIMELOCK, &DEFAULT_LEVEL3_TIMELOCK);

        events::publish_initialized(&env, admin, access_control);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Level management ────────────────────────────────────────────────────

    /// Moves between Normal, Alert and Restricted.
    ///
    /// Alert and Restricted switch emergency withdrawal on at the default
    /// penalty. Normal switches it off and discards any level-3 approvals.
    pub fn set_emergency_level(
        env: Env,
        caller: Address,
        level: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        let target =
            EmergencyLevel::from_u32(level).ok_or(ContractError::InvalidEmergencyLevel)?;
        if target == EmergencyLevel::Critical {
            return Err(ContractError::UseApproveForLevel3);
        }

        let previous = Self::get_emergency_level(env.clone());
        env.storage().instance().set(&LEVEL, &level);

        match target {
            EmergencyLevel::Normal => {
                Self::write_withdrawal(&env, false, DEFAULT_WITHDRAWAL_PENALTY_BPS);
                escalation::reset(&env);
            }
            _ => Self::write_withdrawal(&env, true, DEFAULT_WITHDRAWAL_PENALTY_BPS),
        }

        events::publish_level_set(&env, caller, previous, level);

        Ok(())
    }

    /// Records the caller's approval for entering Critical.
    ///
    /// Re-approving within the same round records nothing new. The timelock
    /// starts on the first approval, new or repeated, that finds the count
    /// at or above the threshold, so lowering the threshold mid-round can be
    /// acted on by the existing approvers.
    pub fn approve_level3_emergency(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if Self::get_emergency_level(env.clone()) == EmergencyLevel::Critical.as_u32() {
            return Err(ContractError::AlreadyAtLevel3);
        }

        let approvals = escalation::approvals(&env);
        let newly_added = approvals.add(&caller);

        let count = approvals.len();
        let required = Self::get_required_approvals(env.clone());
        if newly_added {
            events::publish_level3_approved(&env, caller, count, required);
        }

        if !escalation::is_in_progress(&env) && count >= required {
            let delay = Self::get_level3_timelock(env.clone());
            let unlock_time = escalation::start_timelock(&env, delay);
            events::publish_level3_timelock_started(&env, count, unlock_time);
        }

        Ok(())
    }

    /// Abandons an in-progress escalation. The level is left untouched.
    pub fn cancel_level3_emergency(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if !escalation::is_in_progress(&env) {
            return Err(ContractError::NoLevel3EscalationInProgress);
        }

        escalation::reset(&env);

        events::publish_level3_cancelled(&env, caller);

        Ok(())
    }

    /// Enters Critical once the escalation timelock has elapsed.
    ///
    /// In one step: sets the level, pauses the system, forces emergency
    /// withdrawal on at the default penalty and clears the approval round.
    pub fn execute_level3_emergency(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if !escalation::is_in_progress(&env) {
            return Err(ContractError::NoLevel3EscalationInProgress);
        }
        if env.ledger().timestamp() < escalation::unlock_time(&env) {
            return Err(ContractError::Level3TimelockNotExpired);
        }

        let previous = Self::get_emergency_level(env.clone());
        let critical = EmergencyLevel::Critical.as_u32();
        env.storage().instance().set(&LEVEL, &critical);
        let newly_paused = !Self::is_emergency_paused(env.clone());
        env.storage().instance().set(&PAUSED, &true);
        Self::write_withdrawal(&env, true, DEFAULT_WITHDRAWAL_PENALTY_BPS);
        escalation::reset(&env);

        events::publish_level_set(&env, caller.clone(), previous, critical);
        if newly_paused {
            events::publish_paused(&env, caller);
        }

        Ok(())
    }

    // ── Pause ───────────────────────────────────────────────────────────────

    pub fn pause_system(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::pauser_role(&env), &caller)?;

        if Self::is_emergency_paused(env.clone()) {
            return Err(ContractError::AlreadyPaused);
        }
        env.storage().instance().set(&PAUSED, &true);

        events::publish_paused(&env, caller);

        Ok(())
    }

    /// Lifts the pause. A pause imposed at Critical can only be lifted after
    /// the level has been lowered.
    pub fn unpause_system(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::pauser_role(&env), &caller)?;

        if !Self::is_emergency_paused(env.clone()) {
            return Err(ContractError::NotPaused);
        }
        if Self::get_emergency_level(env.clone()) == EmergencyLevel::Critical.as_u32() {
            return Err(ContractError::CannotUnpauseAtLevel3);
        }
        env.storage().instance().set(&PAUSED, &false);

        events::publish_unpaused(&env, caller);

        Ok(())
    }

    // ── Emergency withdrawal ────────────────────────────────────────────────

    /// Overrides the withdrawal settings applied by level changes.
    pub fn set_emergency_withdrawal(
        env: Env,
        caller: Address,
        enabled: bool,
        penalty_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if penalty_bps > MAX_WITHDRAWAL_PENALTY_BPS {
            return Err(ContractError::InvalidPenalty);
        }
        if !enabled && Self::get_emergency_level(env.clone()) == EmergencyLevel::Critical.as_u32() {
            return Err(ContractError::WithdrawalLockedAtLevel3);
        }

        Self::write_withdrawal(&env, enabled, penalty_bps);

        Ok(())
    }

    // ── Emergency-aware dependents ──────────────────────────────────────────

    /// Registers a dependent for shutdown notifications. Idempotent.
    pub fn register_aware_contract(
        env: Env,
        caller: Address,
        contract: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if aware_contracts(&env).add(&contract) {
            events::publish_aware_registered(&env, contract);
        }

        Ok(())
    }

    pub fn remove_aware_contract(
        env: Env,
        caller: Address,
        contract: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if !aware_contracts(&env).remove(&contract) {
            return Err(ContractError::ContractNotRegistered);
        }

        events::publish_aware_removed(&env, contract);

        Ok(())
    }

    /// Pushes the shutdown notification for `level` to one dependent.
    ///
    /// Each (contract, level) pair is delivered at most once. The pair is
    /// only marked processed when the dependent's callback succeeds, so a
    /// failed delivery can be retried.
    pub fn process_emergency_for_contract(
        env: Env,
        caller: Address,
        contract: Address,
        level: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if level > MAX_LEVEL {
            return Err(ContractError::InvalidEmergencyLevel);
        }
        if level == EmergencyLevel::Normal.as_u32() {
            return Err(ContractError::LevelNotInEmergency);
        }
        if !aware_contracts(&env).contains(&contract) {
            return Err(ContractError::ContractNotRegistered);
        }
        if Self::is_processed(env.clone(), contract.clone(), level) {
            return Err(ContractError::AlreadyProcessed);
        }

        guard::non_reentrant(&env, ContractError::Reentrant, || {
            match EmergencyAwareClient::new(&env, &contract).try_emergency_shutdown(&level) {
                Ok(Ok(true)) => {}
                _ => return Err(ContractError::EmergencyShutdownCallFailed),
            }

            let key = (PROCESSED, contract.clone(), level);
            env.storage().persistent().set(&key, &true);
            env.storage()
                .persistent()
                .extend_ttl(&key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);

            events::publish_emergency_processed(&env, contract.clone(), level);

            Ok(())
        })
    }

    pub fn is_processed(env: Env, contract: Address, level: u32) -> bool {
        env.storage()
            .persistent()
            .get(&(PROCESSED, contract, level))
            .unwrap_or(false)
    }

    pub fn is_aware_contract(env: Env, contract: Address) -> bool {
        aware_contracts(&env).contains(&contract)
    }

    pub fn get_aware_contract_count(env: Env) -> u32 {
        aware_contracts(&env).len()
    }

    /// Lists registered dependents. A zero `limit` or an `offset` past the
    /// end returns an empty page rather than an error.
    pub fn get_aware_contracts_paginated(env: Env, offset: u32, limit: u32) -> ContractPage {
        let set = aware_contracts(&env);
        ContractPage {
            contracts: set.page(offset, limit),
            total: set.len(),
        }
    }

    // ── Function restrictions ───────────────────────────────────────────────

    /// Restricts `selector` from `threshold` upwards. Zero lifts the
    /// restriction.
    pub fn update_function_restriction(
        env: Env,
        caller: Address,
        selector: Symbol,
        threshold: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if threshold > MAX_LEVEL {
            return Err(ContractError::ThresholdInvalid);
        }

        let key = (FUNCTION_RESTRICTION, selector.clone());
        env.storage().persistent().set(&key, &threshold);
        env.storage()
            .persistent()
            .extend_ttl(&key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);

        events::publish_function_restriction(&env, selector, threshold);

        Ok(())
    }

    pub fn get_function_restriction(env: Env, selector: Symbol) -> u32 {
        env.storage()
            .persistent()
            .get(&(FUNCTION_RESTRICTION, selector))
            .unwrap_or(0)
    }

    pub fn is_function_restricted(env: Env, selector: Symbol) -> bool {
        let threshold = Self::get_function_restriction(env.clone(), selector);
        threshold > 0 && Self::get_emergency_level(env) >= threshold
    }

    /// Returns `true` if `selector` may run: the system is not paused and
    /// the selector is not restricted at the current level.
    pub fn check_emergency_status(env: Env, selector: Symbol) -> bool {
        !Self::is_emergency_paused(env.clone()) && !Self::is_function_restricted(env, selector)
    }

    // ── Token recovery ──────────────────────────────────────────────────────

    /// Sweeps `amount` of `token` held by the controller to the recovery admin.
    pub fn recover_tokens(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::emergency_role(&env), &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let client = token::Client::new(&env, &token);
        let this = env.current_contract_address();
        if client.balance(&this) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        let recipient = Self::get_recovery_admin(env.clone())?;
        client.transfer(&this, &recipient, &amount);

        events::publish_tokens_recovered(&env, token, recipient, amount);

        Ok(())
    }

    // ── Configuration ───────────────────────────────────────────────────────

    pub fn set_required_approvals(
        env: Env,
        caller: Address,
        required: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::default_admin_role(&env), &caller)?;

        if !(MIN_REQUIRED_APPROVALS..=MAX_REQUIRED_APPROVALS).contains(&required) {
            return Err(ContractError::InvalidApprovalCount);
        }
        env.storage().instance().set(&REQUIRED_APPROVALS, &required);

        events::publish_config_updated(&env, symbol_short!("REQ_APPR"), required as u64);

        Ok(())
    }

    pub fn set_level3_timelock(
        env: Env,
        caller: Address,
        duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::default_admin_role(&env), &caller)?;

        if !(MIN_LEVEL3_TIMELOCK..=MAX_LEVEL3_TIMELOCK).contains(&duration) {
            return Err(ContractError::InvalidTimelockDuration);
        }
        env.storage().instance().set(&LEVEL3_TIMELOCK, &duration);

        events::publish_config_updated(&env, symbol_short!("L3_DELAY"), duration);

        Ok(())
    }

    pub fn set_recovery_admin(
        env: Env,
        caller: Address,
        recovery_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::default_admin_role(&env), &caller)?;

        env.storage().instance().set(&RECOVERY_ADMIN, &recovery_admin);

        events::publish_recovery_admin_set(&env, recovery_admin);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_emergency_level(env: Env) -> u32 {
        env.storage().instance().get(&LEVEL).unwrap_or(0)
    }

    pub fn is_emergency_paused(env: Env) -> bool {
        env.storage().instance().get(&PAUSED).unwrap_or(false)
    }

    pub fn get_required_approvals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&REQUIRED_APPROVALS)
            .unwrap_or(DEFAULT_REQUIRED_APPROVALS)
    }

    pub fn get_level3_timelock(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&LEVEL3_TIMELOCK)
            .unwrap_or(DEFAULT_LEVEL3_TIMELOCK)
    }

    pub fn get_recovery_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&RECOVERY_ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_access_control(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ACCESS_CONTROL)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_emergency_state(env: Env) -> EmergencyState {
        EmergencyState {
            level: Self::get_emergency_level(env.clone()),
            paused: Self::is_emergency_paused(env.clone()),
            withdrawal_enabled: env
                .storage()
                .instance()
                .get(&WITHDRAWAL_ENABLED)
                .unwrap_or(false),
            withdrawal_penalty_bps: env
                .storage()
                .instance()
                .get(&WITHDRAWAL_PENALTY)
                .unwrap_or(DEFAULT_WITHDRAWAL_PENALTY_BPS),
            level3_in_progress: escalation::is_in_progress(&env),
            level3_unlock_time: escalation::unlock_time(&env),
            approval_count: escalation::approvals(&env).len(),
            required_approvals: Self::get_required_approvals(env),
        }
    }

    /// Paginated view of the current approval round.
    ///
    /// Unlike role enumeration, a zero `limit` is not an error here: it
    /// returns an empty page with the remaining fields filled in.
    pub fn get_approval_status(env: Env, offset: u32, limit: u32) -> ApprovalStatus {
        let approvals = escalation::approvals(&env);
        let total = approvals.len();
        let page = approvals.page(offset, limit);
        let next_offset = offset.saturating_add(page.len());

        ApprovalStatus {
            current_count: total,
            required: Self::get_required_approvals(env.clone()),
            approvers: page,
            next_offset,
            total,
            in_progress: escalation::is_in_progress(&env),
            unlock_time: escalation::unlock_time(&env),
        }
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert unless the role registry says `caller` holds `role`.
    fn require_role(env: &Env, role: BytesN<32>, caller: &Address) -> Result<(), ContractError> {
        let access_control = Self::get_access_control(env.clone())?;
        if !AccessControlClient::new(env, &access_control).has_role(&role, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn write_withdrawal(env: &Env, enabled: bool, penalty_bps: u32) {
        env.storage().instance().set(&WITHDRAWAL_ENABLED, &enabled);
        env.storage().instance().set(&WITHDRAWAL_PENALTY, &penalty_bps);
        events::publish_withdrawal_updated(env, enabled, penalty_bps);
    }
}

fn aware_contracts(env: &Env) -> AddressSet {
    AddressSet::new(env, roles::role_id(env, "EMERGENCY_AWARE_CONTRACTS"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
