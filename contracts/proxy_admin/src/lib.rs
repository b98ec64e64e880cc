#![no_std]

//! Timelocked upgrade controller for managed proxies.
//!
//! ## Upgrade flow
//!
//! 1. An upgrader proposes a new implementation for a proxy, optionally with
//!    a call to run on the new implementation as part of the upgrade. At most
//!    one proposal is live per proxy.
//! 2. After `upgrade_timelock` seconds an upgrader executes the proposal. The
//!    proxy swaps its implementation pointer and runs the attached call in
//!    the same step; if anything fails, nothing changes and the proposal is
//!    kept for another attempt.
//! 3. The proposer or a default admin may cancel a live proposal at any time.
//!
//! ## Emergency integration
//!
//! The controller is itself emergency-aware. Proposals and executions are
//! refused while the emergency controller is paused, while the relevant
//! selector is restricted, or after the controller has pushed a shutdown at
//! `Restricted` or above. A pushed shutdown is cleared by a default admin
//! once the controller is back at `Normal`.

pub mod events;

use common::{
    guard, roles, AccessControlClient, AddressSet, EmergencyControllerClient, EmergencyLevel,
    ErrorCategory, ProxyClient,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, vec, Address, BytesN, Env, Executable,
    Symbol, Val, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const ACCESS_CONTROL: Symbol = symbol_short!("ACCESS");
const EMERGENCY_CONTROLLER: Symbol = symbol_short!("EMRG_CTRL");
const UPGRADE_TIMELOCK: Symbol = symbol_short!("UPG_LOCK");
const SHUTDOWN_LEVEL: Symbol = symbol_short!("SHUTDOWN");

// Persistent tuple key: (PROPOSAL, proxy)
const PROPOSAL: Symbol = symbol_short!("PROPOSAL");

// ── Configuration ────────────────────────────────────────────────────────────

pub const DEFAULT_UPGRADE_TIMELOCK: u64 = 172_800;
pub const MIN_TIMELOCK: u64 = 3_600;
pub const MAX_TIMELOCK: u64 = 2_592_000;

/// Selectors checked against the emergency controller.
pub const PROPOSE_SELECTOR: Symbol = symbol_short!("prop_upg");
pub const EXECUTE_SELECTOR: Symbol = symbol_short!("exec_upg");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    NotAuthorizedToCancel = 11,
    InvalidTimelockDuration = 20,
    ImplNotAContract = 21,
    InvalidEmergencyLevel = 22,
    ImplAlreadyAdded = 30,
    ImplNotFound = 31,
    UpgradePropExists = 32,
    NoUpgradeProposal = 33,
    UpgradesSuspended = 34,
    EmergencyActive = 35,
    Reentrant = 36,
    TimelockNotExpired = 50,
    UpgradeCallFailed = 60,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidTimelockDuration
            | ContractError::ImplNotAContract
            | ContractError::InvalidEmergencyLevel => ErrorCategory::Validation,
            ContractError::Unauthorized | ContractError::NotAuthorizedToCancel => {
                ErrorCategory::Authorization
            }
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::ImplAlreadyAdded
            | ContractError::ImplNotFound
            | ContractError::UpgradePropExists
            | ContractError::NoUpgradeProposal
            | ContractError::UpgradesSuspended
            | ContractError::EmergencyActive
            | ContractError::Reentrant => ErrorCategory::StateConflict,
            ContractError::TimelockNotExpired => ErrorCategory::Timing,
            ContractError::UpgradeCallFailed => ErrorCategory::ExternalCall,
        }
    }

    pub fn retryable(&self) -> bool {
        self.category().retryable()
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Call run on the new implementation as part of an upgrade.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeCall {
    pub func: Symbol,
    pub args: Vec<Val>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeProposal {
    pub implementation: Address,
    pub proposed_at: u64,
    pub proposer: Address,
    /// Empty for a plain swap, otherwise the single call to run with it.
    pub call: Vec<UpgradeCall>,
    /// Whether `implementation` was allow-listed when proposed. Advisory only.
    pub verified: bool,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ProxyAdminContract;

#[contractimpl]
impl ProxyAdminContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Wires the controller to its role registry and emergency controller.
    ///
    /// * `admin`                – deployer, recorded in the init event only.
    ///   Every later permission comes from roles held in `access_control`.
    /// * `access_control`       – role registry answering every role check.
    /// * `emergency_controller` – source of pause and restriction state.
    pub fn initialize(
        env: Env,
        admin: Address,
        access_control: Address,
        emergency_controller: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&ACCESS_CONTROL, &access_control);
        env.storage()
            .instance()
            .set(&EMERGENCY_CONTROLLER, &emergency_controller);
        env.storage()
            .instance()
            .set(&UPGRADE_TIMELOCK, &DEFAULT_UPGRADE_TIMELOCK);

        events::publish_initialized(&env, admin, access_control, emergency_controller);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Implementation allow-list ───────────────────────────────────────────

    pub fn add_valid_implementation(
        env: Env,
        caller: Address,
        implementation: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::upgrader_role(&env), &caller)?;

        if !is_deployed_contract(&implementation) {
            return Err(ContractError::ImplNotAContract);
        }
        if !valid_implementations(&env).add(&implementation) {
            return Err(ContractError::ImplAlreadyAdded);
        }

        events::publish_implementation_added(&env, implementation);

        Ok(())
    }

    pub fn remove_valid_implementation(
        env: Env,
        caller: Address,
        implementation: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::upgrader_role(&env), &caller)?;

        if !valid_implementations(&env).remove(&implementation) {
            return Err(ContractError::ImplNotFound);
        }

        events::publish_implementation_removed(&env, implementation);

        Ok(())
    }

    pub fn is_valid_implementation(env: Env, implementation: Address) -> bool {
        valid_implementations(&env).contains(&implementation)
    }

    pub fn get_valid_implementations(env: Env) -> Vec<Address> {
        valid_implementations(&env).members()
    }

    // ── Proposals ───────────────────────────────────────────────────────────

    pub fn propose_upgrade(
        env: Env,
        caller: Address,
        proxy: Address,
        implementation: Address,
    ) -> Result<(), ContractError> {
        let call = Vec::new(&env);
        Self::propose(env, caller, proxy, implementation, call)
    }

    /// Like [`propose_upgrade`](Self::propose_upgrade), with `func(args)` run
    /// on the new implementation in the same step as the swap.
    pub fn propose_upgrade_and_call(
        env: Env,
        caller: Address,
        proxy: Address,
        implementation: Address,
        func: Symbol,
        args: Vec<Val>,
    ) -> Result<(), ContractError> {
        let call = vec![&env, UpgradeCall { func, args }];
        Self::propose(env, caller, proxy, implementation, call)
    }

    /// Applies the live proposal for `proxy` once its timelock has elapsed.
    ///
    /// All-or-nothing: if the proxy rejects the swap or the attached call
    /// fails, `UpgradeCallFailed` is returned and the proposal stays live.
    pub fn execute_upgrade(
        env: Env,
        caller: Address,
        proxy: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::upgrader_role(&env), &caller)?;
        Self::require_operational(&env, EXECUTE_SELECTOR)?;

        let proposal = Self::get_upgrade_proposal(env.clone(), proxy.clone())
            .ok_or(ContractError::NoUpgradeProposal)?;
        let ready_at = proposal
            .proposed_at
            .saturating_add(Self::get_upgrade_timelock(env.clone()));
        if env.ledger().timestamp() < ready_at {
            return Err(ContractError::TimelockNotExpired);
        }

        guard::non_reentrant(&env, ContractError::Reentrant, || {
            let this = env.current_contract_address();
            let client = ProxyClient::new(&env, &proxy);
            let upgraded = match proposal.call.first() {
                None => matches!(
                    client.try_upgrade_to(&this, &proposal.implementation),
                    Ok(Ok(()))
                ),
                Some(call) => matches!(
                    client.try_upgrade_to_and_call(
                        &this,
                        &proposal.implementation,
                        &call.func,
                        &call.args
                    ),
                    Ok(Ok(_))
                ),
            };
            if !upgraded {
                return Err(ContractError::UpgradeCallFailed);
            }

            env.storage().persistent().remove(&(PROPOSAL, proxy.clone()));

            events::publish_upgrade_executed(
                &env,
                proxy.clone(),
                proposal.implementation.clone(),
                caller.clone(),
            );

            Ok(())
        })
    }

    /// Drops the live proposal for `proxy`. Allowed for its proposer and for
    /// default admins.
    pub fn cancel_upgrade(
        env: Env,
        caller: Address,
        proxy: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let proposal = Self::get_upgrade_proposal(env.clone(), proxy.clone())
            .ok_or(ContractError::NoUpgradeProposal)?;
        if proposal.proposer != caller
            && !Self::has_role(&env, roles::default_admin_role(&env), &caller)?
        {
            return Err(ContractError::NotAuthorizedToCancel);
        }

        env.storage().persistent().remove(&(PROPOSAL, proxy.clone()));

        events::publish_upgrade_cancelled(&env, proxy, proposal.implementation, caller);

        Ok(())
    }

    pub fn get_upgrade_proposal(env: Env, proxy: Address) -> Option<UpgradeProposal> {
        env.storage().persistent().get(&(PROPOSAL, proxy))
    }

    // ── Configuration ───────────────────────────────────────────────────────

    pub fn update_timelock(env: Env, caller: Address, duration: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::default_admin_role(&env), &caller)?;

        if !(MIN_TIMELOCK..=MAX_TIMELOCK).contains(&duration) {
            return Err(ContractError::InvalidTimelockDuration);
        }

        let previous = Self::get_upgrade_timelock(env.clone());
        env.storage().instance().set(&UPGRADE_TIMELOCK, &duration);

        events::publish_timelock_updated(&env, previous, duration);

        Ok(())
    }

    pub fn get_upgrade_timelock(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&UPGRADE_TIMELOCK)
            .unwrap_or(DEFAULT_UPGRADE_TIMELOCK)
    }

    // ── Proxy administration ────────────────────────────────────────────────

    pub fn get_proxy_implementation(env: Env, proxy: Address) -> Address {
        ProxyClient::new(&env, &proxy).implementation()
    }

    pub fn get_proxy_admin(env: Env, proxy: Address) -> Address {
        ProxyClient::new(&env, &proxy).admin()
    }

    /// Hands the admin slot of `proxy` to `new_admin`. Once moved, this
    /// contract can no longer upgrade that proxy.
    pub fn change_proxy_admin(
        env: Env,
        caller: Address,
        proxy: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::default_admin_role(&env), &caller)?;

        let this = env.current_contract_address();
        ProxyClient::new(&env, &proxy).change_admin(&this, &new_admin);

        events::publish_proxy_admin_changed(&env, proxy, new_admin);

        Ok(())
    }

    // ── Emergency-aware hooks ───────────────────────────────────────────────

    /// Shutdown notification pushed by the emergency controller.
    pub fn emergency_shutdown(env: Env, level: u32) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        let controller = Self::get_emergency_controller(env.clone())?;
        controller.require_auth();

        if EmergencyLevel::from_u32(level).is_none() {
            return Err(ContractError::InvalidEmergencyLevel);
        }
        env.storage().instance().set(&SHUTDOWN_LEVEL, &level);

        events::publish_shutdown_received(&env, level);

        Ok(true)
    }

    /// Returns `true` if `selector` may currently run on this contract.
    pub fn check_emergency_status(env: Env, selector: Symbol) -> Result<bool, ContractError> {
        if Self::get_shutdown_level(env.clone()) >= EmergencyLevel::Restricted.as_u32() {
            return Ok(false);
        }
        let controller = Self::get_emergency_controller(env.clone())?;
        Ok(EmergencyControllerClient::new(&env, &controller).check_emergency_status(&selector))
    }

    pub fn get_emergency_controller(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&EMERGENCY_CONTROLLER)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_shutdown_level(env: Env) -> u32 {
        env.storage().instance().get(&SHUTDOWN_LEVEL).unwrap_or(0)
    }

    /// Lifts a pushed shutdown once the controller is back at `Normal`.
    pub fn clear_emergency_shutdown(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::default_admin_role(&env), &caller)?;

        let controller = Self::get_emergency_controller(env.clone())?;
        if EmergencyControllerClient::new(&env, &controller).get_emergency_level()
            != EmergencyLevel::Normal.as_u32()
        {
            return Err(ContractError::EmergencyActive);
        }
        env.storage().instance().remove(&SHUTDOWN_LEVEL);

        events::publish_shutdown_cleared(&env, caller);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn propose(
        env: Env,
        caller: Address,
        proxy: Address,
        implementation: Address,
        call: Vec<UpgradeCall>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, roles::upgrader_role(&env), &caller)?;
        Self::require_operational(&env, PROPOSE_SELECTOR)?;

        let key = (PROPOSAL, proxy.clone());
        if env.storage().persistent().has(&key) {
            return Err(ContractError::UpgradePropExists);
        }

        let proposal = UpgradeProposal {
            verified: valid_implementations(&env).contains(&implementation),
            implementation,
            proposed_at: env.ledger().timestamp(),
            proposer: caller,
            call,
        };
        env.storage().persistent().set(&key, &proposal);
        env.storage()
            .persistent()
            .extend_ttl(&key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);

        events::publish_upgrade_proposed(&env, proxy, &proposal);

        Ok(())
    }

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn has_role(env: &Env, role: BytesN<32>, account: &Address) -> Result<bool, ContractError> {
        let access_control: Address = env
            .storage()
            .instance()
            .get(&ACCESS_CONTROL)
            .ok_or(ContractError::NotInitialized)?;
        Ok(AccessControlClient::new(env, &access_control).has_role(&role, account))
    }

    fn require_role(env: &Env, role: BytesN<32>, caller: &Address) -> Result<(), ContractError> {
        if !Self::has_role(env, role, caller)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_operational(env: &Env, selector: Symbol) -> Result<(), ContractError> {
        if !Self::check_emergency_status(env.clone(), selector)? {
            return Err(ContractError::UpgradesSuspended);
        }
        Ok(())
    }
}

fn valid_implementations(env: &Env) -> AddressSet {
    AddressSet::new(env, roles::role_id(env, "VALID_IMPLEMENTATIONS"))
}

/// Plain accounts and addresses with nothing deployed behind them are
/// rejected.
fn is_deployed_contract(address: &Address) -> bool {
    matches!(
        address.executable(),
        Some(Executable::Wasm(_)) | Some(Executable::StellarAsset)
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
