#![no_std]

//! Role-membership ledger.
//!
//! Every protocol module gates its privileged entry points on [`has_role`]
//! answers from this contract. Roles are 32-byte tags created implicitly on
//! first grant and never destroyed, only emptied. Each role has an admin
//! role (the default admin role unless changed) whose holders may grant and
//! revoke it.
//!
//! The default admin role can never lose its last holder, through either
//! `revoke_role` or `renounce_role`.
//!
//! Member enumeration uses swap-and-pop removal: the order returned by
//! [`get_role_member`] and [`get_role_members_paginated`] is **not** stable
//! across revocations and must not be read as grant order.
//!
//! [`has_role`]: AccessControlContract::has_role
//! [`get_role_member`]: AccessControlContract::get_role_member
//! [`get_role_members_paginated`]: AccessControlContract::get_role_members_paginated

pub mod events;

use common::{roles, AddressSet, ErrorCategory};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, BytesN, Env, Symbol, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
// Persistent: (ROLE_ADMIN, role) -> admin role
const ROLE_ADMIN: Symbol = symbol_short!("ROLE_ADM");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    SenderMissingAdminRole = 10,
    InvalidAmount = 20,
    IndexOutOfBounds = 21,
    CannotRemoveLastAdmin = 30,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidAmount | ContractError::IndexOutOfBounds => {
                ErrorCategory::Validation
            }
            ContractError::SenderMissingAdminRole => ErrorCategory::Authorization,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::CannotRemoveLastAdmin => ErrorCategory::StateConflict,
        }
    }

    pub fn retryable(&self) -> bool {
        self.category().retryable()
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// One page of a role's members together with the role's total size.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberPage {
    pub members: Vec<Address>,
    pub total: u32,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct AccessControlContract;

#[contractimpl]
impl AccessControlContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the registry with `admin` as the first default-admin holder.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);

        let default_admin = roles::default_admin_role(&env);
        role_members(&env, &default_admin).add(&admin);

        events::publish_initialized(&env, admin.clone());
        events::publish_role_granted(&env, default_admin, admin.clone(), admin);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn has_role(env: Env, role: BytesN<32>, account: Address) -> bool {
        role_members(&env, &role).contains(&account)
    }

    /// Returns the role allowed to grant and revoke `role`.
    pub fn get_role_admin(env: Env, role: BytesN<32>) -> BytesN<32> {
        env.storage()
            .persistent()
            .get(&(ROLE_ADMIN, role))
            .unwrap_or(roles::default_admin_role(&env))
    }

    pub fn get_role_member_count(env: Env, role: BytesN<32>) -> u32 {
        role_members(&env, &role).len()
    }

    /// Returns the member stored at `index`. See the module docs on ordering.
    pub fn get_role_member(
        env: Env,
        role: BytesN<32>,
        index: u32,
    ) -> Result<Address, ContractError> {
        role_members(&env, &role)
            .at(index)
            .ok_or(ContractError::IndexOutOfBounds)
    }

    /// Returns up to `limit` members starting at `offset`.
    ///
    /// Fails with `InvalidAmount` on a zero `limit`; an `offset` at or past
    /// the end yields an empty page with the correct `total`.
    pub fn get_role_members_paginated(
        env: Env,
        role: BytesN<32>,
        offset: u32,
        limit: u32,
    ) -> Result<MemberPage, ContractError> {
        if limit == 0 {
            return Err(ContractError::InvalidAmount);
        }
        let members = role_members(&env, &role);
        Ok(MemberPage {
            members: members.page(offset, limit),
            total: members.len(),
        })
    }

    // ── Mutations ───────────────────────────────────────────────────────────

    /// Grants `role` to `account`. A no-op, without an event, if the account
    /// already holds it.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: BytesN<32>,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role_admin(&env, &role, &caller)?;

        if !role_members(&env, &role).add(&account) {
            return Ok(());
        }

        events::publish_role_granted(&env, role, account, caller);

        Ok(())
    }

    /// Revokes `role` from `account`. A no-op if the account does not hold it.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: BytesN<32>,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role_admin(&env, &role, &caller)?;

        Self::remove_member(&env, role, account, caller)
    }

    /// Drops the caller's own membership of `role`.
    pub fn renounce_role(env: Env, caller: Address, role: BytesN<32>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        Self::remove_member(&env, role, caller.clone(), caller)
    }

    /// Changes the admin role of `role`. Only default-admin holders may
    /// rewire the admin mapping, whatever the current admin of `role` is.
    pub fn set_role_admin(
        env: Env,
        caller: Address,
        role: BytesN<32>,
        new_admin_role: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !Self::has_role(env.clone(), roles::default_admin_role(&env), caller) {
            return Err(ContractError::SenderMissingAdminRole);
        }

        let previous = Self::get_role_admin(env.clone(), role.clone());
        let key = (ROLE_ADMIN, role.clone());
        env.storage().persistent().set(&key, &new_admin_role);
        env.storage()
            .persistent()
            .extend_ttl(&key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);

        events::publish_role_admin_changed(&env, role, previous, new_admin_role);

        Ok(())
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_role_admin(
        env: &Env,
        role: &BytesN<32>,
        caller: &Address,
    ) -> Result<(), ContractError> {
        let admin_role = Self::get_role_admin(env.clone(), role.clone());
        if !Self::has_role(env.clone(), admin_role, caller.clone()) {
            return Err(ContractError::SenderMissingAdminRole);
        }
        Ok(())
    }

    fn remove_member(
        env: &Env,
        role: BytesN<32>,
        account: Address,
        sender: Address,
    ) -> Result<(), ContractError> {
        let members = role_members(env, &role);
        if !members.contains(&account) {
            return Ok(());
        }
        if roles::is_default_admin_role(env, &role) && members.len() == 1 {
            return Err(ContractError::CannotRemoveLastAdmin);
        }

        members.remove(&account);

        events::publish_role_revoked(env, role, account, sender);

        Ok(())
    }
}

fn role_members(env: &Env, role: &BytesN<32>) -> AddressSet {
    AddressSet::new(env, role.clone())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
