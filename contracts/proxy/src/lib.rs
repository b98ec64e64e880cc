#![no_std]

//! Managed upgradeable proxy.
//!
//! Holds a pointer to the current implementation contract and routes calls
//! to it through [`forward`]. Only the configured admin, normally a
//! `ProxyAdmin` contract, may move the pointer or hand over the admin slot.
//!
//! [`upgrade_to_and_call`] swaps the pointer and then invokes a function on
//! the new implementation in the same frame. If that invocation fails the
//! whole frame is rolled back, so the pointer only moves when the call
//! succeeds.
//!
//! [`forward`]: ManagedProxyContract::forward
//! [`upgrade_to_and_call`]: ManagedProxyContract::upgrade_to_and_call

pub mod events;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Val, Vec};

const ADMIN: Symbol = symbol_short!("ADMIN");
const IMPLEMENTATION: Symbol = symbol_short!("IMPL");

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProxyError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAdmin = 10,
}

#[contract]
pub struct ManagedProxyContract;

#[contractimpl]
impl ManagedProxyContract {
    pub fn initialize(env: Env, admin: Address, implementation: Address) -> Result<(), ProxyError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(ProxyError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&IMPLEMENTATION, &implementation);

        events::publish_admin_changed(&env, None, admin);
        events::publish_upgraded(&env, None, implementation);

        Ok(())
    }

    pub fn implementation(env: Env) -> Result<Address, ProxyError> {
        env.storage()
            .instance()
            .get(&IMPLEMENTATION)
            .ok_or(ProxyError::NotInitialized)
    }

    pub fn admin(env: Env) -> Result<Address, ProxyError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ProxyError::NotInitialized)
    }

    pub fn change_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), ProxyError> {
        let previous = Self::require_admin(&env, &caller)?;
        env.storage().instance().set(&ADMIN, &new_admin);

        events::publish_admin_changed(&env, Some(previous), new_admin);

        Ok(())
    }

    pub fn upgrade_to(
        env: Env,
        caller: Address,
        implementation: Address,
    ) -> Result<(), ProxyError> {
        Self::require_admin(&env, &caller)?;
        Self::set_implementation(&env, implementation)?;
        Ok(())
    }

    /// Swaps the implementation, then calls `func(args)` on it and returns
    /// the result. A failing call aborts the whole upgrade.
    pub fn upgrade_to_and_call(
        env: Env,
        caller: Address,
        implementation: Address,
        func: Symbol,
        args: Vec<Val>,
    ) -> Result<Val, ProxyError> {
        Self::require_admin(&env, &caller)?;
        Self::set_implementation(&env, implementation.clone())?;
        Ok(env.invoke_contract::<Val>(&implementation, &func, args))
    }

    /// Routes `func(args)` to the current implementation.
    pub fn forward(env: Env, func: Symbol, args: Vec<Val>) -> Result<Val, ProxyError> {
        let target = Self::implementation(env.clone())?;
        Ok(env.invoke_contract::<Val>(&target, &func, args))
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<Address, ProxyError> {
        caller.require_auth();
        let admin = Self::admin(env.clone())?;
        if admin != *caller {
            return Err(ProxyError::NotAdmin);
        }
        Ok(admin)
    }

    fn set_implementation(env: &Env, implementation: Address) -> Result<(), ProxyError> {
        let previous = Self::implementation(env.clone())?;
        env.storage().instance().set(&IMPLEMENTATION, &implementation);
        events::publish_upgraded(env, Some(previous), implementation);
        Ok(())
    }
}

#[cfg(test)]
mod test;
