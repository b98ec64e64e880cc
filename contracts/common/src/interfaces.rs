//! Cross-contract interfaces.
//!
//! Each trait only declares the subset of a contract's surface that other
//! contracts call; the generated clients are what consumers hold.

use soroban_sdk::{contractclient, Address, BytesN, Env, Symbol, Val, Vec};

/// Authorization queries answered by the role registry.
#[contractclient(name = "AccessControlClient")]
pub trait AccessControlInterface {
    fn has_role(env: Env, role: BytesN<32>, account: Address) -> bool;
    fn get_role_admin(env: Env, role: BytesN<32>) -> BytesN<32>;
}

/// Pull-style emergency queries every protocol module can make.
#[contractclient(name = "EmergencyControllerClient")]
pub trait EmergencyControllerInterface {
    fn get_emergency_level(env: Env) -> u32;
    fn is_emergency_paused(env: Env) -> bool;
    fn is_function_restricted(env: Env, selector: Symbol) -> bool;
    fn check_emergency_status(env: Env, selector: Symbol) -> bool;
}

/// Capability a dependent exposes so the controller can push shutdown
/// notifications to it.
#[contractclient(name = "EmergencyAwareClient")]
pub trait EmergencyAware {
    /// Returns `true` if `selector` may currently run on the dependent.
    fn check_emergency_status(env: Env, selector: Symbol) -> bool;
    /// Applies the dependent's shutdown behaviour for `level`. Returning
    /// `false` is treated the same as failing.
    fn emergency_shutdown(env: Env, level: u32) -> bool;
    fn get_emergency_controller(env: Env) -> Address;
}

/// Administrative surface of a managed upgradeable proxy.
#[contractclient(name = "ProxyClient")]
pub trait ProxyInterface {
    fn implementation(env: Env) -> Address;
    fn admin(env: Env) -> Address;
    fn change_admin(env: Env, caller: Address, new_admin: Address);
    fn upgrade_to(env: Env, caller: Address, implementation: Address);
    fn upgrade_to_and_call(
        env: Env,
        caller: Address,
        implementation: Address,
        func: Symbol,
        args: Vec<Val>,
    ) -> Val;
}
