//! Reentrancy lock for entry points that hand control to another contract.

use soroban_sdk::{symbol_short, Env, Symbol};

const LOCKED: Symbol = symbol_short!("LOCKED");

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}

/// Runs `body` while holding the contract-wide lock.
///
/// A nested entry while the lock is held fails immediately with
/// `reentered`. The lock is released whether `body` succeeds or fails.
pub fn non_reentrant<T, E>(
    env: &Env,
    reentered: E,
    body: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    if is_locked(env) {
        return Err(reentered);
    }
    env.storage().instance().set(&LOCKED, &true);
    let result = body();
    env.storage().instance().remove(&LOCKED);
    result
}
