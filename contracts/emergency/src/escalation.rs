//! Bookkeeping for the multi-party path into the Critical level.
//!
//! Approvals are collected per *round*. Clearing them never walks the
//! approver set: the round counter is advanced instead, so markers written
//! under an older round are simply never read again.

use common::AddressSet;
use soroban_sdk::{symbol_short, BytesN, Env, Symbol};

const ROUND: Symbol = symbol_short!("L3_ROUND");
const IN_PROGRESS: Symbol = symbol_short!("L3_PEND");
const UNLOCK_AT: Symbol = symbol_short!("L3_UNLCK");

pub fn current_round(env: &Env) -> u64 {
    env.storage().instance().get(&ROUND).unwrap_or(0)
}

fn round_scope(env: &Env, round: u64) -> BytesN<32> {
    let mut raw = [0u8; 32];
    raw[..8].copy_from_slice(b"L3_APPRV");
    raw[24..].copy_from_slice(&round.to_be_bytes());
    BytesN::from_array(env, &raw)
}

/// Approver set of the current round.
pub fn approvals(env: &Env) -> AddressSet {
    AddressSet::new(env, round_scope(env, current_round(env)))
}

pub fn is_in_progress(env: &Env) -> bool {
    env.storage().instance().get(&IN_PROGRESS).unwrap_or(false)
}

pub fn unlock_time(env: &Env) -> u64 {
    env.storage().instance().get(&UNLOCK_AT).unwrap_or(0)
}

/// Flags the escalation as in progress and returns its unlock time.
pub fn start_timelock(env: &Env, delay: u64) -> u64 {
    let unlock_at = env.ledger().timestamp().saturating_add(delay);
    env.storage().instance().set(&IN_PROGRESS, &true);
    env.storage().instance().set(&UNLOCK_AT, &unlock_at);
    unlock_at
}

/// Drops every approval and the in-progress flag.
pub fn reset(env: &Env) {
    let next = current_round(env).saturating_add(1);
    env.storage().instance().set(&ROUND, &next);
    env.storage().instance().remove(&IN_PROGRESS);
    env.storage().instance().remove(&UNLOCK_AT);
}
