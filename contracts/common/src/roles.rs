//! Role identifiers.
//!
//! Roles are 32-byte tags. The default admin role is the all-zero tag; every
//! other role is the SHA-256 digest of its name, so any contract in the suite
//! can derive the same identifier without sharing storage.

use soroban_sdk::{Bytes, BytesN, Env};

pub const EMERGENCY_ROLE_NAME: &str = "EMERGENCY_ROLE";
pub const PAUSER_ROLE_NAME: &str = "PAUSER_ROLE";
pub const UPGRADER_ROLE_NAME: &str = "UPGRADER_ROLE";

/// The root role. It administers every role whose admin was never changed,
/// including itself.
pub fn default_admin_role(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

/// Derives the identifier of a named role.
pub fn role_id(env: &Env, name: &str) -> BytesN<32> {
    env.crypto()
        .sha256(&Bytes::from_slice(env, name.as_bytes()))
        .to_bytes()
}

pub fn emergency_role(env: &Env) -> BytesN<32> {
    role_id(env, EMERGENCY_ROLE_NAME)
}

pub fn pauser_role(env: &Env) -> BytesN<32> {
    role_id(env, PAUSER_ROLE_NAME)
}

pub fn upgrader_role(env: &Env) -> BytesN<32> {
    role_id(env, UPGRADER_ROLE_NAME)
}

pub fn is_default_admin_role(env: &Env, role: &BytesN<32>) -> bool {
    *role == default_admin_role(env)
}
