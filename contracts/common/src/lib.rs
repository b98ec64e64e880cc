//! Shared building blocks for the protocol's authorization and emergency core.
//!
//! This crate provides:
//! - [`roles`] — role identifiers, including the all-zero default admin role.
//! - [`AddressSet`] — an enumerable, swap-and-pop address set in persistent storage.
//! - [`guard::non_reentrant`] — an explicit reentrancy lock for entry points
//!   that call out to other contracts.
//! - [`interfaces`] — cross-contract clients for the role registry, the
//!   emergency controller, emergency-aware dependents and managed proxies.
//! - [`ErrorCategory`] — the error taxonomy every contract error maps onto.
//!
//! Contract error enums reserve these code ranges:
//!
//! | Range   | Purpose                        |
//! |---------|--------------------------------|
//! | 1 – 9   | Lifecycle / initialisation     |
//! | 10 – 19 | Authentication & authorisation |
//! | 20 – 29 | Validation / input             |
//! | 30 – 49 | State conflict                 |
//! | 50 – 59 | Timing                         |
//! | 60 – 69 | External call failures         |

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod address_set;
pub mod errors;
pub mod guard;
pub mod interfaces;
pub mod roles;

pub use address_set::AddressSet;
pub use errors::ErrorCategory;
pub use interfaces::*;

use soroban_sdk::contracttype;

// ── Emergency levels ─────────────────────────────────────────────────────────

/// Four-point severity scale shared by the controller and its dependents.
///
/// Levels travel across contract boundaries as plain `u32` values so that
/// out-of-range inputs can be rejected with a proper error instead of a
/// conversion failure.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EmergencyLevel {
    Normal = 0,
    Alert = 1,
    Restricted = 2,
    Critical = 3,
}

impl EmergencyLevel {
    pub fn from_u32(level: u32) -> Option<Self> {
        match level {
            0 => Some(EmergencyLevel::Normal),
            1 => Some(EmergencyLevel::Alert),
            2 => Some(EmergencyLevel::Restricted),
            3 => Some(EmergencyLevel::Critical),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

// ── TTL ──────────────────────────────────────────────────────────────────────

pub const TTL_THRESHOLD: u32 = 5_184_000;
pub const TTL_EXTEND_TO: u32 = 10_368_000;
