use soroban_sdk::contracttype;

/// Classification of every rejection the core can produce.
///
/// All categories are synchronous rejections of the whole operation; only
/// [`ErrorCategory::ExternalCall`] is worth retrying, because the
/// idempotence guards are keyed on success rather than on attempts.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed input: out-of-range level, index, limit, duration or amount.
    Validation = 1,
    /// Missing role, not the proposer, not the configured controller.
    Authorization = 2,
    /// The request conflicts with existing state (already initialised,
    /// proposal exists, already processed, already paused, ...).
    StateConflict = 3,
    /// A timelock has not elapsed yet.
    Timing = 4,
    /// A call into another contract failed and nothing was committed.
    ExternalCall = 5,
}

impl ErrorCategory {
    pub fn retryable(&self) -> bool {
        matches!(self, ErrorCategory::ExternalCall)
    }
}
