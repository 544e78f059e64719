//! Chain-time representation.
//!
//! The vault never reads a wall clock: every time-sensitive operation takes
//! an explicit `now` in unix seconds, supplied by the caller (the ledger
//! that serializes transactions is the time authority). Second-level
//! granularity matches the resolution of the signaling tie-break.

/// Unix timestamp in whole seconds. `0` is the "never" sentinel.
pub type UnixSeconds = u64;

/// Current wall-clock time in unix seconds, for callers that are their
/// own time authority (tests, local tooling).
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn now_unix() -> UnixSeconds {
    chrono::Utc::now().timestamp().max(0) as UnixSeconds
}
