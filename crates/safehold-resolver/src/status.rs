//! Status derivation — the claim state machine, evaluated per claim kind.
//!
//! Transition rules:
//!
//! - **SignalBased**: a signal inside the qualifying window
//!   `[created_at, deadline]` resolves the claim **Failed** (the creator
//!   proved liveness after being claimed against). With no qualifying
//!   signal, `now >= deadline` resolves **Passed** (timeout elapsed,
//!   beneficiary wins). Otherwise the claim stays **Active**.
//! - **ArbitrationBased**: the stored status is authoritative; absent a
//!   ruling the claim stays Active indefinitely — there is no timeout
//!   fallback.
//!
//! The qualifying window is inclusive at the deadline second: a signal
//! landing in the exact instant the deadline elapses still wins. The
//! signal check runs before the timeout check, so the tie-break is
//! structural.

use safehold_types::{Claim, ClaimKind, ClaimStatus, UnixSeconds};

/// Whether a signal timestamp counts against the given claim window.
///
/// `latest_signal == 0` is the "never signalled" sentinel and never
/// qualifies.
#[must_use]
pub fn signal_qualifies(
    latest_signal: UnixSeconds,
    created_at: UnixSeconds,
    deadline: UnixSeconds,
) -> bool {
    latest_signal != 0 && latest_signal >= created_at && latest_signal <= deadline
}

/// Derive a claim's status from the signal state and the current chain time.
///
/// `latest_signal` is the safe's most recent liveness signal (0 = never);
/// `now` is the caller-supplied chain time in unix seconds. Read-only:
/// callers that want to persist an observed terminal status do so
/// themselves.
#[must_use]
pub fn resolve(claim: &Claim, latest_signal: UnixSeconds, now: UnixSeconds) -> ClaimStatus {
    // A stored terminal status always wins; status is monotonic.
    if claim.status.is_terminal() {
        return claim.status;
    }

    let status = match &claim.kind {
        ClaimKind::SignalBased { deadline } => {
            if signal_qualifies(latest_signal, claim.created_at, *deadline) {
                ClaimStatus::Failed
            } else if now >= *deadline {
                ClaimStatus::Passed
            } else {
                ClaimStatus::Active
            }
        }
        // Only an explicit ruling moves an arbitration claim; that ruling
        // is already reflected in the stored status checked above.
        ClaimKind::ArbitrationBased { .. } => claim.status,
    };

    tracing::debug!(
        claim = %claim.id,
        kind = %claim.kind.claim_type(),
        latest_signal,
        now,
        status = %status,
        "Claim status derived"
    );
    status
}
