//! # Claim — the custody-release state machine
//!
//! A `Claim` is the beneficiary's request to trigger release of a safe's
//! custody. Its status forms a small monotonic state machine:
//!
//! ```text
//!   ┌────────┐  timeout / beneficiary-favors ruling   ┌────────┐
//!   │ ACTIVE ├───────────────────────────────────────▶│ PASSED │
//!   └───┬────┘                                        └────────┘
//!       │ liveness signal / creator-favors ruling
//!       ▼
//!   ┌────────┐
//!   │ FAILED │
//!   └────────┘
//! ```
//!
//! PASSED and FAILED are terminal. A PASSED claim entitles the beneficiary
//! to the safe's funds; a FAILED claim leaves custody with the creator and
//! frees the safe for a future claim.
//!
//! The claim's kind is a tagged variant carrying only the fields its
//! resolution strategy needs, so "claim type fixed at creation" is
//! structurally enforced.

use serde::{Deserialize, Serialize};

use crate::{AccountId, ClaimId, ClaimType, SafeId, UnixSeconds};

/// The lifecycle status of a claim.
///
/// Transitions are **monotonic** (never go backwards):
/// - `Active → Passed` (timeout elapsed, or the oracle ruled for the beneficiary)
/// - `Active → Failed` (the creator proved liveness, or the oracle ruled for them)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// The claim is unresolved.
    Active,
    /// The beneficiary won. Entitles them to withdraw the safe's funds.
    /// **Irreversible.**
    Passed,
    /// The creator won. Custody is unchanged and the claim slot is freed.
    /// **Irreversible.**
    Failed,
}

impl ClaimStatus {
    /// Wire code: `0 = Active`, `1 = Passed`, `2 = Failed`.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Passed => 1,
            Self::Failed => 2,
        }
    }

    /// Whether this status is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Passed | Self::Failed)
    }

    /// Can this status transition to the given target status?
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!((self, target), (Self::Active, Self::Passed | Self::Failed))
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Passed => write!(f, "PASSED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// The resolution strategy of a claim, with only the fields that
/// strategy needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimKind {
    /// Resolved by elapsed time since the creator's last liveness signal.
    SignalBased {
        /// Timeout deadline, snapshotted at claim creation as
        /// `created_at + signaling_period`.
        deadline: UnixSeconds,
    },
    /// Resolved by the external arbitration oracle.
    ArbitrationBased {
        /// Evidence URI submitted with the dispute.
        evidence_uri: String,
    },
}

impl ClaimKind {
    /// The claim type tag of this kind.
    #[must_use]
    pub fn claim_type(&self) -> ClaimType {
        match self {
            Self::SignalBased { .. } => ClaimType::SignalBased,
            Self::ArbitrationBased { .. } => ClaimType::ArbitrationBased,
        }
    }
}

/// A beneficiary's request to release a safe's custody.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Globally unique claim identifier.
    pub id: ClaimId,
    /// The safe this claim targets. Bound 1:1 at creation.
    pub safe_id: SafeId,
    /// The claimant. Equals the safe's beneficiary at creation.
    pub claimed_by: AccountId,
    /// Resolution strategy, inherited from the safe and fixed at creation.
    pub kind: ClaimKind,
    /// Stored status. For SignalBased claims the live status is derived
    /// on read by the resolver; this field only records an observed
    /// terminal outcome.
    pub status: ClaimStatus,
    /// When the claim was created.
    pub created_at: UnixSeconds,
}

impl Claim {
    /// Attempt to transition to a terminal status.
    ///
    /// # Errors
    /// Returns [`crate::SafeholdError::InvalidTransition`] if the current
    /// status is already terminal.
    pub fn mark(&mut self, target: ClaimStatus) -> crate::Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(crate::SafeholdError::InvalidTransition {
                reason: format!(
                    "cannot transition claim {} from {} to {target}",
                    self.id, self.status
                ),
            });
        }
        self.status = target;
        Ok(())
    }
}

/// Dummy claims for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Claim {
    /// Create a dummy SignalBased claim for unit tests.
    pub fn dummy_signal(created_at: UnixSeconds, deadline: UnixSeconds) -> Self {
        Self {
            id: ClaimId::new(),
            safe_id: SafeId::parse("dummy-safe").expect("static id is valid"),
            claimed_by: AccountId::random(),
            kind: ClaimKind::SignalBased { deadline },
            status: ClaimStatus::Active,
            created_at,
        }
    }

    /// Create a dummy ArbitrationBased claim for unit tests.
    pub fn dummy_arbitration(created_at: UnixSeconds) -> Self {
        Self {
            id: ClaimId::new(),
            safe_id: SafeId::parse("dummy-safe").expect("static id is valid"),
            claimed_by: AccountId::random(),
            kind: ClaimKind::ArbitrationBased {
                evidence_uri: "ipfs://evidence".to_string(),
            },
            status: ClaimStatus::Active,
            created_at,
        }
    }
}
