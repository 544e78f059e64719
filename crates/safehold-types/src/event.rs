//! Ledger events — the record every mutating operation returns.
//!
//! Events are the audit trail of the vault. Callers may forward them to
//! any transport; their position in a transport batch is an external
//! detail, never part of the state-machine contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, ClaimId, ClaimStatus, Ruling, SafeId, UnixSeconds};

/// An event emitted by a successful vault operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    /// A safe was created (by its creator, or proxy-created via sync).
    SafeCreated { safe_id: SafeId },
    /// Funds were deposited into a safe.
    FundsDeposited {
        safe_id: SafeId,
        #[serde(with = "rust_decimal::serde::str")]
        amount: Decimal,
    },
    /// A safe's full balance was withdrawn.
    FundsWithdrawn {
        safe_id: SafeId,
        to: AccountId,
        #[serde(with = "rust_decimal::serde::str")]
        amount: Decimal,
    },
    /// The creator sent a liveness signal.
    SignalSent { safe_id: SafeId, at: UnixSeconds },
    /// A claim was created against a safe.
    ClaimCreated {
        safe_id: SafeId,
        claim_id: ClaimId,
        claimed_by: AccountId,
    },
    /// The arbitration oracle's ruling was applied to a claim.
    RulingApplied {
        claim_id: ClaimId,
        ruling: Ruling,
        status: ClaimStatus,
    },
}

impl VaultEvent {
    /// Stable tag name for logs and transports.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SafeCreated { .. } => "SAFE_CREATED",
            Self::FundsDeposited { .. } => "FUNDS_DEPOSITED",
            Self::FundsWithdrawn { .. } => "FUNDS_WITHDRAWN",
            Self::SignalSent { .. } => "SIGNAL_SENT",
            Self::ClaimCreated { .. } => "CLAIM_CREATED",
            Self::RulingApplied { .. } => "RULING_APPLIED",
        }
    }
}

impl std::fmt::Display for VaultEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
