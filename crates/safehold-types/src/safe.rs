//! The Safe record — a custody pairing of creator, beneficiary, and funds.
//!
//! A safe holds deposited funds and the claim policy under which those
//! funds (and the off-chain secret the safe id points at) are released.
//! Safes are never deleted: zero funds is the natural custody-terminal
//! state, identity persists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, SafeId, UnixSeconds};

/// How a claim against a safe is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    /// Resolved by elapsed time since the creator's last liveness signal.
    SignalBased,
    /// Resolved by an external arbitration oracle's ruling.
    ArbitrationBased,
}

impl ClaimType {
    /// Wire code: `0 = SignalBased`, `1 = ArbitrationBased`.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::SignalBased => 0,
            Self::ArbitrationBased => 1,
        }
    }

    /// Decode a wire code. Returns `None` for unknown codes.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::SignalBased),
            1 => Some(Self::ArbitrationBased),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClaimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignalBased => write!(f, "SIGNAL_BASED"),
            Self::ArbitrationBased => write!(f, "ARBITRATION_BASED"),
        }
    }
}

/// A custody record: creator, beneficiary, funds, and release policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Safe {
    /// Externally supplied identifier (points at the off-chain record).
    pub id: SafeId,
    /// The account that owns the safe's custody by default.
    pub created_by: AccountId,
    /// The account entitled to claim. Never equals `created_by`.
    pub beneficiary: AccountId,
    /// Release policy, fixed at creation.
    pub claim_type: ClaimType,
    /// Signaling window in seconds. Meaningful only for SignalBased safes.
    pub signaling_period: u64,
    /// Deadline of the current signaling window. 0 = never signalled.
    /// Recomputed to `now + signaling_period` on every signal.
    pub end_signal_time: UnixSeconds,
    /// The creator's most recent liveness signal. 0 = never signalled.
    pub latest_signal_time: UnixSeconds,
    /// Deposited funds, in the ledger's base currency. Never negative.
    #[serde(with = "rust_decimal::serde::str")]
    pub funds: Decimal,
    /// Historical total of claims created against this safe.
    pub claims_count: u64,
    /// Meta-evidence URI. Populated only for ArbitrationBased safes.
    pub metaevidence_uri: String,
    /// When the safe was created.
    pub created_at: UnixSeconds,
}

impl Safe {
    /// Whether the safe record is the "does not exist" sentinel
    /// (zero-valued record returned by lookups on absent ids).
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.created_by.is_zero() && self.beneficiary.is_zero()
    }

    /// Zero-valued sentinel record for an absent safe id.
    #[must_use]
    pub fn sentinel(id: SafeId) -> Self {
        Self {
            id,
            created_by: AccountId::ZERO,
            beneficiary: AccountId::ZERO,
            claim_type: ClaimType::SignalBased,
            signaling_period: 0,
            end_signal_time: 0,
            latest_signal_time: 0,
            funds: Decimal::ZERO,
            claims_count: 0,
            metaevidence_uri: String::new(),
            created_at: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_type_codes_roundtrip() {
        assert_eq!(ClaimType::from_code(0), Some(ClaimType::SignalBased));
        assert_eq!(ClaimType::from_code(1), Some(ClaimType::ArbitrationBased));
        assert_eq!(ClaimType::from_code(2), None);
        assert_eq!(ClaimType::SignalBased.code(), 0);
        assert_eq!(ClaimType::ArbitrationBased.code(), 1);
    }

    #[test]
    fn claim_type_display() {
        assert_eq!(format!("{}", ClaimType::SignalBased), "SIGNAL_BASED");
        assert_eq!(
            format!("{}", ClaimType::ArbitrationBased),
            "ARBITRATION_BASED"
        );
    }

    #[test]
    fn sentinel_is_zero_valued() {
        let safe = Safe::sentinel(SafeId::parse("ghost").unwrap());
        assert!(safe.is_sentinel());
        assert_eq!(safe.funds, Decimal::ZERO);
        assert_eq!(safe.end_signal_time, 0);
        assert_eq!(safe.latest_signal_time, 0);
        assert_eq!(safe.claims_count, 0);
    }

    #[test]
    fn funds_serialize_as_decimal_string() {
        let mut safe = Safe::sentinel(SafeId::parse("s").unwrap());
        safe.funds = Decimal::new(11, 3); // 0.011
        let json = serde_json::to_string(&safe).unwrap();
        assert!(json.contains("\"funds\":\"0.011\""), "Got: {json}");
        let back: Safe = serde_json::from_str(&json).unwrap();
        assert_eq!(back.funds, safe.funds);
    }
}
