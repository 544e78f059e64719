//! Ruling codes and the outbound dispute request.
//!
//! The arbitration oracle answers a dispute with a binary ruling. Wire
//! codes follow the oracle's convention: `1` favors the beneficiary,
//! `2` favors the creator. `0` (refused to rule) is not accepted by the
//! ruling router.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ClaimId, ClaimStatus};

/// The oracle's binary decision for a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ruling {
    /// The beneficiary wins: the claim passes.
    BeneficiaryFavors,
    /// The creator wins: the claim fails.
    CreatorFavors,
}

impl Ruling {
    /// Wire code: `1 = BeneficiaryFavors`, `2 = CreatorFavors`.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::BeneficiaryFavors => 1,
            Self::CreatorFavors => 2,
        }
    }

    /// Decode a wire code. Returns `None` for `0` and unknown codes.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::BeneficiaryFavors),
            2 => Some(Self::CreatorFavors),
            _ => None,
        }
    }

    /// The terminal claim status this ruling maps to.
    #[must_use]
    pub fn claim_status(self) -> ClaimStatus {
        match self {
            Self::BeneficiaryFavors => ClaimStatus::Passed,
            Self::CreatorFavors => ClaimStatus::Failed,
        }
    }
}

impl std::fmt::Display for Ruling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeneficiaryFavors => write!(f, "BENEFICIARY_FAVORS"),
            Self::CreatorFavors => write!(f, "CREATOR_FAVORS"),
        }
    }
}

/// Outbound message from the ledger to the arbitration adapter when an
/// ArbitrationBased claim is created. Once submitted it cannot be
/// withdrawn: the dispute is answered or stays pending forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulingRequest {
    /// The claim awaiting a ruling.
    pub claim_id: ClaimId,
    /// Evidence URI submitted with the dispute.
    pub evidence_uri: String,
    /// Arbitration fee forwarded from the safe's funds.
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruling_codes_roundtrip() {
        assert_eq!(Ruling::from_code(1), Some(Ruling::BeneficiaryFavors));
        assert_eq!(Ruling::from_code(2), Some(Ruling::CreatorFavors));
        assert_eq!(Ruling::from_code(0), None);
        assert_eq!(Ruling::from_code(3), None);
        assert_eq!(Ruling::BeneficiaryFavors.code(), 1);
        assert_eq!(Ruling::CreatorFavors.code(), 2);
    }

    #[test]
    fn ruling_maps_to_status() {
        assert_eq!(Ruling::BeneficiaryFavors.claim_status(), ClaimStatus::Passed);
        assert_eq!(Ruling::CreatorFavors.claim_status(), ClaimStatus::Failed);
    }

    #[test]
    fn request_fee_serializes_as_string() {
        let req = RulingRequest {
            claim_id: ClaimId::new(),
            evidence_uri: "ipfs://meta".to_string(),
            fee: Decimal::new(1, 3),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"fee\":\"0.001\""), "Got: {json}");
    }
}
