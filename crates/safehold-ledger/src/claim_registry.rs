//! Claim registry — claim records and the one-active-claim-per-safe slot.
//!
//! `create_claim` mutates both registries the way an escrow mint touches
//! the balance table: the safe's claims-count and (for arbitration) fee
//! deduction happen in the same all-or-nothing operation that stores the
//! claim. Validation runs fully before the first write.

use std::collections::HashMap;

use rust_decimal::Decimal;
use safehold_types::{
    AccountId, Claim, ClaimId, ClaimKind, ClaimStatus, ClaimType, Result, Ruling, RulingRequest,
    SafeId, SafeholdError, UnixSeconds, constants,
};

use crate::safe_registry::SafeRegistry;

/// Claim table plus the per-safe active-claim slot.
pub struct ClaimRegistry {
    /// All claims indexed by their id.
    claims: HashMap<ClaimId, Claim>,
    /// The unresolved (or Passed-and-unwithdrawn) claim per safe.
    active: HashMap<SafeId, ClaimId>,
    /// Historical total of claims created.
    total_created: u64,
}

impl ClaimRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            claims: HashMap::new(),
            active: HashMap::new(),
            total_created: 0,
        }
    }

    /// Create a claim against a safe on behalf of its beneficiary.
    ///
    /// If the safe's slot holds an earlier claim, that claim is first
    /// re-resolved at `now`: a Failed outcome is persisted and frees the
    /// slot; anything else is a conflict. For ArbitrationBased safes the
    /// arbitration `fee` is deducted from the safe's funds and returned
    /// as an outbound [`RulingRequest`].
    ///
    /// # Errors
    /// - [`SafeholdError::SafeNotFound`] if the safe does not exist
    /// - [`SafeholdError::InvalidParty`] unless caller == beneficiary
    /// - [`SafeholdError::InvalidUri`] for an oversized evidence URI
    /// - [`SafeholdError::ConflictingClaim`] while an unresolved claim exists
    /// - [`SafeholdError::InsufficientFunds`] if the safe cannot cover the fee
    pub fn create_claim(
        &mut self,
        safes: &mut SafeRegistry,
        safe_id: &SafeId,
        caller: AccountId,
        evidence_uri: String,
        fee: Decimal,
        now: UnixSeconds,
    ) -> Result<(ClaimId, Option<RulingRequest>)> {
        let safe = safes
            .get(safe_id)
            .ok_or_else(|| SafeholdError::SafeNotFound(safe_id.clone()))?;
        if caller != safe.beneficiary {
            return Err(SafeholdError::InvalidParty {
                reason: format!("only the beneficiary may claim, got {caller}"),
            });
        }
        if evidence_uri.len() > constants::MAX_URI_LEN {
            return Err(SafeholdError::InvalidUri {
                reason: format!(
                    "evidence URI is {} bytes, limit is {}",
                    evidence_uri.len(),
                    constants::MAX_URI_LEN
                ),
            });
        }

        let claim_type = safe.claim_type;
        let signaling_period = safe.signaling_period;

        // Arbitration fee must be covered by the safe's deposited funds
        // before anything mutates.
        if claim_type == ClaimType::ArbitrationBased && safe.funds < fee {
            return Err(SafeholdError::InsufficientFunds {
                needed: fee,
                available: safe.funds,
            });
        }

        // Settle the slot: an earlier Failed claim frees the safe, an
        // Active or Passed one blocks a new claim.
        if let Some(prior_id) = self.active.get(safe_id).copied() {
            let latest_signal = safe.latest_signal_time;
            let prior = self
                .claims
                .get_mut(&prior_id)
                .ok_or(SafeholdError::ClaimNotFound(prior_id))?;
            let status = safehold_resolver::resolve(prior, latest_signal, now);
            match status {
                ClaimStatus::Failed => {
                    if !prior.status.is_terminal() {
                        prior.mark(ClaimStatus::Failed)?;
                    }
                    self.active.remove(safe_id);
                }
                ClaimStatus::Active | ClaimStatus::Passed => {
                    return Err(SafeholdError::ConflictingClaim {
                        safe_id: safe_id.clone(),
                        claim_id: prior_id,
                    });
                }
            }
        }

        let safe = safes
            .get_mut(safe_id)
            .ok_or_else(|| SafeholdError::SafeNotFound(safe_id.clone()))?;
        let claim_id = ClaimId::derive(safe_id, safe.claims_count);
        let (kind, request) = match claim_type {
            ClaimType::SignalBased => (
                ClaimKind::SignalBased {
                    deadline: now + signaling_period,
                },
                None,
            ),
            ClaimType::ArbitrationBased => {
                safe.funds -= fee;
                (
                    ClaimKind::ArbitrationBased {
                        evidence_uri: evidence_uri.clone(),
                    },
                    Some(RulingRequest {
                        claim_id,
                        evidence_uri,
                        fee,
                    }),
                )
            }
        };
        safe.claims_count += 1;

        let claim = Claim {
            id: claim_id,
            safe_id: safe_id.clone(),
            claimed_by: caller,
            kind,
            status: ClaimStatus::Active,
            created_at: now,
        };
        self.claims.insert(claim_id, claim);
        self.active.insert(safe_id.clone(), claim_id);
        self.total_created += 1;

        Ok((claim_id, request))
    }

    /// Apply the oracle's ruling to an ArbitrationBased claim.
    ///
    /// Idempotent by construction: a second ruling finds a terminal claim
    /// and is rejected. A creator-favors ruling frees the safe's slot.
    ///
    /// # Errors
    /// - [`SafeholdError::ClaimNotFound`] if the claim does not exist
    /// - [`SafeholdError::InvalidTransition`] for SignalBased claims or an
    ///   already-terminal claim
    pub fn apply_ruling(&mut self, claim_id: ClaimId, ruling: Ruling) -> Result<ClaimStatus> {
        let claim = self
            .claims
            .get_mut(&claim_id)
            .ok_or(SafeholdError::ClaimNotFound(claim_id))?;
        if claim.kind.claim_type() != ClaimType::ArbitrationBased {
            return Err(SafeholdError::InvalidTransition {
                reason: format!("claim {claim_id} is signal-based; rulings do not apply"),
            });
        }
        let target = ruling.claim_status();
        claim.mark(target)?;
        if target == ClaimStatus::Failed {
            self.active.remove(&claim.safe_id);
        }
        Ok(target)
    }

    /// Persist an observed terminal status on a SignalBased claim and, on
    /// Failed, free the safe's slot. No-op for still-Active claims.
    pub(crate) fn settle(
        &mut self,
        claim_id: ClaimId,
        latest_signal: UnixSeconds,
        now: UnixSeconds,
    ) -> Result<ClaimStatus> {
        let claim = self
            .claims
            .get_mut(&claim_id)
            .ok_or(SafeholdError::ClaimNotFound(claim_id))?;
        let status = safehold_resolver::resolve(claim, latest_signal, now);
        if status.is_terminal() && !claim.status.is_terminal() {
            claim.mark(status)?;
        }
        if status == ClaimStatus::Failed {
            let safe_id = claim.safe_id.clone();
            self.active.remove(&safe_id);
        }
        Ok(status)
    }

    /// Look up a claim by id.
    #[must_use]
    pub fn get(&self, claim_id: &ClaimId) -> Option<&Claim> {
        self.claims.get(claim_id)
    }

    /// The safe's current claim, if any.
    #[must_use]
    pub fn active_claim(&self, safe_id: &SafeId) -> Option<ClaimId> {
        self.active.get(safe_id).copied()
    }

    /// Historical total of claims created.
    #[must_use]
    pub fn total_claims(&self) -> u64 {
        self.total_created
    }
}

impl Default for ClaimRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safehold_types::ClaimType;

    const T0: UnixSeconds = 1_000;
    const FEE: Decimal = Decimal::ZERO;

    fn setup_signal_safe() -> (SafeRegistry, ClaimRegistry, SafeId, AccountId, AccountId) {
        let mut safes = SafeRegistry::new();
        let creator = AccountId([1u8; 20]);
        let beneficiary = AccountId([2u8; 20]);
        let id = SafeId::parse("s1").unwrap();
        safes
            .create(
                creator,
                beneficiary,
                id.clone(),
                ClaimType::SignalBased,
                6,
                String::new(),
                Decimal::ZERO,
                T0,
            )
            .unwrap();
        (safes, ClaimRegistry::new(), id, creator, beneficiary)
    }

    fn setup_arbitration_safe(
        funds: Decimal,
    ) -> (SafeRegistry, ClaimRegistry, SafeId, AccountId, AccountId) {
        let mut safes = SafeRegistry::new();
        let creator = AccountId([1u8; 20]);
        let beneficiary = AccountId([2u8; 20]);
        let id = SafeId::parse("a1").unwrap();
        safes
            .create(
                creator,
                beneficiary,
                id.clone(),
                ClaimType::ArbitrationBased,
                0,
                "ipfs://meta".to_string(),
                funds,
                T0,
            )
            .unwrap();
        (safes, ClaimRegistry::new(), id, creator, beneficiary)
    }

    #[test]
    fn oversized_evidence_uri_rejected() {
        let (mut safes, mut claims, id, _, beneficiary) = setup_signal_safe();
        let err = claims
            .create_claim(
                &mut safes,
                &id,
                beneficiary,
                "x".repeat(constants::MAX_URI_LEN + 1),
                FEE,
                T0 + 1,
            )
            .unwrap_err();
        assert!(matches!(err, SafeholdError::InvalidUri { .. }));
        assert_eq!(claims.total_claims(), 0);
        assert!(claims.active_claim(&id).is_none());
    }

    #[test]
    fn create_claim_signal_based() {
        let (mut safes, mut claims, id, _, beneficiary) = setup_signal_safe();
        let (claim_id, request) = claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 10)
            .unwrap();
        assert!(request.is_none());

        let claim = claims.get(&claim_id).unwrap();
        assert_eq!(claim.claimed_by, beneficiary);
        assert_eq!(claim.status, ClaimStatus::Active);
        assert_eq!(
            claim.kind,
            ClaimKind::SignalBased {
                deadline: T0 + 10 + 6
            }
        );
        assert_eq!(claims.total_claims(), 1);
        assert_eq!(safes.get(&id).unwrap().claims_count, 1);
    }

    #[test]
    fn create_claim_requires_beneficiary() {
        let (mut safes, mut claims, id, creator, _) = setup_signal_safe();
        let err = claims
            .create_claim(&mut safes, &id, creator, String::new(), FEE, T0 + 10)
            .unwrap_err();
        assert!(matches!(err, SafeholdError::InvalidParty { .. }));
        assert_eq!(claims.total_claims(), 0);
    }

    #[test]
    fn create_claim_missing_safe_fails() {
        let (mut safes, mut claims, _, _, beneficiary) = setup_signal_safe();
        let ghost = SafeId::parse("ghost").unwrap();
        let err = claims
            .create_claim(&mut safes, &ghost, beneficiary, String::new(), FEE, T0)
            .unwrap_err();
        assert!(matches!(err, SafeholdError::SafeNotFound(_)));
    }

    #[test]
    fn second_claim_conflicts_while_active() {
        let (mut safes, mut claims, id, _, beneficiary) = setup_signal_safe();
        claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 10)
            .unwrap();
        let err = claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 11)
            .unwrap_err();
        assert!(matches!(err, SafeholdError::ConflictingClaim { .. }));
        assert_eq!(claims.total_claims(), 1);
    }

    #[test]
    fn failed_claim_frees_slot_for_new_claim() {
        let (mut safes, mut claims, id, creator, beneficiary) = setup_signal_safe();
        claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 10)
            .unwrap();
        // Creator proves liveness inside the window: the claim fails.
        safes.record_signal(&id, creator, T0 + 12).unwrap();

        let (second_id, _) = claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 20)
            .unwrap();
        assert_eq!(claims.total_claims(), 2);
        assert_eq!(claims.active_claim(&id), Some(second_id));
        assert_eq!(safes.get(&id).unwrap().claims_count, 2);
    }

    #[test]
    fn passed_claim_still_blocks_new_claims() {
        let (mut safes, mut claims, id, _, beneficiary) = setup_signal_safe();
        claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 10)
            .unwrap();
        // Past the deadline with no signal: the claim passed.
        let err = claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 100)
            .unwrap_err();
        assert!(matches!(err, SafeholdError::ConflictingClaim { .. }));
    }

    #[test]
    fn arbitration_claim_emits_request_and_deducts_fee() {
        let fee = Decimal::new(1, 3);
        let (mut safes, mut claims, id, _, beneficiary) =
            setup_arbitration_safe(Decimal::new(11, 3));
        let (claim_id, request) = claims
            .create_claim(
                &mut safes,
                &id,
                beneficiary,
                "ipfs://evidence".to_string(),
                fee,
                T0 + 10,
            )
            .unwrap();

        let request = request.expect("arbitration claim must emit a ruling request");
        assert_eq!(request.claim_id, claim_id);
        assert_eq!(request.fee, fee);
        assert_eq!(request.evidence_uri, "ipfs://evidence");
        // 0.011 - 0.001 = 0.010 remains in custody.
        assert_eq!(safes.get(&id).unwrap().funds, Decimal::new(10, 3));
    }

    #[test]
    fn arbitration_claim_fails_when_fee_uncovered() {
        let fee = Decimal::new(1, 3);
        let (mut safes, mut claims, id, _, beneficiary) = setup_arbitration_safe(Decimal::ZERO);
        let err = claims
            .create_claim(
                &mut safes,
                &id,
                beneficiary,
                "ipfs://evidence".to_string(),
                fee,
                T0 + 10,
            )
            .unwrap_err();
        assert!(matches!(err, SafeholdError::InsufficientFunds { .. }));
        assert_eq!(claims.total_claims(), 0);
        assert_eq!(safes.get(&id).unwrap().claims_count, 0);
    }

    #[test]
    fn ruling_resolves_arbitration_claim() {
        let (mut safes, mut claims, id, _, beneficiary) =
            setup_arbitration_safe(Decimal::new(11, 3));
        let (claim_id, _) = claims
            .create_claim(
                &mut safes,
                &id,
                beneficiary,
                "ipfs://evidence".to_string(),
                Decimal::new(1, 3),
                T0 + 10,
            )
            .unwrap();

        let status = claims
            .apply_ruling(claim_id, Ruling::BeneficiaryFavors)
            .unwrap();
        assert_eq!(status, ClaimStatus::Passed);
        assert_eq!(claims.get(&claim_id).unwrap().status, ClaimStatus::Passed);

        // Second ruling is rejected: the claim is terminal.
        let err = claims
            .apply_ruling(claim_id, Ruling::CreatorFavors)
            .unwrap_err();
        assert!(matches!(err, SafeholdError::InvalidTransition { .. }));
    }

    #[test]
    fn creator_favors_ruling_frees_slot() {
        let (mut safes, mut claims, id, _, beneficiary) =
            setup_arbitration_safe(Decimal::new(11, 3));
        let (claim_id, _) = claims
            .create_claim(
                &mut safes,
                &id,
                beneficiary,
                "ipfs://evidence".to_string(),
                Decimal::new(1, 3),
                T0 + 10,
            )
            .unwrap();

        claims.apply_ruling(claim_id, Ruling::CreatorFavors).unwrap();
        assert_eq!(claims.active_claim(&id), None);
    }

    #[test]
    fn ruling_on_signal_claim_rejected() {
        let (mut safes, mut claims, id, _, beneficiary) = setup_signal_safe();
        let (claim_id, _) = claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 10)
            .unwrap();
        let err = claims
            .apply_ruling(claim_id, Ruling::BeneficiaryFavors)
            .unwrap_err();
        assert!(matches!(err, SafeholdError::InvalidTransition { .. }));
    }

    #[test]
    fn ruling_on_missing_claim_rejected() {
        let mut claims = ClaimRegistry::new();
        let err = claims
            .apply_ruling(ClaimId::new(), Ruling::BeneficiaryFavors)
            .unwrap_err();
        assert!(matches!(err, SafeholdError::ClaimNotFound(_)));
    }

    #[test]
    fn claim_ids_are_deterministic_per_sequence() {
        let (mut safes, mut claims, id, creator, beneficiary) = setup_signal_safe();
        let (first, _) = claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 10)
            .unwrap();
        assert_eq!(first, ClaimId::derive(&id, 0));

        safes.record_signal(&id, creator, T0 + 12).unwrap();
        let (second, _) = claims
            .create_claim(&mut safes, &id, beneficiary, String::new(), FEE, T0 + 20)
            .unwrap();
        assert_eq!(second, ClaimId::derive(&id, 1));
        assert_ne!(first, second);
    }
}
