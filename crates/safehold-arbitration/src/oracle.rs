//! The arbitration oracle seam and its in-process implementation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use safehold_types::{ClaimId, DisputeId, Result, Ruling, SafeholdError};

/// The external decision maker for ArbitrationBased claims.
///
/// Implementations are expected to answer each dispute at most once;
/// the claim state machine rejects a second ruling regardless.
pub trait ArbitrationOracle {
    /// The fee the oracle charges per dispute.
    fn arbitration_cost(&self) -> Decimal;

    /// Open a dispute for a claim.
    ///
    /// # Errors
    /// [`SafeholdError::InsufficientFunds`] if `fee` is below the quoted
    /// arbitration cost.
    fn create_dispute(
        &mut self,
        claim_id: ClaimId,
        evidence_uri: &str,
        fee: Decimal,
    ) -> Result<DisputeId>;
}

/// In-process oracle that holds disputes open until told how to rule.
///
/// Mirrors the appealable-arbitrator stub used in integration rigs: the
/// operator decides each dispute by wire code, exactly once.
pub struct AutoRuler {
    cost: Decimal,
    next: DisputeId,
    pending: HashMap<DisputeId, ClaimId>,
    decided: u64,
}

impl AutoRuler {
    #[must_use]
    pub fn new(cost: Decimal) -> Self {
        Self {
            cost,
            next: DisputeId(0),
            pending: HashMap::new(),
            decided: 0,
        }
    }

    /// Decide a pending dispute with a raw wire code.
    ///
    /// Returns the claim the dispute was opened for together with the
    /// decoded ruling. The dispute is consumed: a second call for the
    /// same id fails.
    pub fn give_ruling(&mut self, dispute_id: DisputeId, code: u8) -> Result<(ClaimId, Ruling)> {
        let ruling = Ruling::from_code(code).ok_or_else(|| SafeholdError::InvalidTransition {
            reason: format!("unknown ruling code {code} for {dispute_id}"),
        })?;
        let claim_id =
            self.pending
                .remove(&dispute_id)
                .ok_or_else(|| SafeholdError::InvalidTransition {
                    reason: format!("{dispute_id} is unknown or already decided"),
                })?;
        self.decided += 1;

        tracing::info!(dispute = %dispute_id, claim = %claim_id, ruling = %ruling, "Dispute decided");
        Ok((claim_id, ruling))
    }

    /// Disputes still awaiting a decision.
    #[must_use]
    pub fn pending_disputes(&self) -> usize {
        self.pending.len()
    }

    /// Historical count of decided disputes.
    #[must_use]
    pub fn total_decided(&self) -> u64 {
        self.decided
    }
}

impl ArbitrationOracle for AutoRuler {
    fn arbitration_cost(&self) -> Decimal {
        self.cost
    }

    fn create_dispute(
        &mut self,
        claim_id: ClaimId,
        evidence_uri: &str,
        fee: Decimal,
    ) -> Result<DisputeId> {
        if fee < self.cost {
            return Err(SafeholdError::InsufficientFunds {
                needed: self.cost,
                available: fee,
            });
        }
        let dispute_id = self.next;
        self.next = self.next.next();
        self.pending.insert(dispute_id, claim_id);

        tracing::debug!(
            dispute = %dispute_id,
            claim = %claim_id,
            evidence_uri,
            fee = %fee,
            "Dispute opened"
        );
        Ok(dispute_id)
    }
}
