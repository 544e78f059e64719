//! Outbound adapter: turns the vault's ruling requests into oracle
//! disputes and remembers which claim each dispute answers.

use std::collections::HashMap;

use rust_decimal::Decimal;
use safehold_types::{ClaimId, DisputeId, Result, RulingRequest};

use crate::oracle::ArbitrationOracle;

/// Bridges the vault's outbound [`RulingRequest`]s to an oracle.
pub struct ArbitrationAdapter<O: ArbitrationOracle> {
    oracle: O,
    claims: HashMap<DisputeId, ClaimId>,
}

impl<O: ArbitrationOracle> ArbitrationAdapter<O> {
    #[must_use]
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            claims: HashMap::new(),
        }
    }

    /// Submit a ruling request as a dispute, funded by the forwarded fee.
    pub fn submit(&mut self, request: &RulingRequest) -> Result<DisputeId> {
        let dispute_id =
            self.oracle
                .create_dispute(request.claim_id, &request.evidence_uri, request.fee)?;
        self.claims.insert(dispute_id, request.claim_id);

        tracing::debug!(
            dispute = %dispute_id,
            claim = %request.claim_id,
            fee = %request.fee,
            "Ruling request submitted"
        );
        Ok(dispute_id)
    }

    /// The claim a dispute was opened for, if this adapter submitted it.
    #[must_use]
    pub fn claim_for(&self, dispute_id: DisputeId) -> Option<ClaimId> {
        self.claims.get(&dispute_id).copied()
    }

    /// Quote the minimum deposit an ArbitrationBased safe must carry:
    /// the oracle's live arbitration cost plus the guardian incentive.
    #[must_use]
    pub fn required_deposit(&self, guardian_fee: Decimal) -> Decimal {
        self.oracle.arbitration_cost() + guardian_fee
    }

    /// Direct access to the wrapped oracle.
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::AutoRuler;

    fn adapter() -> ArbitrationAdapter<AutoRuler> {
        ArbitrationAdapter::new(AutoRuler::new(Decimal::new(1, 3)))
    }

    fn request(claim_id: ClaimId) -> RulingRequest {
        RulingRequest {
            claim_id,
            evidence_uri: "ipfs://evidence".to_string(),
            fee: Decimal::new(1, 3),
        }
    }

    #[test]
    fn submit_maps_dispute_to_claim() {
        let mut adapter = adapter();
        let claim_id = ClaimId::new();
        let dispute = adapter.submit(&request(claim_id)).unwrap();
        assert_eq!(adapter.claim_for(dispute), Some(claim_id));
        assert_eq!(adapter.claim_for(dispute.next()), None);
    }

    #[test]
    fn underfunded_request_leaves_no_mapping() {
        let mut adapter = adapter();
        let mut req = request(ClaimId::new());
        req.fee = Decimal::ZERO;
        adapter.submit(&req).unwrap_err();
        assert_eq!(adapter.claim_for(DisputeId(0)), None);
    }

    #[test]
    fn deposit_quote_adds_guardian_fee() {
        let adapter = adapter();
        let quote = adapter.required_deposit(Decimal::new(1, 2));
        assert_eq!(quote, Decimal::new(11, 3));
    }
}
