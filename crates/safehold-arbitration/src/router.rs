//! Inbound ruling validation.
//!
//! Rulings arrive from outside the trust boundary, so the router checks
//! the sender's identity and the wire code before anything touches the
//! ledger. The vault's claim state machine then enforces the rest
//! (claim exists, ArbitrationBased, still Active).

use safehold_ledger::Vault;
use safehold_types::{AccountId, ClaimId, Result, Ruling, SafeholdError, VaultEvent};

/// Validates inbound rulings and delivers them to the vault.
pub struct RulingRouter {
    oracle: AccountId,
}

impl RulingRouter {
    /// A router that accepts rulings only from `oracle`.
    #[must_use]
    pub fn new(oracle: AccountId) -> Self {
        Self { oracle }
    }

    /// Deliver a raw ruling to the vault.
    ///
    /// # Errors
    /// [`SafeholdError::InvalidParty`] if `caller` is not the registered
    /// oracle; [`SafeholdError::InvalidTransition`] for an unknown wire
    /// code or a claim that cannot accept a ruling.
    pub fn deliver(
        &self,
        vault: &mut Vault,
        caller: AccountId,
        claim_id: ClaimId,
        code: u8,
    ) -> Result<VaultEvent> {
        if caller != self.oracle {
            tracing::warn!(claim = %claim_id, caller = %caller, "Ruling from non-oracle rejected");
            return Err(SafeholdError::InvalidParty {
                reason: format!("only the oracle {} may rule, got {caller}", self.oracle),
            });
        }
        let ruling = Ruling::from_code(code).ok_or_else(|| SafeholdError::InvalidTransition {
            reason: format!("unknown ruling code {code} for claim {claim_id}"),
        })?;
        vault.apply_ruling(claim_id, ruling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use safehold_types::{ArbitrationConfig, ClaimType, SafeId};

    fn oracle() -> AccountId {
        AccountId([0xaa; 20])
    }

    fn claimed_vault() -> (Vault, ClaimId) {
        let mut vault = Vault::new(ArbitrationConfig::with_oracle(oracle()));
        let safe_id = SafeId::parse("a1").unwrap();
        let deposit = vault.config().required_deposit();
        vault
            .create_safe(
                AccountId([1u8; 20]),
                AccountId([2u8; 20]),
                safe_id.clone(),
                ClaimType::ArbitrationBased,
                0,
                "ipfs://meta".to_string(),
                deposit,
                1_000,
            )
            .unwrap();
        let (event, _) = vault
            .create_claim(&safe_id, AccountId([2u8; 20]), "ipfs://e".to_string(), 1_001)
            .unwrap();
        let claim_id = match event {
            VaultEvent::ClaimCreated { claim_id, .. } => claim_id,
            other => panic!("unexpected event {other}"),
        };
        (vault, claim_id)
    }

    #[test]
    fn oracle_ruling_reaches_the_vault() {
        let (mut vault, claim_id) = claimed_vault();
        let router = RulingRouter::new(oracle());
        let event = router.deliver(&mut vault, oracle(), claim_id, 2).unwrap();
        assert_eq!(event.tag(), "RULING_APPLIED");
    }

    #[test]
    fn non_oracle_caller_rejected() {
        let (mut vault, claim_id) = claimed_vault();
        let router = RulingRouter::new(oracle());
        let err = router
            .deliver(&mut vault, AccountId([9u8; 20]), claim_id, 1)
            .unwrap_err();
        assert!(matches!(err, SafeholdError::InvalidParty { .. }));
        // The claim is untouched and funds stayed put.
        assert!(
            vault
                .get_claim(&claim_id)
                .is_some_and(|c| !c.status.is_terminal())
        );
        assert_eq!(
            vault.get_safe(&SafeId::parse("a1").unwrap()).funds,
            Decimal::new(10, 3)
        );
    }

    #[test]
    fn unknown_code_rejected_before_the_vault() {
        let (mut vault, claim_id) = claimed_vault();
        let router = RulingRouter::new(oracle());
        for code in [0u8, 3, 255] {
            let err = router
                .deliver(&mut vault, oracle(), claim_id, code)
                .unwrap_err();
            assert!(matches!(err, SafeholdError::InvalidTransition { .. }));
        }
    }
}
