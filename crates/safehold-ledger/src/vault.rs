//! The Vault facade — the serialized, all-or-nothing operation surface.
//!
//! `Vault` composes the safe registry, the claim registry, and the
//! conservation tracker into the external interface of the system. Each
//! method is one transaction: validate everything, then mutate, then
//! return the operation's event. A returned error means nothing changed.
//!
//! Fund transfers are the final side effect of their transaction: the
//! safe's balance is zeroed before the withdrawn amount is surfaced to
//! the caller, so there is no window for reentrant double-spend.

use rust_decimal::Decimal;
use safehold_types::{
    AccountId, ArbitrationConfig, Claim, ClaimId, ClaimStatus, ClaimType, Result, Ruling,
    RulingRequest, Safe, SafeId, SafeholdError, UnixSeconds, VaultEvent,
};

use crate::claim_registry::ClaimRegistry;
use crate::conservation::FundsConservation;
use crate::safe_registry::SafeRegistry;

/// The custody vault: safes, claims, and conservation accounting.
pub struct Vault {
    safes: SafeRegistry,
    claims: ClaimRegistry,
    conservation: FundsConservation,
    config: ArbitrationConfig,
}

impl Vault {
    /// Create an empty vault with the given arbitration fee policy.
    #[must_use]
    pub fn new(config: ArbitrationConfig) -> Self {
        Self {
            safes: SafeRegistry::new(),
            claims: ClaimRegistry::new(),
            conservation: FundsConservation::new(),
            config,
        }
    }

    /// The arbitration fee policy this vault runs under.
    #[must_use]
    pub fn config(&self) -> &ArbitrationConfig {
        &self.config
    }

    // =====================================================================
    // Safe operations
    // =====================================================================

    /// Create a safe on behalf of its creator.
    ///
    /// ArbitrationBased safes must carry at least the required deposit
    /// (arbitration fee + guardian fee) at creation.
    #[allow(clippy::too_many_arguments)]
    pub fn create_safe(
        &mut self,
        caller: AccountId,
        beneficiary: AccountId,
        safe_id: SafeId,
        claim_type: ClaimType,
        signaling_period: u64,
        metaevidence_uri: String,
        funds: Decimal,
        now: UnixSeconds,
    ) -> Result<VaultEvent> {
        self.register_safe(
            caller,
            beneficiary,
            safe_id,
            claim_type,
            signaling_period,
            metaevidence_uri,
            funds,
            now,
        )
    }

    /// Proxy-create a safe from the beneficiary's side: the caller becomes
    /// the beneficiary and the named party the creator. Same invariants as
    /// [`Vault::create_safe`], inverted authorship.
    #[allow(clippy::too_many_arguments)]
    pub fn sync_safe(
        &mut self,
        caller: AccountId,
        creator: AccountId,
        safe_id: SafeId,
        claim_type: ClaimType,
        signaling_period: u64,
        metaevidence_uri: String,
        funds: Decimal,
        now: UnixSeconds,
    ) -> Result<VaultEvent> {
        self.register_safe(
            creator,
            caller,
            safe_id,
            claim_type,
            signaling_period,
            metaevidence_uri,
            funds,
            now,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn register_safe(
        &mut self,
        created_by: AccountId,
        beneficiary: AccountId,
        safe_id: SafeId,
        claim_type: ClaimType,
        signaling_period: u64,
        metaevidence_uri: String,
        funds: Decimal,
        now: UnixSeconds,
    ) -> Result<VaultEvent> {
        if claim_type == ClaimType::ArbitrationBased {
            let required = self.config.required_deposit();
            if funds < required {
                return Err(SafeholdError::InsufficientFunds {
                    needed: required,
                    available: funds,
                });
            }
        }

        let safe = self.safes.create(
            created_by,
            beneficiary,
            safe_id,
            claim_type,
            signaling_period,
            metaevidence_uri,
            funds,
            now,
        )?;
        let safe_id = safe.id.clone();
        self.conservation.record_deposit(funds);

        tracing::info!(
            safe = %safe_id,
            creator = %created_by,
            beneficiary = %beneficiary,
            claim_type = %claim_type,
            funds = %funds,
            "Safe created"
        );
        Ok(VaultEvent::SafeCreated { safe_id })
    }

    /// Deposit funds into an existing safe. Callable by anyone.
    pub fn deposit_funds(&mut self, safe_id: &SafeId, amount: Decimal) -> Result<VaultEvent> {
        self.safes.deposit(safe_id, amount)?;
        self.conservation.record_deposit(amount);

        tracing::debug!(safe = %safe_id, amount = %amount, "Funds deposited");
        Ok(VaultEvent::FundsDeposited {
            safe_id: safe_id.clone(),
            amount,
        })
    }

    /// Withdraw a safe's full balance to its current owner.
    ///
    /// The current owner is the beneficiary once the safe's claim has
    /// Passed, otherwise the creator. A Failed claim observed here is
    /// persisted and frees the claim slot before custody moves.
    pub fn withdraw_funds(
        &mut self,
        safe_id: &SafeId,
        caller: AccountId,
        now: UnixSeconds,
    ) -> Result<VaultEvent> {
        let safe = self
            .safes
            .get(safe_id)
            .ok_or_else(|| SafeholdError::SafeNotFound(safe_id.clone()))?;
        let (creator, beneficiary, funds, latest_signal) = (
            safe.created_by,
            safe.beneficiary,
            safe.funds,
            safe.latest_signal_time,
        );

        // Read-only ownership derivation; persistence happens only after
        // every precondition has passed.
        let active = self.claims.active_claim(safe_id);
        let status = match active {
            Some(claim_id) => {
                let claim = self
                    .claims
                    .get(&claim_id)
                    .ok_or(SafeholdError::ClaimNotFound(claim_id))?;
                Some(safehold_resolver::resolve(claim, latest_signal, now))
            }
            None => None,
        };
        let owner = match status {
            Some(ClaimStatus::Passed) => beneficiary,
            _ => creator,
        };
        if caller != owner {
            return Err(SafeholdError::InvalidParty {
                reason: format!("only the current owner {owner} may withdraw, got {caller}"),
            });
        }
        if funds <= Decimal::ZERO {
            return Err(SafeholdError::InsufficientFunds {
                needed: Decimal::ZERO,
                available: funds,
            });
        }

        // All checks passed: persist the observed claim outcome, then
        // drain custody. The transfer is the final side effect.
        if let Some(claim_id) = active {
            self.claims.settle(claim_id, latest_signal, now)?;
        }
        let amount = self.safes.withdraw_all(safe_id)?;
        self.conservation.record_withdrawal(amount);

        tracing::info!(
            safe = %safe_id,
            to = %caller,
            amount = %amount,
            "Funds withdrawn"
        );
        Ok(VaultEvent::FundsWithdrawn {
            safe_id: safe_id.clone(),
            to: caller,
            amount,
        })
    }

    /// Record a liveness signal from the safe's creator.
    pub fn send_signal(
        &mut self,
        safe_id: &SafeId,
        caller: AccountId,
        now: UnixSeconds,
    ) -> Result<VaultEvent> {
        let at = self.safes.record_signal(safe_id, caller, now)?;
        tracing::debug!(safe = %safe_id, at, "Signal recorded");
        Ok(VaultEvent::SignalSent {
            safe_id: safe_id.clone(),
            at,
        })
    }

    // =====================================================================
    // Claim operations
    // =====================================================================

    /// Create a claim against a safe. Beneficiary only.
    ///
    /// For ArbitrationBased safes, also returns the outbound
    /// [`RulingRequest`] that the arbitration adapter forwards to the
    /// oracle, funded by the fee deducted from the safe.
    pub fn create_claim(
        &mut self,
        safe_id: &SafeId,
        caller: AccountId,
        evidence_uri: String,
        now: UnixSeconds,
    ) -> Result<(VaultEvent, Option<RulingRequest>)> {
        let fee = self.config.base_fee;
        let (claim_id, request) =
            self.claims
                .create_claim(&mut self.safes, safe_id, caller, evidence_uri, fee, now)?;
        if request.is_some() {
            self.conservation.record_fee_forwarded(fee);
        }

        tracing::info!(
            safe = %safe_id,
            claim = %claim_id,
            claimed_by = %caller,
            dispute = request.is_some(),
            "Claim created"
        );
        Ok((
            VaultEvent::ClaimCreated {
                safe_id: safe_id.clone(),
                claim_id,
                claimed_by: caller,
            },
            request,
        ))
    }

    /// Apply a ruling delivered by the arbitration oracle.
    ///
    /// Caller-identity validation (only the registered oracle) happens in
    /// the ruling router before this is reached.
    pub fn apply_ruling(&mut self, claim_id: ClaimId, ruling: Ruling) -> Result<VaultEvent> {
        let status = self.claims.apply_ruling(claim_id, ruling)?;
        tracing::info!(claim = %claim_id, ruling = %ruling, status = %status, "Ruling applied");
        Ok(VaultEvent::RulingApplied {
            claim_id,
            ruling,
            status,
        })
    }

    /// Derive a claim's current status. Read-only.
    ///
    /// # Errors
    /// [`SafeholdError::ClaimNotFound`] if the claim does not exist or is
    /// not bound to the given safe; [`SafeholdError::SafeNotFound`] if the
    /// safe does not exist.
    pub fn claim_status(
        &self,
        safe_id: &SafeId,
        claim_id: ClaimId,
        now: UnixSeconds,
    ) -> Result<ClaimStatus> {
        let claim = self
            .claims
            .get(&claim_id)
            .ok_or(SafeholdError::ClaimNotFound(claim_id))?;
        if claim.safe_id != *safe_id {
            return Err(SafeholdError::ClaimNotFound(claim_id));
        }
        let safe = self
            .safes
            .get(safe_id)
            .ok_or_else(|| SafeholdError::SafeNotFound(safe_id.clone()))?;
        Ok(safehold_resolver::resolve(
            claim,
            safe.latest_signal_time,
            now,
        ))
    }

    // =====================================================================
    // Reads
    // =====================================================================

    /// Look up a safe. Absent ids return the zero-valued sentinel record,
    /// matching the "does not exist" convention of the external interface.
    #[must_use]
    pub fn get_safe(&self, safe_id: &SafeId) -> Safe {
        self.safes
            .get(safe_id)
            .cloned()
            .unwrap_or_else(|| Safe::sentinel(safe_id.clone()))
    }

    /// Look up a claim by id.
    #[must_use]
    pub fn get_claim(&self, claim_id: &ClaimId) -> Option<&Claim> {
        self.claims.get(claim_id)
    }

    /// Historical total of safes created.
    #[must_use]
    pub fn total_safes(&self) -> u64 {
        self.safes.total_safes()
    }

    /// Historical total of claims created.
    #[must_use]
    pub fn total_claims(&self) -> u64 {
        self.claims.total_claims()
    }

    /// Sum of all safes' deposited funds.
    #[must_use]
    pub fn contract_balance(&self) -> Decimal {
        self.safes.contract_balance()
    }

    /// Verify the fund conservation invariant against current custody.
    pub fn verify_conservation(&self) -> Result<()> {
        self.conservation.verify(self.safes.contract_balance())
    }
}
