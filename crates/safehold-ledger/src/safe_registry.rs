//! Safe registry — the keyed table of custody records.
//!
//! All mutations are atomic: validation happens before any write, so
//! either the full operation succeeds or the table is unchanged. Reads
//! on absent ids return `None`; the Vault facade layers the zero-valued
//! sentinel convention on top.

use std::collections::HashMap;

use rust_decimal::Decimal;
use safehold_types::{
    AccountId, ClaimType, Result, Safe, SafeId, SafeholdError, UnixSeconds, constants,
};

/// Keyed table of safes. Source of truth for custody and signal state.
pub struct SafeRegistry {
    /// All safes indexed by their external identifier.
    safes: HashMap<SafeId, Safe>,
    /// Historical total of safes created.
    total_created: u64,
}

impl SafeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            safes: HashMap::new(),
            total_created: 0,
        }
    }

    /// Register a new safe.
    ///
    /// `created_by` and `beneficiary` must be distinct, non-zero parties;
    /// the id must be unused. Signal fields start at the 0 ("never")
    /// sentinel regardless of claim type.
    ///
    /// # Errors
    /// - [`SafeholdError::DuplicateSafeId`] if the id is taken
    /// - [`SafeholdError::InvalidParty`] for zero or equal parties
    /// - [`SafeholdError::InvalidAmount`] for negative initial funds
    /// - [`SafeholdError::InvalidUri`] for an oversized meta-evidence URI
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        created_by: AccountId,
        beneficiary: AccountId,
        id: SafeId,
        claim_type: ClaimType,
        signaling_period: u64,
        metaevidence_uri: String,
        funds: Decimal,
        now: UnixSeconds,
    ) -> Result<&Safe> {
        if self.safes.contains_key(&id) {
            return Err(SafeholdError::DuplicateSafeId(id));
        }
        if created_by.is_zero() || beneficiary.is_zero() {
            return Err(SafeholdError::InvalidParty {
                reason: "creator and beneficiary must be non-zero addresses".to_string(),
            });
        }
        if created_by == beneficiary {
            return Err(SafeholdError::InvalidParty {
                reason: format!("creator and beneficiary are the same party: {created_by}"),
            });
        }
        if funds < Decimal::ZERO {
            return Err(SafeholdError::InvalidAmount { amount: funds });
        }
        if metaevidence_uri.len() > constants::MAX_URI_LEN {
            return Err(SafeholdError::InvalidUri {
                reason: format!(
                    "meta-evidence URI is {} bytes, limit is {}",
                    metaevidence_uri.len(),
                    constants::MAX_URI_LEN
                ),
            });
        }

        let safe = Safe {
            id: id.clone(),
            created_by,
            beneficiary,
            claim_type,
            signaling_period,
            end_signal_time: 0,
            latest_signal_time: 0,
            funds,
            claims_count: 0,
            metaevidence_uri,
            created_at: now,
        };
        self.total_created += 1;
        Ok(self.safes.entry(id).or_insert(safe))
    }

    /// Add funds to a safe. Callable on behalf of anyone.
    ///
    /// # Errors
    /// - [`SafeholdError::SafeNotFound`] if the safe does not exist
    /// - [`SafeholdError::InvalidAmount`] for a negative amount
    pub fn deposit(&mut self, id: &SafeId, amount: Decimal) -> Result<Decimal> {
        if amount < Decimal::ZERO {
            return Err(SafeholdError::InvalidAmount { amount });
        }
        let safe = self
            .safes
            .get_mut(id)
            .ok_or_else(|| SafeholdError::SafeNotFound(id.clone()))?;
        safe.funds += amount;
        Ok(safe.funds)
    }

    /// Drain a safe's full balance. Funds are zeroed before the amount is
    /// handed back, so the transfer is the final side effect.
    ///
    /// Authorization (current-owner check) happens in the Vault, which
    /// knows the claim state.
    ///
    /// # Errors
    /// - [`SafeholdError::SafeNotFound`] if the safe does not exist
    /// - [`SafeholdError::InsufficientFunds`] at zero balance
    pub fn withdraw_all(&mut self, id: &SafeId) -> Result<Decimal> {
        let safe = self
            .safes
            .get_mut(id)
            .ok_or_else(|| SafeholdError::SafeNotFound(id.clone()))?;
        if safe.funds <= Decimal::ZERO {
            return Err(SafeholdError::InsufficientFunds {
                needed: Decimal::ZERO,
                available: safe.funds,
            });
        }
        let amount = safe.funds;
        safe.funds = Decimal::ZERO;
        Ok(amount)
    }

    /// Record a liveness signal from the safe's creator.
    ///
    /// Sets `latest_signal_time = now` and recomputes the safe-level
    /// window deadline `end_signal_time = now + signaling_period`. Valid
    /// for ArbitrationBased safes too, where it is a no-op for resolution.
    ///
    /// # Errors
    /// - [`SafeholdError::SafeNotFound`] if the safe does not exist
    /// - [`SafeholdError::InvalidParty`] unless the caller is the creator
    pub fn record_signal(
        &mut self,
        id: &SafeId,
        caller: AccountId,
        now: UnixSeconds,
    ) -> Result<UnixSeconds> {
        let safe = self
            .safes
            .get_mut(id)
            .ok_or_else(|| SafeholdError::SafeNotFound(id.clone()))?;
        if caller != safe.created_by {
            return Err(SafeholdError::InvalidParty {
                reason: format!("only the creator may signal, got {caller}"),
            });
        }
        safe.latest_signal_time = now;
        safe.end_signal_time = now + safe.signaling_period;
        Ok(now)
    }

    /// Look up a safe by id.
    #[must_use]
    pub fn get(&self, id: &SafeId) -> Option<&Safe> {
        self.safes.get(id)
    }

    /// Mutable lookup, for the claim registry's fee deduction and
    /// claims-count bookkeeping.
    pub(crate) fn get_mut(&mut self, id: &SafeId) -> Option<&mut Safe> {
        self.safes.get_mut(id)
    }

    /// Historical total of safes created.
    #[must_use]
    pub fn total_safes(&self) -> u64 {
        self.total_created
    }

    /// Sum of all safes' deposited funds.
    #[must_use]
    pub fn contract_balance(&self) -> Decimal {
        self.safes.values().map(|s| s.funds).sum()
    }
}

impl Default for SafeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
