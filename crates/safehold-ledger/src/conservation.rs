//! Fund conservation invariant checker.
//!
//! Mathematical invariant enforced after every custody mutation:
//! ```text
//! Σ(safe.funds) == Σ(deposits) - Σ(withdrawals) - Σ(forwarded fees)
//! ```
//!
//! If this invariant ever breaks, something has gone catastrophically
//! wrong in custody accounting. The vault is single-currency, so the
//! tracker keeps three running totals rather than per-asset maps.

use rust_decimal::Decimal;
use safehold_types::{Result, SafeholdError};

/// Tracks custody in/out totals and validates conservation.
pub struct FundsConservation {
    /// Total deposits since genesis (safe creations included).
    deposits: Decimal,
    /// Total withdrawals since genesis.
    withdrawals: Decimal,
    /// Total arbitration fees forwarded to the oracle since genesis.
    fees_forwarded: Decimal,
}

impl FundsConservation {
    /// Create a new conservation tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposits: Decimal::ZERO,
            withdrawals: Decimal::ZERO,
            fees_forwarded: Decimal::ZERO,
        }
    }

    /// Record an inbound deposit (safe creation or top-up).
    pub fn record_deposit(&mut self, amount: Decimal) {
        self.deposits += amount;
    }

    /// Record an outbound withdrawal.
    pub fn record_withdrawal(&mut self, amount: Decimal) {
        self.withdrawals += amount;
    }

    /// Record an arbitration fee leaving custody toward the oracle.
    pub fn record_fee_forwarded(&mut self, amount: Decimal) {
        self.fees_forwarded += amount;
    }

    /// Expected custody total: deposits - withdrawals - forwarded fees.
    #[must_use]
    pub fn expected_balance(&self) -> Decimal {
        self.deposits - self.withdrawals - self.fees_forwarded
    }

    /// Verify that the actual custody total (sum of all safes' funds)
    /// matches the expected total.
    ///
    /// # Errors
    /// Returns [`SafeholdError::ConservationViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_balance: Decimal) -> Result<()> {
        let expected = self.expected_balance();
        if actual_balance != expected {
            return Err(SafeholdError::ConservationViolation {
                reason: format!(
                    "actual custody {actual_balance} != expected {expected} \
                     (deposits={}, withdrawals={}, fees={})",
                    self.deposits, self.withdrawals, self.fees_forwarded
                ),
            });
        }
        Ok(())
    }
}

impl Default for FundsConservation {
    fn default() -> Self {
        Self::new()
    }
}
