//! Configuration for the arbitration fee policy and oracle identity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{constants, AccountId};

/// Fee policy and oracle identity for ArbitrationBased safes.
///
/// The required deposit for an ArbitrationBased safe is sized at creation
/// time as `base_fee + guardian_fee`: the arbitration fee funds the
/// eventual dispute, the guardian fee pays the off-chain recovery
/// guardians.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrationConfig {
    /// The only account allowed to deliver rulings.
    pub oracle: AccountId,
    /// Base arbitration cost quoted by the oracle.
    #[serde(with = "rust_decimal::serde::str")]
    pub base_fee: Decimal,
    /// Guardian / maintenance fee collected alongside the arbitration fee.
    #[serde(with = "rust_decimal::serde::str")]
    pub guardian_fee: Decimal,
}

impl ArbitrationConfig {
    /// Config with default fees for the given oracle identity.
    #[must_use]
    pub fn with_oracle(oracle: AccountId) -> Self {
        Self {
            oracle,
            base_fee: Decimal::new(
                constants::DEFAULT_BASE_FEE_MANTISSA,
                constants::DEFAULT_BASE_FEE_SCALE,
            ),
            guardian_fee: Decimal::new(
                constants::DEFAULT_GUARDIAN_FEE_MANTISSA,
                constants::DEFAULT_GUARDIAN_FEE_SCALE,
            ),
        }
    }

    /// Minimum deposit an ArbitrationBased safe must carry at creation.
    #[must_use]
    pub fn required_deposit(&self) -> Decimal {
        self.base_fee + self.guardian_fee
    }
}
