//! Error types for the Safehold vault.
//!
//! All errors use the `SH_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Safe errors
//! - 2xx: Fund errors
//! - 3xx: Claim / ruling errors
//! - 9xx: General / internal errors
//!
//! Every vault operation is all-or-nothing: a returned error implies the
//! ledger is unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{ClaimId, SafeId};

/// Central error enum for all Safehold operations.
#[derive(Debug, Error)]
pub enum SafeholdError {
    // =================================================================
    // Safe Errors (1xx)
    // =================================================================
    /// The referenced safe does not exist.
    #[error("SH_ERR_100: Safe not found: {0}")]
    SafeNotFound(SafeId),

    /// A safe with this identifier already exists.
    #[error("SH_ERR_101: Safe id already in use: {0}")]
    DuplicateSafeId(SafeId),

    /// A party is invalid for the operation: beneficiary equals creator,
    /// a party is the zero address, or the caller lacks the required role.
    #[error("SH_ERR_102: Invalid party: {reason}")]
    InvalidParty { reason: String },

    /// The safe identifier is malformed (empty or oversized).
    #[error("SH_ERR_103: Invalid safe id: {reason}")]
    InvalidSafeId { reason: String },

    /// An evidence / meta-evidence URI exceeds the length bound.
    #[error("SH_ERR_104: Invalid URI: {reason}")]
    InvalidUri { reason: String },

    // =================================================================
    // Fund Errors (2xx)
    // =================================================================
    /// Not enough funds: zero-balance withdrawal, an undersized
    /// arbitration deposit, or a fee below the quoted arbitration cost.
    #[error("SH_ERR_200: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    /// A monetary amount is negative. Custody only ever holds
    /// non-negative balances, so negative inputs are rejected before
    /// any mutation.
    #[error("SH_ERR_201: Invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    // =================================================================
    // Claim / Ruling Errors (3xx)
    // =================================================================
    /// The referenced claim does not exist.
    #[error("SH_ERR_300: Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    /// The safe already has an unresolved claim.
    #[error("SH_ERR_301: Conflicting claim {claim_id} on safe {safe_id}")]
    ConflictingClaim { safe_id: SafeId, claim_id: ClaimId },

    /// A status transition that the claim state machine forbids: a ruling
    /// on an already-terminal claim, a ruling on a signal-based claim, or
    /// an unknown ruling code.
    #[error("SH_ERR_302: Invalid transition: {reason}")]
    InvalidTransition { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SH_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("SH_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid fee policy, missing oracle, etc.).
    #[error("SH_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("SH_ERR_903: I/O error: {0}")]
    Io(String),

    /// Fund conservation invariant violated. Critical safety alert.
    #[error("SH_ERR_904: Conservation violation: {reason}")]
    ConservationViolation { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SafeholdError>;

// Conversion from std::io::Error
impl From<std::io::Error> for SafeholdError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
