//! Globally unique identifiers used throughout Safehold.
//!
//! `SafeId` is externally supplied (it names an off-chain secret-recovery
//! record); `ClaimId` is generated, using UUIDv7 or a deterministic SHA-256
//! derivation; `AccountId` is a raw 20-byte ledger address.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, SafeholdError};

// ---------------------------------------------------------------------------
// SafeId
// ---------------------------------------------------------------------------

/// Externally supplied safe identifier. Must be non-empty and globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SafeId(String);

impl SafeId {
    /// Validate and wrap an external safe identifier.
    ///
    /// # Errors
    /// Returns [`SafeholdError::InvalidSafeId`] if the identifier is empty
    /// or exceeds [`crate::constants::MAX_SAFE_ID_LEN`].
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(SafeholdError::InvalidSafeId {
                reason: "safe id must be non-empty".to_string(),
            });
        }
        if id.len() > crate::constants::MAX_SAFE_ID_LEN {
            return Err(SafeholdError::InvalidSafeId {
                reason: format!(
                    "safe id length {} exceeds maximum {}",
                    id.len(),
                    crate::constants::MAX_SAFE_ID_LEN
                ),
            });
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ClaimId
// ---------------------------------------------------------------------------

/// Globally unique claim identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ClaimId(pub Uuid);

impl ClaimId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Deterministic `ClaimId` from the parent safe and its claim sequence.
    ///
    /// The registry allocates claim ids this way so the same (safe, sequence)
    /// pair always names the same claim, independent of wall clock.
    #[must_use]
    pub fn derive(safe_id: &SafeId, sequence: u64) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"safehold:claim_id:v1:");
        hasher.update(safe_id.as_str().as_bytes());
        hasher.update(sequence.to_le_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// DisputeId
// ---------------------------------------------------------------------------

/// Oracle-side handle for a submitted dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DisputeId(pub u64);

impl DisputeId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for DisputeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispute:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A ledger account address (raw 20 bytes).
///
/// [`AccountId::ZERO`] is the null sentinel: it is never a valid party to
/// a safe, and creation operations reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The null address.
    pub const ZERO: Self = Self([0u8; 20]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the null address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Random account for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl AccountId {
    pub fn random() -> Self {
        let mut bytes = [0u8; 20];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes[..]);
        Self(bytes)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
