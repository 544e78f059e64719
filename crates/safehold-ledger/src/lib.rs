//! # safehold-ledger
//!
//! **The mutable ledger plane**: safe registry, claim registry, fund
//! custody, liveness signals, and the conservation checker.
//!
//! ## Architecture
//!
//! 1. **SafeRegistry**: keyed table of [`safehold_types::Safe`] records —
//!    creation, deposits, withdrawals, signal recording
//! 2. **ClaimRegistry**: claim records plus the one-active-claim-per-safe
//!    slot; allocates claim ids and forwards arbitration requests
//! 3. **FundsConservation**: deposits − withdrawals − forwarded fees must
//!    always equal the sum of all safes' funds
//! 4. **Vault**: the facade composing the above into the serialized,
//!    all-or-nothing operation surface
//!
//! ## Operation flow
//!
//! ```text
//! caller → Vault::<op>() → validate (registries) → mutate → VaultEvent
//! ```
//!
//! Every mutating operation fully validates before touching state; a
//! returned error implies nothing changed.

pub mod claim_registry;
pub mod conservation;
pub mod safe_registry;
pub mod vault;

pub use claim_registry::ClaimRegistry;
pub use conservation::FundsConservation;
pub use safe_registry::SafeRegistry;
pub use vault::Vault;
