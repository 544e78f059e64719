//! # safehold-resolver
//!
//! **Pure claim-status derivation for Safehold.**
//!
//! The resolver is the decision plane — given a claim, the safe's latest
//! liveness signal, and the current chain time, it derives the claim's
//! status. It has:
//!
//! - **Zero side effects**: no ledger writes, no custody logic
//! - **Deterministic output**: same inputs -> same status, on every caller
//! - **One exhaustive match**: both resolution strategies unified over
//!   the claim-kind tag
//!
//! SignalBased status is computed lazily on every query; ArbitrationBased
//! status only ever changes through an explicit ruling, which the ledger
//! stores before the resolver sees the claim.

pub mod status;

pub use status::{resolve, signal_qualifies};
