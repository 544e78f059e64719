//! Arbitration plane for the Safehold vault.
//!
//! ArbitrationBased claims are never resolved by time. The flow is:
//!
//! ```text
//!   Vault::create_claim ── RulingRequest ──▶ ArbitrationAdapter ──▶ oracle
//!                                                                     │
//!   Vault::apply_ruling ◀── RulingRouter ◀──────── ruling (code) ─────┘
//! ```
//!
//! - [`ArbitrationOracle`] is the seam to the external decision maker.
//!   [`AutoRuler`] is the in-process implementation used in tests and
//!   single-node deployments.
//! - [`ArbitrationAdapter`] submits outbound [`RulingRequest`]s as
//!   disputes and keeps the dispute-to-claim mapping.
//! - [`RulingRouter`] validates inbound rulings (oracle identity, wire
//!   code) before they reach the vault.
//!
//! [`RulingRequest`]: safehold_types::RulingRequest

pub mod adapter;
pub mod oracle;
pub mod router;

pub use adapter::ArbitrationAdapter;
pub use oracle::{ArbitrationOracle, AutoRuler};
pub use router::RulingRouter;
