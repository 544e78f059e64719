//! # safehold-types
//!
//! Shared types, errors, and configuration for the **Safehold** custody vault.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`SafeId`], [`ClaimId`], [`DisputeId`], [`AccountId`]
//! - **Safe model**: [`Safe`], [`ClaimType`]
//! - **Claim model**: [`Claim`], [`ClaimKind`], [`ClaimStatus`]
//! - **Ruling model**: [`Ruling`], [`RulingRequest`]
//! - **Event model**: [`VaultEvent`]
//! - **Configuration**: [`ArbitrationConfig`]
//! - **Errors**: [`SafeholdError`] with `SH_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod claim;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod ruling;
pub mod safe;
pub mod time;

// Re-export all primary types at crate root for ergonomic imports:
//   use safehold_types::{Safe, Claim, ClaimStatus, Ruling, ...};

pub use claim::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use ruling::*;
pub use safe::*;
pub use time::*;

// Constants are accessed via `safehold_types::constants::FOO`
// (not re-exported to avoid name collisions).
