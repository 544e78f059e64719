//! System-wide constants for the Safehold vault.

/// Maximum length of an externally supplied safe identifier.
pub const MAX_SAFE_ID_LEN: usize = 128;

/// Maximum length of an evidence / meta-evidence URI.
pub const MAX_URI_LEN: usize = 2048;

/// Default arbitration base fee, in thousandths of the base currency
/// unit (0.001). Kept as scaled integer parts; `ArbitrationConfig`
/// assembles the `Decimal`.
pub const DEFAULT_BASE_FEE_MANTISSA: i64 = 1;
pub const DEFAULT_BASE_FEE_SCALE: u32 = 3;

/// Default guardian / maintenance fee (0.01 base currency units).
pub const DEFAULT_GUARDIAN_FEE_MANTISSA: i64 = 1;
pub const DEFAULT_GUARDIAN_FEE_SCALE: u32 = 2;

/// Default signaling period for SignalBased safes, in seconds (30 days).
pub const DEFAULT_SIGNALING_PERIOD_SECS: u64 = 30 * 24 * 60 * 60;
