//! Limits for dynamic geometry (internal).
//!
//! Policy
//! - Fixed constants; tolerances belong to the field (`DblCfg::eps`), not here.

/// Draws a dynamic object attempts before giving up with `Error::State`.
///
/// A fresh draw satisfies its probe with probability one on continuous fields;
/// the bound only matters for degenerate dependencies (zero-length segment,
/// zero-radius circle) and small prime fields.
pub(crate) const REGEN_ATTEMPTS: usize = 64;
