//! Per-chip register data.
//!
//! Physical addresses, register offsets and pin layout tables, kept as
//! literal data. Entries are copied from vendor tables and verified on real
//! boards; apparent inconsistencies are flagged in place rather than fixed.

pub mod layout;

#[cfg(feature = "cv180")]
pub mod cv180;
#[cfg(feature = "th1520")]
pub mod th1520;
