//! Tier model and the access policy derived from it.
//!
//! A user sees content of their own tier and every tier below it. The rank
//! is injected configuration, never a global.

pub mod access;
pub mod rank;

pub use access::TierAccess;
pub use rank::{Tier, TierError, TierRank};
