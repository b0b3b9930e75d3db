//! Default tier assignment on first authenticated access.
//!
//! Best effort: a failed lookup or write is logged and the request carries
//! on. Authorization treats an unset tier as the lowest tier anyway, so a
//! write that never lands only delays persistence, it never grants access.

use tracing::{error, info};

use crate::auth::{AuthProvider, UserId};
use crate::tier::TierRank;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The user already had a tier; nothing was written.
    AlreadySet(String),
    /// The lowest tier was written for a user who had none.
    Assigned(String),
    /// Lookup or write failed; the stored tier is unknown.
    Failed,
}

impl BootstrapOutcome {
    /// The tier the provider holds after this step, if known.
    pub fn tier(&self) -> Option<&str> {
        match self {
            BootstrapOutcome::AlreadySet(t) | BootstrapOutcome::Assigned(t) => Some(t.as_str()),
            BootstrapOutcome::Failed => None,
        }
    }
}

/// Assigns `rank.lowest()` to a user with no tier attribute. Never
/// overwrites an existing tier, so calling it repeatedly is a no-op.
pub async fn ensure_default_tier(
    provider: &dyn AuthProvider,
    user_id: &UserId,
    rank: &TierRank,
) -> BootstrapOutcome {
    let existing = match provider.get_tier(user_id).await {
        Ok(tier) => tier,
        Err(e) => {
            error!(user_id = %user_id, "Error checking user tier: {e}");
            return BootstrapOutcome::Failed;
        }
    };

    if let Some(tier) = existing.filter(|t| !t.is_empty()) {
        return BootstrapOutcome::AlreadySet(tier);
    }

    let default_tier = rank.lowest().as_str();
    info!(user_id = %user_id, tier = default_tier, "Setting default tier for user");

    match provider.set_tier(user_id, default_tier).await {
        Ok(()) => BootstrapOutcome::Assigned(default_tier.to_string()),
        Err(e) => {
            error!(user_id = %user_id, "Error setting default tier: {e}");
            BootstrapOutcome::Failed
        }
    }
}
