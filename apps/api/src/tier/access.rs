use tracing::warn;

use crate::tier::rank::{Tier, TierError, TierRank};

/// A user's position in the rank, computed once.
///
/// Allowed, withheld and next tier are all derived from the same index, so
/// `allowed ++ withheld == rank` always holds. `for_tier` is the strict entry
/// point and rejects names outside the rank with `TierError::InvalidTier`.
#[derive(Debug, Clone, Copy)]
pub struct TierAccess<'a> {
    rank: &'a TierRank,
    index: usize,
}

impl<'a> TierAccess<'a> {
    pub fn for_tier(rank: &'a TierRank, tier: &str) -> Result<Self, TierError> {
        let index = rank.index_of(tier)?;
        Ok(Self { rank, index })
    }

    /// Lenient lookup for stored attributes: unset falls back to the lowest
    /// tier, and so does any value missing from the rank.
    pub fn resolve(rank: &'a TierRank, stored: Option<&str>) -> Self {
        let index = match stored {
            None => 0,
            Some(raw) => match rank.index_of(raw) {
                Ok(index) => index,
                Err(_) => {
                    warn!(tier = raw, "Unknown tier value, falling back to lowest tier");
                    0
                }
            },
        };
        Self { rank, index }
    }

    pub fn tier(&self) -> &'a Tier {
        &self.rank.tiers()[self.index]
    }

    pub fn allowed_tiers(&self) -> &'a [Tier] {
        &self.rank.tiers()[..=self.index]
    }

    pub fn withheld_tiers(&self) -> &'a [Tier] {
        &self.rank.tiers()[self.index + 1..]
    }

    pub fn next_tier(&self) -> Option<&'a Tier> {
        self.rank.tiers().get(self.index + 1)
    }

    pub fn is_highest(&self) -> bool {
        self.tier() == self.rank.highest()
    }
}
