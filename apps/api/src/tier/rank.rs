use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tier names shipped when `TIER_RANK` is not configured, lowest first.
pub const DEFAULT_TIERS: &[&str] = &["free", "silver", "gold", "platinum"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierError {
    #[error("Tier rank must contain at least one tier")]
    EmptyRank,

    #[error("Tier '{0}' appears more than once in the rank")]
    DuplicateTier(String),

    #[error("Invalid tier name '{0}'")]
    InvalidName(String),

    #[error("Tier '{0}' is not part of the configured rank")]
    InvalidTier(String),
}

/// A single access level. Always lowercase, non-empty, `[a-z0-9_-]` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tier(String);

impl Tier {
    pub fn new(name: &str) -> Result<Self, TierError> {
        let name = name.trim().to_lowercase();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TierError::InvalidName(name));
        }
        Ok(Tier(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label: first letter uppercased ("gold" -> "Gold").
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            None => String::new(),
            Some(f) => f.to_uppercase().to_string() + chars.as_str(),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::new(s)
    }
}

impl TryFrom<String> for Tier {
    type Error = TierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tier::new(&value)
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl PartialEq<str> for Tier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Total order over tiers, lowest privilege first.
///
/// Constructed once from configuration and shared through `AppState`, so
/// tests can inject their own ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRank {
    tiers: Vec<Tier>,
}

impl TierRank {
    pub fn new<I, S>(names: I) -> Result<Self, TierError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tiers: Vec<Tier> = Vec::new();
        for name in names {
            let tier = Tier::new(name.as_ref())?;
            if tiers.contains(&tier) {
                return Err(TierError::DuplicateTier(tier.0));
            }
            tiers.push(tier);
        }
        if tiers.is_empty() {
            return Err(TierError::EmptyRank);
        }
        Ok(Self { tiers })
    }

    /// Parses a comma-separated list such as `free,silver,gold`.
    pub fn parse(list: &str) -> Result<Self, TierError> {
        Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn lowest(&self) -> &Tier {
        &self.tiers[0]
    }

    pub fn highest(&self) -> &Tier {
        &self.tiers[self.tiers.len() - 1]
    }

    pub fn index_of(&self, tier: &str) -> Result<usize, TierError> {
        self.tiers
            .iter()
            .position(|t| t == tier)
            .ok_or_else(|| TierError::InvalidTier(tier.to_string()))
    }
}

impl Default for TierRank {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS.iter().map(|t| Tier(t.to_string())).collect(),
        }
    }
}
