use anyhow::{Context, Result};

use crate::tier::TierRank;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or the tier rank is
/// malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub auth_api_url: String,
    pub auth_secret_key: String,
    /// Hosted sign-in/sign-up pages; `/sign-in` and `/sign-up` answer 501 without them.
    pub auth_sign_in_url: Option<String>,
    pub auth_sign_up_url: Option<String>,
    pub tier_rank: TierRank,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let tier_rank = match optional_env("TIER_RANK") {
            Some(list) => TierRank::parse(&list).context("TIER_RANK is not a valid tier list")?,
            None => TierRank::default(),
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            auth_api_url: require_env("AUTH_API_URL")?,
            auth_secret_key: require_env("AUTH_SECRET_KEY")?,
            auth_sign_in_url: optional_env("AUTH_SIGN_IN_URL"),
            auth_sign_up_url: optional_env("AUTH_SIGN_UP_URL"),
            tier_rank,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
