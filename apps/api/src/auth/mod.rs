//! Identity provider seam.
//!
//! The service only needs three things from the provider: who owns a
//! session, what tier a user holds, and a way to set that tier. Everything
//! else about users stays on the provider's side.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod bootstrap;
pub mod client;
pub mod guard;
#[cfg(test)]
pub mod memory;

/// Cookie the hosted sign-in flow stores the session token in.
pub const SESSION_COOKIE: &str = "__session";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity provider error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid identity provider URL: {0}")]
    InvalidUrl(String),
}

/// Provider-assigned user identifier (opaque string, e.g. `user_2abc...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The slice of a user's public metadata this service reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

/// The authenticated user for the current request, attached by the route
/// guard as a request extension.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: UserId,
    /// Tier attribute as stored by the provider; `None` when unset.
    pub tier: Option<String>,
}

/// Carried in `AppState` as `Arc<dyn AuthProvider>`.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves a session token to its owner, or `None` if the session is
    /// unknown or expired.
    async fn resolve_session(&self, token: &str) -> Result<Option<UserId>, AuthError>;

    async fn get_tier(&self, user_id: &UserId) -> Result<Option<String>, AuthError>;

    async fn set_tier(&self, user_id: &UserId, tier: &str) -> Result<(), AuthError>;
}

/// Pulls the session token from `Authorization: Bearer` or the session cookie.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    for cookie_header in headers.get_all(header::COOKIE) {
        let Ok(cookies) = cookie_header.to_str() else {
            continue;
        };
        for pair in cookies.split(';') {
            if let Some((name, val)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !val.is_empty() {
                    return Some(val.to_string());
                }
            }
        }
    }

    None
}
