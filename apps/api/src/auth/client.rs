//! HTTP client for the identity provider's backend API.
//!
//! Endpoints used:
//! - `GET   /v1/sessions/{token}`      -> `{ "user_id": "..." }`
//! - `GET   /v1/users/{id}`            -> `{ "id": "...", "public_metadata": { ... } }`
//! - `PATCH /v1/users/{id}/metadata`   <- `{ "public_metadata": { "tier": "..." } }`
//!
//! Every call carries the secret key as a bearer token. No retries: a failed
//! call is reported to the caller, which decides whether it matters.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::{AuthError, AuthProvider, UserId, UserMetadata};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const API_VERSION: &str = "v1";

#[derive(Debug, Deserialize)]
struct SessionResponse {
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[allow(dead_code)]
    id: String,
    #[serde(default)]
    public_metadata: UserMetadata,
}

#[derive(Debug, Serialize)]
struct MetadataUpdate<'a> {
    public_metadata: TierPatch<'a>,
}

#[derive(Debug, Serialize)]
struct TierPatch<'a> {
    tier: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    errors: Vec<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    api_url: Url,
    secret_key: String,
}

impl IdentityClient {
    pub fn new(api_url: &str, secret_key: String) -> Result<Self, AuthError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| AuthError::InvalidUrl(format!("{api_url}: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(AuthError::InvalidUrl(api_url.to_string()));
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_url,
            secret_key,
        })
    }

    /// Appends `v1` and each segment to the base URL. Segments are
    /// percent-encoded, `/` included, so caller-supplied values such as
    /// session tokens can never leave their path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AuthError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AuthError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .push(API_VERSION)
            .extend(segments);
        Ok(url)
    }

    async fn fetch_user(&self, user_id: &UserId) -> Result<UserResponse, AuthError> {
        let response = self
            .client
            .get(self.endpoint(&["users", &user_id.0])?)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AuthError::UserNotFound(user_id.0.clone()));
        }
        Ok(ensure_success(response).await?.json().await?)
    }
}

#[async_trait]
impl AuthProvider for IdentityClient {
    async fn resolve_session(&self, token: &str) -> Result<Option<UserId>, AuthError> {
        let response = self
            .client
            .get(self.endpoint(&["sessions", token])?)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                debug!("Session token rejected by identity provider");
                Ok(None)
            }
            _ => {
                let session: SessionResponse = ensure_success(response).await?.json().await?;
                Ok(Some(UserId(session.user_id)))
            }
        }
    }

    async fn get_tier(&self, user_id: &UserId) -> Result<Option<String>, AuthError> {
        let user = self.fetch_user(user_id).await?;
        Ok(user.public_metadata.tier.filter(|t| !t.is_empty()))
    }

    async fn set_tier(&self, user_id: &UserId, tier: &str) -> Result<(), AuthError> {
        let body = MetadataUpdate {
            public_metadata: TierPatch { tier },
        };
        let response = self
            .client
            .patch(self.endpoint(&["users", &user_id.0, "metadata"])?)
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await?;
        debug!(user_id = %user_id, tier, "Updated tier metadata");
        Ok(())
    }
}

/// Timeouts and connection failures mean the provider is unreachable; other
/// transport errors pass through unchanged.
fn transport_error(e: reqwest::Error) -> AuthError {
    if e.is_timeout() || e.is_connect() {
        AuthError::Unavailable(e.to_string())
    } else {
        AuthError::Http(e)
    }
}

/// Maps non-2xx responses to `AuthError::Api`, pulling the provider's error
/// message out of the body when it has the usual shape.
async fn ensure_success(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AuthError::Api {
        status: status.as_u16(),
        message: parse_error_message(&body),
    })
}

fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ProviderError>(body)
        .ok()
        .and_then(|e| e.errors.into_iter().next())
        .map(|e| e.message)
        .unwrap_or_else(|| body.to_string())
}
