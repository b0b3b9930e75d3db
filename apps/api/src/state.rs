use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::Config;
use crate::events::EventStore;
use crate::tier::TierRank;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable identity provider. Default: `IdentityClient` over HTTP.
    pub auth: Arc<dyn AuthProvider>,
    /// Pluggable event source. Default: `PgEventStore`.
    pub events: Arc<dyn EventStore>,
    pub tier_rank: Arc<TierRank>,
    pub sign_in_url: Option<String>,
    pub sign_up_url: Option<String>,
}

impl AppState {
    pub fn new(
        config: &Config,
        auth: Arc<dyn AuthProvider>,
        events: Arc<dyn EventStore>,
    ) -> Self {
        Self {
            auth,
            events,
            tier_rank: Arc::new(config.tier_rank.clone()),
            sign_in_url: config.auth_sign_in_url.clone(),
            sign_up_url: config.auth_sign_up_url.clone(),
        }
    }
}
