mod auth;
mod config;
mod db;
mod errors;
mod events;
mod models;
mod routes;
mod state;
mod tier;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::client::IdentityClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::events::PgEventStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting showcase v{}", env!("CARGO_PKG_VERSION"));

    let tier_names: Vec<_> = config.tier_rank.tiers().iter().map(|t| t.as_str()).collect();
    info!("Tier rank: {}", tier_names.join(" < "));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize identity provider client
    let identity = IdentityClient::new(&config.auth_api_url, config.auth_secret_key.clone())
        .context("Failed to build identity provider client")?;
    info!("Identity provider client initialized ({})", config.auth_api_url);

    let state = AppState::new(&config, Arc::new(identity), Arc::new(PgEventStore::new(db)));

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict CORS origins to the deployed frontend
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
