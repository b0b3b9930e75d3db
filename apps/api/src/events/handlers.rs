//! Axum route handlers for the event listing.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::error;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::event::EventRow;
use crate::state::AppState;
use crate::tier::{Tier, TierAccess};

pub const UPGRADE_PATH: &str = "/upgrade";
const EMPTY_TITLE: &str = "No events available";
const EMPTY_MESSAGE: &str = "No events found for your current tier.";

#[derive(Debug, Serialize)]
pub struct UpgradePrompt {
    pub tier: Tier,
    pub label: String,
    pub href: &'static str,
}

/// Shown in place of the listing when no allowed tier has events.
#[derive(Debug, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub tier: Tier,
    pub allowed_tiers: Vec<Tier>,
    pub withheld_tiers: Vec<Tier>,
    pub next_tier: Option<Tier>,
    pub upgrade: Option<UpgradePrompt>,
    /// Holds the top tier of the rank.
    pub premium: bool,
    pub events: Vec<EventRow>,
    pub empty: Option<EmptyState>,
}

impl EventListResponse {
    pub fn build(access: &TierAccess<'_>, events: Vec<EventRow>) -> Self {
        let empty = events.is_empty().then_some(EmptyState {
            title: EMPTY_TITLE,
            message: EMPTY_MESSAGE,
        });
        let upgrade = access.next_tier().map(|next| UpgradePrompt {
            tier: next.clone(),
            label: match empty {
                Some(_) => format!("Upgrade to {} for More Events", next.label()),
                None => format!("Upgrade to {}", next.label()),
            },
            href: UPGRADE_PATH,
        });
        Self {
            tier: access.tier().clone(),
            allowed_tiers: access.allowed_tiers().to_vec(),
            withheld_tiers: access.withheld_tiers().to_vec(),
            next_tier: access.next_tier().cloned(),
            upgrade,
            premium: access.is_highest(),
            events,
            empty,
        }
    }
}

/// GET /events
pub async fn handle_list_events(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Result<Json<EventListResponse>, AppError> {
    let Extension(user) = user.ok_or(AppError::Unauthorized)?;

    let access = TierAccess::resolve(&state.tier_rank, user.tier.as_deref());
    let events = state
        .events
        .list_for_tiers(access.allowed_tiers())
        .await
        .map_err(|e| {
            error!(user_id = %user.id, "Error loading events: {e}");
            AppError::Database(e)
        })?;

    Ok(Json(EventListResponse::build(&access, events)))
}
