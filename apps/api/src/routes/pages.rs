use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tier::{Tier, TierRank};

pub const EVENTS_PATH: &str = "/events";

#[derive(Debug, Serialize)]
pub struct TierCard {
    pub tier: Tier,
    pub label: String,
    pub blurb: String,
}

#[derive(Debug, Serialize)]
pub struct LandingResponse {
    pub title: &'static str,
    pub tiers: Vec<TierCard>,
    pub call_to_action: String,
}

fn blurb_for(tier: &Tier, is_lowest: bool, is_highest: bool) -> String {
    match tier.as_str() {
        "free" => "Basic access to free events.".to_string(),
        "silver" => "Gets all the Silver tier perks and event showcase.".to_string(),
        "gold" => "Access to premium gold tier and below tier events.".to_string(),
        "platinum" => "All-access pass for platinum tier and all below tiers content.".to_string(),
        _ if is_lowest => format!("Basic access to {} events.", tier.as_str()),
        _ if is_highest => format!("All-access pass for {} tier and everything below it.", tier.as_str()),
        _ => format!("Access to {} tier events and every tier below it.", tier.as_str()),
    }
}

impl LandingResponse {
    pub fn build(rank: &TierRank) -> Self {
        let last = rank.len() - 1;
        let tiers = rank
            .tiers()
            .iter()
            .enumerate()
            .map(|(i, tier)| TierCard {
                tier: tier.clone(),
                label: format!("{} Tier", tier.label()),
                blurb: blurb_for(tier, i == 0, i == last),
            })
            .collect();
        Self {
            title: "Welcome to the Tier-Based Event Showcase",
            tiers,
            call_to_action: format!(
                "Sign up to start with {} tier and explore events!",
                rank.lowest().label()
            ),
        }
    }
}

/// GET /
/// Signed-in users go straight to their listing.
pub async fn handle_landing(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    if user.is_some() {
        return Redirect::to(EVENTS_PATH).into_response();
    }
    Json(LandingResponse::build(&state.tier_rank)).into_response()
}

/// GET /upgrade
pub async fn handle_upgrade() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

/// GET /sign-in
pub async fn handle_sign_in(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state
        .sign_in_url
        .as_deref()
        .map(Redirect::to)
        .ok_or(AppError::NotImplemented)
}

/// GET /sign-up
pub async fn handle_sign_up(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state
        .sign_up_url
        .as_deref()
        .map(Redirect::to)
        .ok_or(AppError::NotImplemented)
}
