//! Per-request authorization gate.
//!
//! Stateless: every request is classified from the route it targets and
//! whether it carries a valid session.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

use crate::auth::bootstrap::ensure_default_tier;
use crate::auth::{extract_session_token, CurrentUser, UserId};
use crate::state::AppState;

const PROTECTED_PREFIXES: &[&str] = &["/events"];
const AUTH_PREFIXES: &[&str] = &["/sign-in", "/sign-up"];

/// Where anonymous users on protected routes, and signed-in users on auth
/// routes, are sent.
pub const HOME: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectHome,
}

pub fn classify(is_protected: bool, is_auth_route: bool, is_authenticated: bool) -> GuardDecision {
    match (is_protected, is_auth_route, is_authenticated) {
        (true, _, false) => GuardDecision::RedirectHome,
        (_, true, true) => GuardDecision::RedirectHome,
        _ => GuardDecision::Allow,
    }
}

fn matches_prefix(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

pub fn is_protected_route(path: &str) -> bool {
    matches_prefix(path, PROTECTED_PREFIXES)
}

pub fn is_auth_route(path: &str) -> bool {
    matches_prefix(path, AUTH_PREFIXES)
}

/// Resolves the session, applies `classify`, and for signed-in users runs the
/// default tier bootstrap before attaching `CurrentUser` to the request.
pub async fn route_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let token = extract_session_token(req.headers());
    let user_id = resolve_user(&state, token.as_deref()).await;

    let decision = classify(
        is_protected_route(&path),
        is_auth_route(&path),
        user_id.is_some(),
    );

    if decision == GuardDecision::RedirectHome {
        debug!(path = %path, authenticated = user_id.is_some(), "Redirecting to home");
        return Redirect::to(HOME).into_response();
    }

    if let Some(id) = user_id {
        let outcome = ensure_default_tier(state.auth.as_ref(), &id, &state.tier_rank).await;
        req.extensions_mut().insert(CurrentUser {
            id,
            tier: outcome.tier().map(str::to_string),
        });
    }

    next.run(req).await
}

/// Provider failures are treated as "not signed in" rather than failing the
/// request; protected routes then redirect like any anonymous visit.
async fn resolve_user(state: &AppState, token: Option<&str>) -> Option<UserId> {
    let token = token?;
    match state.auth.resolve_session(token).await {
        Ok(user) => user,
        Err(e) => {
            warn!("Session lookup failed, treating request as anonymous: {e}");
            None
        }
    }
}
