pub mod health;
pub mod pages;

use axum::{middleware, routing::get, Router};

use crate::auth::guard::route_guard;
use crate::events::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(pages::handle_landing))
        .route("/events", get(handlers::handle_list_events))
        .route("/upgrade", get(pages::handle_upgrade))
        .route("/sign-in", get(pages::handle_sign_in))
        .route("/sign-up", get(pages::handle_sign_up))
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .with_state(state)
}
