//! HTTP REST API routes

mod dice_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Rolling
        .route("/api/dice/roll", post(dice_routes::roll_with_settings))
        .route("/api/dice/v5/roll", post(dice_routes::roll_v5))
        .route("/api/dice/v20/roll", post(dice_routes::roll_v20))
        .route("/api/dice/v5/willpower", post(dice_routes::willpower_roll))
        // Externally resolved rolls
        .route("/api/dice/v5/results", post(dice_routes::ingest_v5))
        .route("/api/dice/v20/results", post(dice_routes::ingest_v20))
        // History
        .route(
            "/api/dice/history",
            get(dice_routes::list_history).delete(dice_routes::clear_history),
        )
        .route("/api/dice/history/{id}", get(dice_routes::get_roll))
        .route("/api/dice/history/{id}/reroll", post(dice_routes::reroll))
        // V5 checks
        .route("/api/dice/v5/rouse", post(dice_routes::rouse_check))
        .route("/api/dice/v5/frenzy", post(dice_routes::frenzy_check))
        .route("/api/dice/v5/remorse", post(dice_routes::remorse_check))
        // Opposed and extended rolls
        .route("/api/dice/v5/contested", post(dice_routes::contested_v5))
        .route("/api/dice/v20/resisted", post(dice_routes::resisted_v20))
        .route("/api/dice/v20/extended", post(dice_routes::extended_v20))
        // Settings
        .route(
            "/api/dice/settings",
            get(dice_routes::get_settings).put(dice_routes::update_settings),
        )
        .route("/api/dice/settings/reset", post(dice_routes::reset_settings))
}
