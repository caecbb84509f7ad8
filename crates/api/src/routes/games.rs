//! Route definitions for games, guesses and stats.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// Game routes, mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(games::lifetime_stats))
        .route("/games", post(games::create_game))
        .route("/games/{token}", get(games::player_view))
        .route("/games/{token}/guesses", post(games::submit_guess))
        .route(
            "/manage/{admin_token}",
            get(games::manage_view).delete(games::delete_game),
        )
}
