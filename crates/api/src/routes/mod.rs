pub mod games;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /stats                           lifetime stats (GET)
///
/// /games                           create (POST)
/// /games/{token}                   player's view of a game (GET)
/// /games/{token}/guesses           submit a guess (POST)
///
/// /manage/{admin_token}            game + stats (GET), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(games::router())
}
