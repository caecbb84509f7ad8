//! Handlers for games, guesses and stats.
//!
//! Player routes identify the player by the `x-player-token` header. A
//! request without one gets a freshly allocated token, echoed back in the
//! response header so the client can keep using it. Player routes never
//! expose the answer.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use wording_core::tokens::is_url_safe;
use wording_core::types::{Game, GameState, PlayStatus, Stats};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request and response header carrying the player token.
pub const PLAYER_TOKEN_HEADER: &str = "x-player-token";

/// Header pair returned on every player route.
type PlayerHeader = [(&'static str, String); 1];

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /games`.
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub answer: String,
    pub guess_limit: i32,
}

/// Body of `POST /games/{token}/guesses`.
#[derive(Debug, Deserialize)]
pub struct SubmitGuessRequest {
    pub guess: String,
}

/// What a player sees of a game.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub token: String,
    pub word_length: usize,
    pub guess_limit: i32,
    pub status: PlayStatus,
    pub state: GameState,
}

impl PlayerView {
    fn new(game: &Game, state: GameState) -> Self {
        Self {
            token: game.token.clone(),
            word_length: game.word_length(),
            guess_limit: game.guess_limit,
            status: state.status(),
            state,
        }
    }
}

/// What the game author sees.
#[derive(Debug, Serialize)]
pub struct ManageView {
    pub game: Game,
    pub stats: Stats,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the caller's player token, allocating one when none was sent.
async fn player_token(state: &AppState, headers: &HeaderMap) -> AppResult<String> {
    let Some(value) = headers.get(PLAYER_TOKEN_HEADER) else {
        return Ok(state.service.new_player_token().await);
    };

    let token = value
        .to_str()
        .map_err(|_| AppError::BadRequest(format!("{PLAYER_TOKEN_HEADER} is not valid text")))?
        .trim();

    if token.is_empty() {
        return Ok(state.service.new_player_token().await);
    }
    if !is_url_safe(token) {
        return Err(AppError::BadRequest(format!(
            "{PLAYER_TOKEN_HEADER} contains unsupported characters"
        )));
    }
    Ok(token.to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/stats
///
/// Lifetime counters. A failed read is logged and reported as zeros so
/// the landing page keeps working.
pub async fn lifetime_stats(State(state): State<AppState>) -> Json<DataResponse<Stats>> {
    let stats = state.service.stats().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to read lifetime stats");
        Stats::default()
    });
    Json(DataResponse { data: stats })
}

/// POST /api/v1/games
pub async fn create_game(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGameRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Game>>)> {
    let game = state
        .service
        .create_game(&input.answer, input.guess_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// GET /api/v1/manage/{admin_token}
pub async fn manage_view(
    State(state): State<AppState>,
    Path(admin_token): Path<String>,
) -> AppResult<Json<DataResponse<ManageView>>> {
    let game = state.service.game(&admin_token).await?;
    let stats = state.service.game_stats(&admin_token).await?;
    Ok(Json(DataResponse {
        data: ManageView { game, stats },
    }))
}

/// DELETE /api/v1/manage/{admin_token}
pub async fn delete_game(
    State(state): State<AppState>,
    Path(admin_token): Path<String>,
) -> AppResult<StatusCode> {
    state.service.delete_game(&admin_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/games/{token}
pub async fn player_view(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> AppResult<(PlayerHeader, Json<DataResponse<PlayerView>>)> {
    let game = state.service.game_by_token(&token).await?;
    let player = player_token(&state, &headers).await?;
    let progress = state.service.game_state(&game.token, &player).await?;

    Ok((
        [(PLAYER_TOKEN_HEADER, player)],
        Json(DataResponse {
            data: PlayerView::new(&game, progress),
        }),
    ))
}

/// POST /api/v1/games/{token}/guesses
///
/// Returns 422 for a rejected guess, 409 once the player has won or run
/// out of guesses.
pub async fn submit_guess(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    AppJson(input): AppJson<SubmitGuessRequest>,
) -> AppResult<(PlayerHeader, Json<DataResponse<PlayerView>>)> {
    let game = state.service.game_by_token(&token).await?;
    let player = player_token(&state, &headers).await?;
    let progress = state
        .service
        .submit_guess(&game.token, &player, &input.guess)
        .await?;

    tracing::info!(
        game = %game.token,
        status = ?progress.status(),
        "Guess submitted"
    );

    Ok((
        [(PLAYER_TOKEN_HEADER, player)],
        Json(DataResponse {
            data: PlayerView::new(&game, progress),
        }),
    ))
}
