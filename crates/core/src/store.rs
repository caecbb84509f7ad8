//! Persistence capability consumed by the game service.
//!
//! Implementations live in `wording-db`. Every lookup reports absence as
//! [`StoreError::NotFound`] so the service can tell it apart from backend
//! failures.

use async_trait::async_trait;

use crate::types::{Game, Plays, Stats, StatsIncrement};

/// Errors from a [`Store`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("not found")]
    NotFound,

    /// A record with the same unique key already exists.
    #[error("conflicting record already exists")]
    Conflict,

    /// Any other failure of the underlying storage.
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// Persistence for games, per-player plays and stats counters.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a new game. `Conflict` when either token is already taken.
    async fn create_game(&self, game: &Game) -> Result<Game, StoreError>;

    /// Fetch a game by its admin token.
    async fn game(&self, admin_token: &str) -> Result<Game, StoreError>;

    /// Fetch a game by its player-facing token.
    async fn game_by_token(&self, token: &str) -> Result<Game, StoreError>;

    /// Fetch one player's guesses against a game. `NotFound` when the
    /// player has never guessed.
    async fn plays(&self, game_token: &str, player_token: &str) -> Result<Plays, StoreError>;

    /// Replace one player's guesses against a game with `plays`.
    async fn put_plays(
        &self,
        game_token: &str,
        player_token: &str,
        plays: &Plays,
    ) -> Result<(), StoreError>;

    /// Add `increment.delta` to the counters of `increment.scope`.
    async fn increment_stats(&self, increment: &StatsIncrement) -> Result<(), StoreError>;

    /// Lifetime counters. Zeroes when nothing was recorded yet.
    async fn stats(&self) -> Result<Stats, StoreError>;

    /// Counters for the game identified by `admin_token`. `NotFound` when
    /// no such game exists.
    async fn game_stats(&self, admin_token: &str) -> Result<Stats, StoreError>;

    /// Delete a game together with every play and counter scoped to it.
    async fn delete_game(&self, admin_token: &str) -> Result<(), StoreError>;

    /// Cheap liveness probe for health endpoints.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
