//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;
use wording_core::store::{Store, StoreError};
use wording_core::types::{Game, Plays, Stats, StatsIncrement, LIFETIME_SCOPE};

use crate::models::StatsRow;
use crate::repositories::{GameRepo, PlaysRepo, StatsRepo};
use crate::DbPool;

/// [`Store`] over a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

fn backend(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::Conflict
        }
        _ => StoreError::backend(err),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_game(&self, game: &Game) -> Result<Game, StoreError> {
        let row = GameRepo::create(&self.pool, game).await.map_err(backend)?;
        Ok(row.into())
    }

    async fn game(&self, admin_token: &str) -> Result<Game, StoreError> {
        GameRepo::find_by_admin_token(&self.pool, admin_token)
            .await
            .map_err(backend)?
            .map(Game::from)
            .ok_or(StoreError::NotFound)
    }

    async fn game_by_token(&self, token: &str) -> Result<Game, StoreError> {
        GameRepo::find_by_token(&self.pool, token)
            .await
            .map_err(backend)?
            .map(Game::from)
            .ok_or(StoreError::NotFound)
    }

    async fn plays(&self, game_token: &str, player_token: &str) -> Result<Plays, StoreError> {
        PlaysRepo::find(&self.pool, game_token, player_token)
            .await
            .map_err(backend)?
            .map(Plays::from)
            .ok_or(StoreError::NotFound)
    }

    async fn put_plays(
        &self,
        game_token: &str,
        player_token: &str,
        plays: &Plays,
    ) -> Result<(), StoreError> {
        PlaysRepo::upsert(&self.pool, game_token, player_token, &plays.attempts)
            .await
            .map_err(backend)
    }

    async fn increment_stats(&self, increment: &StatsIncrement) -> Result<(), StoreError> {
        let delta = StatsRow {
            games_created: increment.delta.games_created,
            games_won: increment.delta.games_won,
            guesses_made: increment.delta.guesses_made,
        };
        StatsRepo::increment(&self.pool, increment.scope.key(), &delta)
            .await
            .map_err(backend)
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        let row = StatsRepo::find(&self.pool, LIFETIME_SCOPE)
            .await
            .map_err(backend)?;
        Ok(row.map(Stats::from).unwrap_or_default())
    }

    async fn game_stats(&self, admin_token: &str) -> Result<Stats, StoreError> {
        StatsRepo::find_for_game(&self.pool, admin_token)
            .await
            .map_err(backend)?
            .map(Stats::from)
            .ok_or(StoreError::NotFound)
    }

    async fn delete_game(&self, admin_token: &str) -> Result<(), StoreError> {
        if GameRepo::delete(&self.pool, admin_token)
            .await
            .map_err(backend)?
        {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(backend)
    }
}
