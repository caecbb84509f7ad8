//! Repository for the `games` table.

use sqlx::PgPool;
use wording_core::types::Game;

use crate::models::GameRow;

const COLUMNS: &str = "admin_token, token, answer, guess_limit, created_at";

/// Provides create, lookup and delete operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game, returning the stored row.
    pub async fn create(pool: &PgPool, game: &Game) -> Result<GameRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (admin_token, token, answer, guess_limit, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameRow>(&query)
            .bind(&game.admin_token)
            .bind(&game.token)
            .bind(&game.answer)
            .bind(game.guess_limit)
            .bind(game.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a game by admin token, bumping its `accessed_at`.
    pub async fn find_by_admin_token(
        pool: &PgPool,
        admin_token: &str,
    ) -> Result<Option<GameRow>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET accessed_at = NOW() \
             WHERE admin_token = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameRow>(&query)
            .bind(admin_token)
            .fetch_optional(pool)
            .await
    }

    /// Find a game by its player-facing token, bumping its `accessed_at`.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<GameRow>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET accessed_at = NOW() \
             WHERE token = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameRow>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Delete a game, its attempts and its stats row in one transaction.
    ///
    /// Returns `false` when no game has this admin token.
    pub async fn delete(pool: &PgPool, admin_token: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let token: Option<String> =
            sqlx::query_scalar("SELECT token FROM games WHERE admin_token = $1 FOR UPDATE")
                .bind(admin_token)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(token) = token else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM attempts WHERE game_token = $1")
            .bind(&token)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM stats WHERE scope = $1")
            .bind(&token)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM games WHERE admin_token = $1")
            .bind(admin_token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
