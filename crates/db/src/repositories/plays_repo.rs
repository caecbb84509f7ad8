//! Repository for the `attempts` table.

use sqlx::PgPool;

use crate::models::AttemptsRow;

/// Reads and replaces one player's guesses against a game.
pub struct PlaysRepo;

impl PlaysRepo {
    /// Find the guesses a player has made against a game.
    pub async fn find(
        pool: &PgPool,
        game_token: &str,
        player_token: &str,
    ) -> Result<Option<AttemptsRow>, sqlx::Error> {
        sqlx::query_as::<_, AttemptsRow>(
            "SELECT guesses FROM attempts WHERE game_token = $1 AND player_token = $2",
        )
        .bind(game_token)
        .bind(player_token)
        .fetch_optional(pool)
        .await
    }

    /// Replace the full guess list for a player, creating the row if needed,
    /// and mark the game modified.
    pub async fn upsert(
        pool: &PgPool,
        game_token: &str,
        player_token: &str,
        guesses: &[String],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO attempts (game_token, player_token, guesses) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (game_token, player_token) \
             DO UPDATE SET guesses = EXCLUDED.guesses",
        )
        .bind(game_token)
        .bind(player_token)
        .bind(guesses)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE games SET accessed_at = NOW(), modified_at = NOW() WHERE token = $1")
            .bind(game_token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
}
