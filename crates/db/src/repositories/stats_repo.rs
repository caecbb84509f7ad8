//! Repository for the `stats` table.

use sqlx::PgPool;

use crate::models::StatsRow;

const COLUMNS: &str = "games_created, games_won, guesses_made";

/// Additive counters keyed by scope.
pub struct StatsRepo;

impl StatsRepo {
    /// Add the given amounts to the counters of `scope`, creating the row
    /// on first use. The addition happens inside the statement so concurrent
    /// increments never overwrite each other.
    pub async fn increment(
        pool: &PgPool,
        scope: &str,
        delta: &StatsRow,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO stats (scope, games_created, games_won, guesses_made) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (scope) DO UPDATE SET \
                 games_created = stats.games_created + EXCLUDED.games_created, \
                 games_won = stats.games_won + EXCLUDED.games_won, \
                 guesses_made = stats.guesses_made + EXCLUDED.guesses_made",
        )
        .bind(scope)
        .bind(delta.games_created)
        .bind(delta.games_won)
        .bind(delta.guesses_made)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Counters for `scope`, if any were ever recorded.
    pub async fn find(pool: &PgPool, scope: &str) -> Result<Option<StatsRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stats WHERE scope = $1");
        sqlx::query_as::<_, StatsRow>(&query)
            .bind(scope)
            .fetch_optional(pool)
            .await
    }

    /// Counters for the game with this admin token. `None` when the game
    /// does not exist; zeroes when it exists but has no stats row yet.
    pub async fn find_for_game(
        pool: &PgPool,
        admin_token: &str,
    ) -> Result<Option<StatsRow>, sqlx::Error> {
        sqlx::query_as::<_, StatsRow>(
            "SELECT COALESCE(s.games_created, 0) AS games_created, \
                    COALESCE(s.games_won, 0) AS games_won, \
                    COALESCE(s.guesses_made, 0) AS guesses_made \
             FROM games g \
             LEFT JOIN stats s ON s.scope = g.token \
             WHERE g.admin_token = $1",
        )
        .bind(admin_token)
        .fetch_optional(pool)
        .await
    }
}
