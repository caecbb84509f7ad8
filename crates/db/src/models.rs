//! Row types for the `games`, `attempts` and `stats` tables.

use sqlx::FromRow;
use wording_core::types::{Game, Plays, Stats, Timestamp};

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow)]
pub struct GameRow {
    pub admin_token: String,
    pub token: String,
    pub answer: String,
    pub guess_limit: i32,
    pub created_at: Timestamp,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Self {
            admin_token: row.admin_token,
            token: row.token,
            answer: row.answer,
            guess_limit: row.guess_limit,
            created_at: row.created_at,
        }
    }
}

/// The guesses column of an `attempts` row.
#[derive(Debug, Clone, FromRow)]
pub struct AttemptsRow {
    pub guesses: Vec<String>,
}

impl From<AttemptsRow> for Plays {
    fn from(row: AttemptsRow) -> Self {
        Plays::new(row.guesses)
    }
}

/// Counter columns of a `stats` row.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct StatsRow {
    pub games_created: i64,
    pub games_won: i64,
    pub guesses_made: i64,
}

impl From<StatsRow> for Stats {
    fn from(row: StatsRow) -> Self {
        Self {
            games_created: row.games_created,
            games_won: row.games_won,
            guesses_made: row.guesses_made,
        }
    }
}
