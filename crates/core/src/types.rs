//! Domain value objects shared by every layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Name of the stats row holding application-wide counters.
pub const LIFETIME_SCOPE: &str = "lifetime";

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// A guess-the-word game as created by its author.
///
/// `admin_token` authorizes management (viewing the answer, deleting the
/// game); `token` is what players share. The answer is stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub admin_token: String,
    pub token: String,
    pub answer: String,
    pub guess_limit: i32,
    pub created_at: Timestamp,
}

impl Game {
    /// Number of letters every guess must have.
    pub fn word_length(&self) -> usize {
        self.answer.chars().count()
    }
}

// ---------------------------------------------------------------------------
// Plays
// ---------------------------------------------------------------------------

/// Every guess one player has made against one game, in guess order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plays {
    pub attempts: Vec<String>,
}

impl Plays {
    pub fn new(attempts: Vec<String>) -> Self {
        Self { attempts }
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// Feedback for a single letter of a guess.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub value: char,
    /// The letter is at this exact position in the answer.
    pub is_correct: bool,
    /// The letter occurs somewhere else in the answer.
    pub is_partial: bool,
}

impl Character {
    pub fn absent(value: char) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn correct(value: char) -> Self {
        Self {
            value,
            is_correct: true,
            is_partial: false,
        }
    }

    pub fn partial(value: char) -> Self {
        Self {
            value,
            is_correct: false,
            is_partial: true,
        }
    }
}

/// Per-letter feedback for one guess. One [`Character`] per guess letter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attempt(pub Vec<Character>);

impl Attempt {
    pub fn characters(&self) -> &[Character] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every letter is in its exact position.
    pub fn is_all_correct(&self) -> bool {
        self.0.iter().all(|ch| ch.is_correct)
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.0 {
            write!(f, "{}", ch.value)?;
        }
        Ok(())
    }
}

impl FromIterator<Character> for Attempt {
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// Snapshot of one player's progress, derived from their [`Plays`].
/// Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub attempts: Vec<Attempt>,
    pub can_continue: bool,
    pub is_victorious: bool,
    pub game_over: bool,
}

impl GameState {
    /// State of a player who has not guessed yet.
    pub fn fresh() -> Self {
        Self {
            attempts: Vec::new(),
            can_continue: true,
            is_victorious: false,
            game_over: false,
        }
    }

    pub fn status(&self) -> PlayStatus {
        if self.is_victorious {
            PlayStatus::Won
        } else if self.game_over {
            PlayStatus::Exhausted
        } else {
            PlayStatus::Open
        }
    }
}

/// Where a player stands against a game. `Won` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStatus {
    Open,
    Won,
    Exhausted,
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Counters shown to players and game authors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub games_created: i64,
    pub games_won: i64,
    pub guesses_made: i64,
}

/// Which counter row an increment applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatsScope {
    Lifetime,
    /// Counters for the game with this (player-facing) token.
    Game(String),
}

impl StatsScope {
    /// Row key used by stores.
    pub fn key(&self) -> &str {
        match self {
            Self::Lifetime => LIFETIME_SCOPE,
            Self::Game(token) => token,
        }
    }
}

/// A relative change to a stats row. Every field is added to the stored
/// value, never assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsIncrement {
    pub scope: StatsScope,
    pub delta: Stats,
}

impl StatsIncrement {
    pub fn lifetime(delta: Stats) -> Self {
        Self {
            scope: StatsScope::Lifetime,
            delta,
        }
    }

    pub fn game(token: impl Into<String>, delta: Stats) -> Self {
        Self {
            scope: StatsScope::Game(token.into()),
            delta,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
