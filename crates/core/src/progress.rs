//! Derives a player's [`GameState`] from their guess history.

use crate::evaluation::evaluate;
use crate::types::{GameState, Plays};

/// Fold `plays` into a state snapshot against `answer`.
///
/// The player has won if any recorded attempt is all-correct, and is out of
/// guesses once `guess_limit` attempts exist. A winning final guess is
/// reported as a victory; `can_continue` is false in both terminal cases.
pub fn evaluate_progress(plays: &Plays, answer: &str, guess_limit: i32) -> GameState {
    let attempts: Vec<_> = plays
        .attempts
        .iter()
        .map(|guess| evaluate(answer, guess))
        .collect();

    let is_victorious = attempts.iter().any(|attempt| attempt.is_all_correct());
    let game_over = attempts.len() >= usize::try_from(guess_limit).unwrap_or(0);

    GameState {
        attempts,
        can_continue: !is_victorious && !game_over,
        is_victorious,
        game_over,
    }
}

impl Plays {
    /// Shorthand for [`evaluate_progress`].
    pub fn evaluate(&self, answer: &str, guess_limit: i32) -> GameState {
        evaluate_progress(self, answer, guess_limit)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
