//! Input validation for answers, guess limits and guesses.
//!
//! Every function collects all violations it finds into one
//! [`InputViolations`] instead of stopping at the first.

use crate::error::InputViolations;

pub const FIELD_ANSWER: &str = "answer";
pub const FIELD_GUESS_LIMIT: &str = "guess_limit";
pub const FIELD_GUESS: &str = "guess";

pub const MIN_GUESS_LIMIT: i32 = 1;
pub const MAX_GUESS_LIMIT: i32 = 16;

const NON_ALPHA: &str = "has non-alphabetical characters";

/// True when every character is an ASCII letter. Empty strings pass.
pub fn is_alpha(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Validate a game answer before normalization. Either case is accepted.
pub fn validate_answer(answer: &str) -> Result<(), InputViolations> {
    let mut violations = InputViolations::new();
    if answer.is_empty() {
        violations.add(FIELD_ANSWER, "must not be empty");
    }
    if !is_alpha(answer) {
        violations.add(FIELD_ANSWER, NON_ALPHA);
    }
    violations.into_result()
}

/// Validate that `limit` is within `[MIN_GUESS_LIMIT, MAX_GUESS_LIMIT]`.
pub fn validate_guess_limit(limit: i32) -> Result<(), InputViolations> {
    let mut violations = InputViolations::new();
    if !(MIN_GUESS_LIMIT..=MAX_GUESS_LIMIT).contains(&limit) {
        violations.add(
            FIELD_GUESS_LIMIT,
            format!("must be between {MIN_GUESS_LIMIT} and {MAX_GUESS_LIMIT}, got {limit}"),
        );
    }
    violations.into_result()
}

/// Validate a normalized guess against the answer's shape and the
/// player's earlier guesses.
pub fn validate_guess(
    guess: &str,
    answer: &str,
    previous_guesses: &[String],
) -> Result<(), InputViolations> {
    let mut violations = InputViolations::new();

    let expected = answer.chars().count();
    if guess.chars().count() != expected {
        violations.add(
            FIELD_GUESS,
            format!("guess must be {expected} characters long"),
        );
    }
    if !is_alpha(guess) {
        violations.add(FIELD_GUESS, NON_ALPHA);
    }
    if previous_guesses.iter().any(|prev| prev == guess) {
        violations.add(FIELD_GUESS, format!("already guessed {guess}"));
    }

    violations.into_result()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
