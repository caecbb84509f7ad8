//! Guess scoring. Pure logic, no I/O.

use std::collections::HashMap;

use crate::types::{Attempt, Character};

/// Score `guess` against `answer`, one [`Character`] per letter of `guess`.
///
/// A letter is correct when `answer` has it at the same position, and
/// partial when it occurs anywhere else in `answer`. Matched answer
/// positions are not consumed, so a letter repeated in the guess can be
/// marked partial more times than it occurs in the answer.
///
/// Both inputs are expected to be normalized (lower case, same length);
/// nothing is enforced here. Guess positions past the end of `answer` can
/// only ever be partial or absent.
pub fn evaluate(answer: &str, guess: &str) -> Attempt {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (i, c) in answer.chars().enumerate() {
        positions.entry(c).or_default().push(i);
    }

    guess
        .chars()
        .enumerate()
        .map(|(i, c)| match positions.get(&c) {
            Some(locs) if locs.contains(&i) => Character::correct(c),
            Some(_) => Character::partial(c),
            None => Character::absent(c),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
