//! Guess-the-word game domain.
//!
//! Scoring, validation and state derivation are pure functions with no
//! I/O. Persistence, token generation and time are consumed through the
//! capability traits in [`store`], [`tokens`] and [`clock`], and
//! orchestrated by [`service::WordingService`].

pub mod clock;
pub mod error;
pub mod evaluation;
pub mod progress;
pub mod reporting;
pub mod service;
pub mod store;
pub mod tokens;
pub mod types;
pub mod validation;
