//! Game orchestration: validation, state derivation and persistence.
//!
//! [`WordingService`] is the production [`GameService`]. It owns no state
//! of its own; every call reads through the injected [`Store`], so two
//! concurrent guesses by the same player race on the plays read-modify-write
//! and the last write wins. Stats are only ever incremented, which keeps
//! concurrent updates from different players additive.

use std::sync::Arc;

use async_trait::async_trait;

use crate::clock::Clock;
use crate::error::{CoreError, InputViolations};
use crate::store::{Store, StoreError};
use crate::tokens::TokenGenerator;
use crate::types::{Game, GameState, Plays, Stats, StatsIncrement};
use crate::validation::{validate_answer, validate_guess, validate_guess_limit};

pub const ENTITY_GAME: &str = "Game";

/// Tries at persisting a new game before a token conflict is an error.
pub const MAX_CREATE_ATTEMPTS: u32 = 5;

/// Operations the presentation layer needs.
#[async_trait]
pub trait GameService: Send + Sync {
    /// Create a game with a secret `answer` and at most `guess_limit` guesses
    /// per player.
    async fn create_game(&self, answer: &str, guess_limit: i32) -> Result<Game, CoreError>;

    /// Delete a game and everything recorded against it.
    async fn delete_game(&self, admin_token: &str) -> Result<(), CoreError>;

    /// Fetch a game by its admin token.
    async fn game(&self, admin_token: &str) -> Result<Game, CoreError>;

    /// Fetch a game by its player-facing token.
    async fn game_by_token(&self, token: &str) -> Result<Game, CoreError>;

    /// Snapshot of a player's progress.
    async fn game_state(&self, game_token: &str, player_token: &str)
        -> Result<GameState, CoreError>;

    /// Counters for one game.
    async fn game_stats(&self, admin_token: &str) -> Result<Stats, CoreError>;

    /// Allocate a token for a player who has none yet.
    async fn new_player_token(&self) -> String;

    /// A player's raw guesses. Empty when they have not played.
    async fn plays(&self, game_token: &str, player_token: &str) -> Result<Plays, CoreError>;

    /// Lifetime counters.
    async fn stats(&self) -> Result<Stats, CoreError>;

    /// Record a guess and return the player's resulting state.
    async fn submit_guess(
        &self,
        game_token: &str,
        player_token: &str,
        guess: &str,
    ) -> Result<GameState, CoreError>;
}

/// [`GameService`] backed by a [`Store`].
pub struct WordingService {
    store: Arc<dyn Store>,
    admin_tokens: Arc<dyn TokenGenerator>,
    game_tokens: Arc<dyn TokenGenerator>,
    clock: Arc<dyn Clock>,
}

impl WordingService {
    /// `admin_tokens` also supplies player tokens; `game_tokens` names the
    /// links players share.
    pub fn new(
        store: Arc<dyn Store>,
        admin_tokens: Arc<dyn TokenGenerator>,
        game_tokens: Arc<dyn TokenGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            admin_tokens,
            game_tokens,
            clock,
        }
    }

    /// Plays for a player, treating "never played" as no guesses.
    async fn load_plays(&self, game_token: &str, player_token: &str) -> Result<Plays, CoreError> {
        match self.store.plays(game_token, player_token).await {
            Ok(plays) => Ok(plays),
            Err(StoreError::NotFound) => Ok(Plays::default()),
            Err(e) => Err(CoreError::store(e)),
        }
    }

    /// Apply a stats increment. Failures are logged and swallowed so they
    /// never undo the operation they accompany.
    async fn increment(&self, increment: StatsIncrement) {
        if let Err(e) = self.store.increment_stats(&increment).await {
            tracing::warn!(
                scope = increment.scope.key(),
                error = %e,
                "Failed to increment stats",
            );
        }
    }
}

#[async_trait]
impl GameService for WordingService {
    async fn create_game(&self, answer: &str, guess_limit: i32) -> Result<Game, CoreError> {
        let mut violations = InputViolations::new();
        if let Err(v) = validate_answer(answer) {
            violations.merge(v);
        }
        if let Err(v) = validate_guess_limit(guess_limit) {
            violations.merge(v);
        }
        violations.into_result()?;

        let mut attempt = 1;
        let game = loop {
            // The last attempt takes its game token from the admin generator,
            // whose space does not run out.
            let token = if attempt < MAX_CREATE_ATTEMPTS {
                self.game_tokens.new_token().await
            } else {
                self.admin_tokens.new_token().await
            };
            let game = Game {
                admin_token: self.admin_tokens.new_token().await,
                token,
                answer: answer.to_lowercase(),
                guess_limit,
                created_at: self.clock.now(),
            };
            match self.store.create_game(&game).await {
                Ok(game) => break game,
                Err(StoreError::Conflict) if attempt < MAX_CREATE_ATTEMPTS => {
                    tracing::debug!(token = %game.token, attempt, "Token taken, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(CoreError::store(e)),
            }
        };

        tracing::info!(token = %game.token, guess_limit, "Game created");

        self.increment(StatsIncrement::lifetime(Stats {
            games_created: 1,
            ..Default::default()
        }))
        .await;

        Ok(game)
    }

    async fn delete_game(&self, admin_token: &str) -> Result<(), CoreError> {
        self.store
            .delete_game(admin_token)
            .await
            .map_err(CoreError::lookup(ENTITY_GAME))?;
        tracing::info!("Game deleted");
        Ok(())
    }

    async fn game(&self, admin_token: &str) -> Result<Game, CoreError> {
        self.store
            .game(admin_token)
            .await
            .map_err(CoreError::lookup(ENTITY_GAME))
    }

    async fn game_by_token(&self, token: &str) -> Result<Game, CoreError> {
        self.store
            .game_by_token(token)
            .await
            .map_err(CoreError::lookup(ENTITY_GAME))
    }

    async fn game_state(
        &self,
        game_token: &str,
        player_token: &str,
    ) -> Result<GameState, CoreError> {
        let game = self.game_by_token(game_token).await?;
        let plays = self.load_plays(game_token, player_token).await?;
        Ok(plays.evaluate(&game.answer, game.guess_limit))
    }

    async fn game_stats(&self, admin_token: &str) -> Result<Stats, CoreError> {
        self.store
            .game_stats(admin_token)
            .await
            .map_err(CoreError::lookup(ENTITY_GAME))
    }

    async fn new_player_token(&self) -> String {
        self.admin_tokens.new_token().await
    }

    async fn plays(&self, game_token: &str, player_token: &str) -> Result<Plays, CoreError> {
        self.load_plays(game_token, player_token).await
    }

    async fn stats(&self) -> Result<Stats, CoreError> {
        self.store.stats().await.map_err(CoreError::store)
    }

    async fn submit_guess(
        &self,
        game_token: &str,
        player_token: &str,
        guess: &str,
    ) -> Result<GameState, CoreError> {
        let guess = guess.to_lowercase();

        let game = self.game_by_token(game_token).await?;
        let mut plays = self.load_plays(game_token, player_token).await?;

        validate_guess(&guess, &game.answer, &plays.attempts)?;

        if plays.len() >= usize::try_from(game.guess_limit).unwrap_or(0) {
            return Err(CoreError::GuessLimitReached);
        }
        if !plays.evaluate(&game.answer, game.guess_limit).can_continue {
            return Err(CoreError::CannotContinue);
        }

        plays.attempts.push(guess);
        self.store
            .put_plays(game_token, player_token, &plays)
            .await
            .map_err(CoreError::store)?;

        let plays = self
            .store
            .plays(game_token, player_token)
            .await
            .map_err(CoreError::store)?;
        let state = plays.evaluate(&game.answer, game.guess_limit);

        tracing::debug!(
            token = %game.token,
            attempts = plays.len(),
            status = ?state.status(),
            "Guess recorded",
        );

        let delta = Stats {
            guesses_made: 1,
            games_won: i64::from(state.is_victorious),
            ..Default::default()
        };
        self.increment(StatsIncrement::lifetime(delta)).await;
        self.increment(StatsIncrement::game(game.token, delta)).await;

        Ok(state)
    }
}
