//! Error reporting around a [`GameService`].
//!
//! [`Reporting`] forwards every error its classifier considers interesting
//! to a [`ReportSink`] and passes the result through untouched. Expected
//! outcomes (bad input, missing games, finished games) are not reported by
//! the default classifier.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::service::GameService;
use crate::types::{Game, GameState, Plays, Stats};

/// Destination for reported errors.
pub trait ReportSink: Send + Sync {
    fn capture(&self, operation: &'static str, err: &CoreError);
}

/// Decides whether an error is worth reporting.
pub type Classifier = fn(&CoreError) -> bool;

/// Default classifier: only storage failures are exceptional.
pub fn is_exceptional(err: &CoreError) -> bool {
    match err {
        CoreError::InvalidInput(_)
        | CoreError::NotFound { .. }
        | CoreError::GuessLimitReached
        | CoreError::CannotContinue => false,
        CoreError::Store(_) => true,
    }
}

/// Logs captured errors at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn capture(&self, operation: &'static str, err: &CoreError) {
        tracing::error!(operation, kind = err.kind(), error = %err, "Game service error");
    }
}

/// A [`GameService`] that reports the inner service's errors.
pub struct Reporting<S, R> {
    inner: S,
    sink: R,
    classify: Classifier,
}

impl<S, R> Reporting<S, R> {
    pub fn new(inner: S, sink: R) -> Self {
        Self::with_classifier(inner, sink, is_exceptional)
    }

    pub fn with_classifier(inner: S, sink: R, classify: Classifier) -> Self {
        Self {
            inner,
            sink,
            classify,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, R: ReportSink> Reporting<S, R> {
    fn observe<T>(
        &self,
        operation: &'static str,
        result: Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        if let Err(err) = &result {
            if (self.classify)(err) {
                self.sink.capture(operation, err);
            }
        }
        result
    }
}

#[async_trait]
impl<S, R> GameService for Reporting<S, R>
where
    S: GameService,
    R: ReportSink,
{
    async fn create_game(&self, answer: &str, guess_limit: i32) -> Result<Game, CoreError> {
        let result = self.inner.create_game(answer, guess_limit).await;
        self.observe("create_game", result)
    }

    async fn delete_game(&self, admin_token: &str) -> Result<(), CoreError> {
        let result = self.inner.delete_game(admin_token).await;
        self.observe("delete_game", result)
    }

    async fn game(&self, admin_token: &str) -> Result<Game, CoreError> {
        let result = self.inner.game(admin_token).await;
        self.observe("game", result)
    }

    async fn game_by_token(&self, token: &str) -> Result<Game, CoreError> {
        let result = self.inner.game_by_token(token).await;
        self.observe("game_by_token", result)
    }

    async fn game_state(
        &self,
        game_token: &str,
        player_token: &str,
    ) -> Result<GameState, CoreError> {
        let result = self.inner.game_state(game_token, player_token).await;
        self.observe("game_state", result)
    }

    async fn game_stats(&self, admin_token: &str) -> Result<Stats, CoreError> {
        let result = self.inner.game_stats(admin_token).await;
        self.observe("game_stats", result)
    }

    async fn new_player_token(&self) -> String {
        self.inner.new_player_token().await
    }

    async fn plays(&self, game_token: &str, player_token: &str) -> Result<Plays, CoreError> {
        let result = self.inner.plays(game_token, player_token).await;
        self.observe("plays", result)
    }

    async fn stats(&self) -> Result<Stats, CoreError> {
        let result = self.inner.stats().await;
        self.observe("stats", result)
    }

    async fn submit_guess(
        &self,
        game_token: &str,
        player_token: &str,
        guess: &str,
    ) -> Result<GameState, CoreError> {
        let result = self.inner.submit_guess(game_token, player_token, guess).await;
        self.observe("submit_guess", result)
    }
}
