//! Shared fakes for service-level tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::TimeZone;
use wording_core::clock::FixedClock;
use wording_core::service::WordingService;
use wording_core::store::{Store, StoreError};
use wording_core::tokens::TokenGenerator;
use wording_core::types::{Game, Plays, Stats, StatsIncrement, Timestamp};

/// Instant every test clock is pinned to.
pub fn test_now() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2024, 5, 4, 10, 30, 0).unwrap()
}

/// Tokens `"{prefix}-1"`, `"{prefix}-2"`, ...
pub struct SequenceTokens {
    prefix: &'static str,
    next: AtomicUsize,
}

impl SequenceTokens {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicUsize::new(1),
        }
    }
}

#[async_trait]
impl TokenGenerator for SequenceTokens {
    async fn new_token(&self) -> String {
        format!("{}-{}", self.prefix, self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// Hands out `tokens` in order, then repeats the last one forever.
pub struct ScriptedTokens {
    tokens: Mutex<Vec<&'static str>>,
}

impl ScriptedTokens {
    pub fn new(tokens: &[&'static str]) -> Self {
        let mut tokens = tokens.to_vec();
        tokens.reverse();
        Self {
            tokens: Mutex::new(tokens),
        }
    }
}

#[async_trait]
impl TokenGenerator for ScriptedTokens {
    async fn new_token(&self) -> String {
        let mut tokens = self.tokens.lock().unwrap();
        let token = if tokens.len() > 1 {
            tokens.pop().unwrap()
        } else {
            tokens[0]
        };
        token.to_string()
    }
}

#[derive(Default)]
struct Inner {
    games: Vec<Game>,
    plays: HashMap<(String, String), Plays>,
    stats: HashMap<String, Stats>,
    calls: Vec<&'static str>,
}

/// In-memory [`Store`] that records which methods were called and can be
/// told to fail.
#[derive(Default)]
pub struct FakeStore {
    inner: Mutex<Inner>,
    fail_increments: bool,
    fail_plays: bool,
    always_conflict: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `increment_stats` call fails.
    pub fn failing_increments() -> Self {
        Self {
            fail_increments: true,
            ..Self::default()
        }
    }

    /// Every `plays` call fails with a backend error.
    pub fn failing_plays() -> Self {
        Self {
            fail_plays: true,
            ..Self::default()
        }
    }

    /// Every `create_game` call reports a taken token.
    pub fn conflicting() -> Self {
        Self {
            always_conflict: true,
            ..Self::default()
        }
    }

    fn record(&self, call: &'static str) {
        self.inner.lock().unwrap().calls.push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn games(&self) -> Vec<Game> {
        self.inner.lock().unwrap().games.clone()
    }

    pub fn stored_plays(&self, game_token: &str, player_token: &str) -> Option<Plays> {
        self.inner
            .lock()
            .unwrap()
            .plays
            .get(&(game_token.to_string(), player_token.to_string()))
            .cloned()
    }

    pub fn scope_stats(&self, scope: &str) -> Stats {
        self.inner
            .lock()
            .unwrap()
            .stats
            .get(scope)
            .copied()
            .unwrap_or_default()
    }

    /// Seed a game directly, bypassing the service.
    pub fn insert_game(&self, game: Game) {
        self.inner.lock().unwrap().games.push(game);
    }

    /// Seed a player's plays directly, bypassing the service.
    pub fn insert_plays(&self, game_token: &str, player_token: &str, guesses: &[&str]) {
        self.inner.lock().unwrap().plays.insert(
            (game_token.to_string(), player_token.to_string()),
            Plays::new(guesses.iter().map(|g| g.to_string()).collect()),
        );
    }
}

#[async_trait]
impl Store for FakeStore {
    async fn create_game(&self, game: &Game) -> Result<Game, StoreError> {
        self.record("create_game");
        let mut inner = self.inner.lock().unwrap();
        let taken = inner
            .games
            .iter()
            .any(|g| g.token == game.token || g.admin_token == game.admin_token);
        if self.always_conflict || taken {
            return Err(StoreError::Conflict);
        }
        inner.games.push(game.clone());
        Ok(game.clone())
    }

    async fn game(&self, admin_token: &str) -> Result<Game, StoreError> {
        self.record("game");
        let inner = self.inner.lock().unwrap();
        inner
            .games
            .iter()
            .find(|g| g.admin_token == admin_token)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn game_by_token(&self, token: &str) -> Result<Game, StoreError> {
        self.record("game_by_token");
        let inner = self.inner.lock().unwrap();
        inner
            .games
            .iter()
            .find(|g| g.token == token)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn plays(&self, game_token: &str, player_token: &str) -> Result<Plays, StoreError> {
        self.record("plays");
        if self.fail_plays {
            return Err(StoreError::backend("connection reset"));
        }
        self.stored_plays(game_token, player_token)
            .ok_or(StoreError::NotFound)
    }

    async fn put_plays(
        &self,
        game_token: &str,
        player_token: &str,
        plays: &Plays,
    ) -> Result<(), StoreError> {
        self.record("put_plays");
        self.inner.lock().unwrap().plays.insert(
            (game_token.to_string(), player_token.to_string()),
            plays.clone(),
        );
        Ok(())
    }

    async fn increment_stats(&self, increment: &StatsIncrement) -> Result<(), StoreError> {
        self.record("increment_stats");
        if self.fail_increments {
            return Err(StoreError::backend("stats table locked"));
        }
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .stats
            .entry(increment.scope.key().to_string())
            .or_default();
        row.games_created += increment.delta.games_created;
        row.games_won += increment.delta.games_won;
        row.guesses_made += increment.delta.guesses_made;
        Ok(())
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        self.record("stats");
        Ok(self.scope_stats(wording_core::types::LIFETIME_SCOPE))
    }

    async fn game_stats(&self, admin_token: &str) -> Result<Stats, StoreError> {
        self.record("game_stats");
        let token = {
            let inner = self.inner.lock().unwrap();
            inner
                .games
                .iter()
                .find(|g| g.admin_token == admin_token)
                .map(|g| g.token.clone())
                .ok_or(StoreError::NotFound)?
        };
        Ok(self.scope_stats(&token))
    }

    async fn delete_game(&self, admin_token: &str) -> Result<(), StoreError> {
        self.record("delete_game");
        let mut inner = self.inner.lock().unwrap();
        let idx = inner
            .games
            .iter()
            .position(|g| g.admin_token == admin_token)
            .ok_or(StoreError::NotFound)?;
        let game = inner.games.remove(idx);
        inner.plays.retain(|(token, _), _| *token != game.token);
        inner.stats.remove(&game.token);
        Ok(())
    }
}

/// A service over `store` with sequential tokens and a pinned clock.
pub fn service(store: Arc<FakeStore>) -> WordingService {
    WordingService::new(
        store,
        Arc::new(SequenceTokens::new("admin")),
        Arc::new(SequenceTokens::new("game")),
        Arc::new(FixedClock(test_now())),
    )
}

/// A service whose game tokens come from `game_tokens`.
pub fn service_with_game_tokens(
    store: Arc<FakeStore>,
    game_tokens: impl TokenGenerator + 'static,
) -> WordingService {
    WordingService::new(
        store,
        Arc::new(SequenceTokens::new("admin")),
        Arc::new(game_tokens),
        Arc::new(FixedClock(test_now())),
    )
}

/// A stored game with the given answer and limit.
pub fn game(answer: &str, guess_limit: i32) -> Game {
    Game {
        admin_token: "admin-x".to_string(),
        token: "game-x".to_string(),
        answer: answer.to_string(),
        guess_limit,
        created_at: test_now(),
    }
}
