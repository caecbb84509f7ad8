//! In-process [`Store`] for local development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use wording_core::store::{Store, StoreError};
use wording_core::types::{Game, Plays, Stats, StatsIncrement, LIFETIME_SCOPE};

#[derive(Default)]
struct State {
    /// Games keyed by admin token.
    games: HashMap<String, Game>,
    /// Player-facing token to admin token.
    tokens: HashMap<String, String>,
    /// Plays keyed by (game token, player token).
    plays: HashMap<(String, String), Plays>,
    /// Counters keyed by scope.
    stats: HashMap<String, Stats>,
}

/// [`Store`] that keeps every record in memory. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn add(row: &mut Stats, delta: &Stats) {
    row.games_created += delta.games_created;
    row.games_won += delta.games_won;
    row.guesses_made += delta.guesses_made;
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_game(&self, game: &Game) -> Result<Game, StoreError> {
        let mut state = self.state.write().await;
        if state.games.contains_key(&game.admin_token) || state.tokens.contains_key(&game.token) {
            return Err(StoreError::Conflict);
        }
        state
            .tokens
            .insert(game.token.clone(), game.admin_token.clone());
        state.games.insert(game.admin_token.clone(), game.clone());
        Ok(game.clone())
    }

    async fn game(&self, admin_token: &str) -> Result<Game, StoreError> {
        self.state
            .read()
            .await
            .games
            .get(admin_token)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn game_by_token(&self, token: &str) -> Result<Game, StoreError> {
        let state = self.state.read().await;
        state
            .tokens
            .get(token)
            .and_then(|admin| state.games.get(admin))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn plays(&self, game_token: &str, player_token: &str) -> Result<Plays, StoreError> {
        self.state
            .read()
            .await
            .plays
            .get(&(game_token.to_string(), player_token.to_string()))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put_plays(
        &self,
        game_token: &str,
        player_token: &str,
        plays: &Plays,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.tokens.contains_key(game_token) {
            return Err(StoreError::backend(format!("no game with token {game_token}")));
        }
        state.plays.insert(
            (game_token.to_string(), player_token.to_string()),
            plays.clone(),
        );
        Ok(())
    }

    async fn increment_stats(&self, increment: &StatsIncrement) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let row = state
            .stats
            .entry(increment.scope.key().to_string())
            .or_default();
        add(row, &increment.delta);
        Ok(())
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .stats
            .get(LIFETIME_SCOPE)
            .copied()
            .unwrap_or_default())
    }

    async fn game_stats(&self, admin_token: &str) -> Result<Stats, StoreError> {
        let state = self.state.read().await;
        let game = state.games.get(admin_token).ok_or(StoreError::NotFound)?;
        Ok(state.stats.get(&game.token).copied().unwrap_or_default())
    }

    async fn delete_game(&self, admin_token: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let game = state
            .games
            .remove(admin_token)
            .ok_or(StoreError::NotFound)?;
        state.tokens.remove(&game.token);
        state.plays.retain(|(token, _), _| *token != game.token);
        state.stats.remove(&game.token);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
