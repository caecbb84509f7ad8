//! Integration tests for [`PgStore`] against a real database.
//!
//! Run with `DATABASE_URL` pointing at a scratch Postgres instance:
//! `cargo test -p wording-db -- --ignored`.

use assert_matches::assert_matches;
use sqlx::PgPool;
use wording_core::store::{Store, StoreError};
use wording_core::types::{Game, Plays, Stats, StatsIncrement};
use wording_db::PgStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_game(admin_token: &str, token: &str) -> Game {
    Game {
        admin_token: admin_token.to_string(),
        token: token.to_string(),
        answer: "potato".to_string(),
        guess_limit: 6,
        created_at: chrono::Utc::now(),
    }
}

fn delta(games_created: i64, games_won: i64, guesses_made: i64) -> Stats {
    Stats {
        games_created,
        games_won,
        guesses_made,
    }
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_then_fetch_by_both_tokens(pool: PgPool) {
    let store = PgStore::new(pool);
    let created = store.create_game(&new_game("a1", "g1")).await.unwrap();

    assert_eq!(created.answer, "potato");
    assert_eq!(store.game("a1").await.unwrap().token, "g1");
    assert_eq!(store.game_by_token("g1").await.unwrap().admin_token, "a1");
    assert_matches!(store.game("g1").await, Err(StoreError::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_tokens_are_a_conflict(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_game(&new_game("a1", "g1")).await.unwrap();

    let result = store.create_game(&new_game("a2", "g1")).await;
    assert_matches!(result, Err(StoreError::Conflict));

    let result = store.create_game(&new_game("a1", "g2")).await;
    assert_matches!(result, Err(StoreError::Conflict));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn delete_cascades_to_plays_and_game_stats(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_game(&new_game("a1", "g1")).await.unwrap();
    store
        .put_plays("g1", "p1", &Plays::new(vec!["tomato".into()]))
        .await
        .unwrap();
    store
        .increment_stats(&StatsIncrement::game("g1", delta(0, 0, 1)))
        .await
        .unwrap();

    store.delete_game("a1").await.unwrap();

    assert_matches!(store.game("a1").await, Err(StoreError::NotFound));
    assert_matches!(store.plays("g1", "p1").await, Err(StoreError::NotFound));
    assert_matches!(store.delete_game("a1").await, Err(StoreError::NotFound));
}

// ---------------------------------------------------------------------------
// Plays
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn plays_are_replaced_not_appended(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_game(&new_game("a1", "g1")).await.unwrap();

    assert_matches!(store.plays("g1", "p1").await, Err(StoreError::NotFound));

    store
        .put_plays("g1", "p1", &Plays::new(vec!["tomato".into()]))
        .await
        .unwrap();
    let both = Plays::new(vec!["tomato".into(), "potash".into()]);
    store.put_plays("g1", "p1", &both).await.unwrap();

    assert_eq!(store.plays("g1", "p1").await.unwrap(), both);
    assert_matches!(store.plays("g1", "p2").await, Err(StoreError::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn plays_for_unknown_game_are_rejected(pool: PgPool) {
    let store = PgStore::new(pool);
    let result = store.put_plays("missing", "p1", &Plays::default()).await;
    assert_matches!(result, Err(StoreError::Backend(_)));
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn stats_default_to_zero(pool: PgPool) {
    let store = PgStore::new(pool);
    assert_eq!(store.stats().await.unwrap(), Stats::default());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn stats_increments_add_up(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_game(&new_game("a1", "g1")).await.unwrap();

    for increment in [
        StatsIncrement::lifetime(delta(1, 0, 0)),
        StatsIncrement::lifetime(delta(0, 0, 1)),
        StatsIncrement::lifetime(delta(0, 1, 1)),
        StatsIncrement::game("g1", delta(0, 1, 2)),
    ] {
        store.increment_stats(&increment).await.unwrap();
    }

    assert_eq!(store.stats().await.unwrap(), delta(1, 1, 2));
    assert_eq!(store.game_stats("a1").await.unwrap(), delta(0, 1, 2));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn game_stats_distinguish_missing_game_from_no_activity(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_game(&new_game("a1", "g1")).await.unwrap();

    assert_eq!(store.game_stats("a1").await.unwrap(), Stats::default());
    assert_matches!(store.game_stats("nope").await, Err(StoreError::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_check_passes(pool: PgPool) {
    let store = PgStore::new(pool);
    store.health_check().await.unwrap();
}
