//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod game_repo;
pub mod plays_repo;
pub mod stats_repo;

pub use game_repo::GameRepo;
pub use plays_repo::PlaysRepo;
pub use stats_repo::StatsRepo;
