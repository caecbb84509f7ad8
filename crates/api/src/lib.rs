//! HTTP edge for the guess-the-word game.
//!
//! Exposes config, state, error handling, routes and the outbound
//! integrations (random-word token source, webhook error reports) so
//! integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod randword;
pub mod reporting;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
