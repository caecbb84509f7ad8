use std::sync::Arc;

use wording_core::service::GameService;
use wording_core::store::Store;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The game service, usually wrapped in error reporting.
    pub service: Arc<dyn GameService>,
    /// Backing store, for health checks.
    pub store: Arc<dyn Store>,
}
