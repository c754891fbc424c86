use std::sync::Arc;

use filmlines_db::MovieStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The corpus snapshot and its write path.
    pub store: Arc<MovieStore>,
}
