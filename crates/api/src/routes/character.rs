//! Route definitions for the `/characters` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// ```text
/// GET    /characters/            -> list
/// GET    /characters/{id}        -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/characters", get(character::list))
        .route("/characters/", get(character::list))
        .route("/characters/{id}", get(character::get_by_id))
}
