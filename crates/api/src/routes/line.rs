//! Route definitions for the `/lines` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::line;
use crate::state::AppState;

/// ```text
/// GET    /lines/?character_id=       -> list_by_character
/// GET    /lines/{id}                 -> get_by_id
/// GET    /lines/movie/{movie_id}     -> list_by_movie
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lines", get(line::list_by_character))
        .route("/lines/", get(line::list_by_character))
        .route("/lines/{id}", get(line::get_by_id))
        .route("/lines/movie/{movie_id}", get(line::list_by_movie))
}
