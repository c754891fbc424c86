//! Route definitions for the `/movies` resource and its conversations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{conversation, movie};
use crate::state::AppState;

/// ```text
/// GET    /movies/                               -> list
/// GET    /movies/{movie_id}                     -> get_by_id
/// POST   /movies/{movie_id}/conversations/      -> conversation::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(movie::list))
        .route("/movies/", get(movie::list))
        .route("/movies/{movie_id}", get(movie::get_by_id))
        .route(
            "/movies/{movie_id}/conversations",
            post(conversation::create),
        )
        .route(
            "/movies/{movie_id}/conversations/",
            post(conversation::create),
        )
}
