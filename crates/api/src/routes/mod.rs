pub mod character;
pub mod health;
pub mod line;
pub mod movie;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                         welcome message
///
/// /characters/                              list characters
/// /characters/{id}                          character detail
///
/// /movies/                                  list movies
/// /movies/{movie_id}                        movie detail
/// /movies/{movie_id}/conversations/         add a conversation (POST)
///
/// /lines/?character_id=                     lines spoken by a character
/// /lines/{id}                               line detail
/// /lines/movie/{movie_id}                   lines of a movie
/// ```
///
/// Collection routes answer with and without the trailing slash.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .merge(character::router())
        .merge(movie::router())
        .merge(line::router())
}

#[derive(Serialize)]
pub struct Welcome {
    pub message: &'static str,
}

/// GET /
async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the movie dialogue API. Responses are in JSON.",
    })
}
