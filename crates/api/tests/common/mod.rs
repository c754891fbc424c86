#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use filmlines_core::catalog::Catalog;
use filmlines_core::models::{Character, Conversation, Line, Movie};
use filmlines_core::types::DbId;
use filmlines_db::MovieStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

use filmlines_api::config::ServerConfig;
use filmlines_api::router::build_app_router;
use filmlines_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
    }
}

// ---------------------------------------------------------------------------
// Fixture corpus
// ---------------------------------------------------------------------------

/// Three real movies and one with a blank title and year.
///
/// Character line counts: RICK 5, ILSA 2, SAM 1, RENAULT 1, RIPLEY 5,
/// DALLAS 3, ASH 1, LAMBERT 2, PARKER 2, KANE 1, SAM LOWRY 0, JILL 0.
pub fn fixture_catalog() -> Catalog {
    let movies = vec![
        movie(1, "Casablanca", "1942", 8.5),
        movie(2, "Alien", "1979", 8.4),
        movie(3, "Brazil", "1985", 7.9),
        movie(4, "", "", 6.0),
    ];

    let characters = vec![
        character(10, "RICK", 1, "M"),
        character(11, "ILSA", 1, "F"),
        character(12, "SAM", 1, "M"),
        character(13, "RENAULT", 1, ""),
        character(20, "RIPLEY", 2, "F"),
        character(21, "DALLAS", 2, "M"),
        character(22, "ASH", 2, "M"),
        character(23, "LAMBERT", 2, "F"),
        character(24, "PARKER", 2, "M"),
        character(25, "KANE", 2, "M"),
        character(30, "SAM LOWRY", 3, "M"),
        character(31, "JILL", 3, "F"),
    ];

    // (conversation id, first, second, movie, speakers in order)
    let script: [(DbId, DbId, DbId, DbId, &[DbId]); 11] = [
        (100, 10, 11, 1, &[10, 11, 10]),
        (101, 11, 10, 1, &[11, 10]),
        (102, 10, 12, 1, &[10, 12]),
        (103, 13, 10, 1, &[13, 10]),
        (200, 20, 21, 2, &[20, 21, 20, 21]),
        (201, 20, 22, 2, &[20, 22, 20]),
        (202, 23, 20, 2, &[23, 20]),
        (203, 24, 25, 2, &[24, 25]),
        (204, 21, 22, 2, &[21]),
        (205, 23, 24, 2, &[23, 24]),
        (300, 30, 31, 3, &[]),
    ];

    let mut conversations = Vec::new();
    let mut lines = Vec::new();
    let mut next_line_id = 1000;
    for (id, first, second, movie_id, speakers) in script {
        conversations.push(Conversation {
            id,
            character1_id: first,
            character2_id: second,
            movie_id,
        });
        for (sort, speaker) in (1..).zip(speakers) {
            lines.push(Line {
                id: next_line_id,
                character_id: *speaker,
                movie_id,
                conversation_id: id,
                line_sort: sort,
                line_text: format!("line {next_line_id}"),
            });
            next_line_id += 1;
        }
    }

    Catalog::build(movies, characters, conversations, lines).unwrap()
}

fn movie(id: DbId, title: &str, year: &str, imdb_rating: f64) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        year: year.to_string(),
        imdb_rating,
        imdb_votes: 1000 + id,
    }
}

fn character(id: DbId, name: &str, movie_id: DbId, gender: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        movie_id,
        gender: Some(gender.to_string()),
        age: None,
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// An in-memory store seeded with [`fixture_catalog`].
pub fn test_store() -> Arc<MovieStore> {
    Arc::new(MovieStore::in_memory(fixture_catalog()))
}

/// Build the full application router around `store`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app_with_store(store: Arc<MovieStore>) -> Router {
    let state = AppState { store };
    build_app_router(state, &test_config())
}

pub fn build_test_app() -> Router {
    build_test_app_with_store(test_store())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

/// POST a raw body with a JSON content type, for malformed payloads.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect one integer field from every element of a JSON array.
pub fn ids(json: &serde_json::Value, field: &str) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|row| row[field].as_i64().unwrap())
        .collect()
}
