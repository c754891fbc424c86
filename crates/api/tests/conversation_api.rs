//! HTTP-level integration tests for `POST /movies/{movie_id}/conversations/`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, ids, post_json, post_raw};
use serde_json::json;

fn conversation(c1: i64, c2: i64, lines: &[(i64, &str)]) -> serde_json::Value {
    json!({
        "character_1_id": c1,
        "character_2_id": c2,
        "lines": lines
            .iter()
            .map(|(id, text)| json!({"character_id": id, "line_text": text}))
            .collect::<Vec<_>>(),
    })
}

// ---------------------------------------------------------------------------
// Successful writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_lines_are_served_in_submission_order() {
    let store = common::test_store();

    let body = conversation(11, 12, &[(12, "Play it once, Sam."), (11, "For old times' sake.")]);
    let response = post_json(
        common::build_test_app_with_store(store.clone()),
        "/movies/1/conversations/",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["conversation_id"], 301);

    let app = common::build_test_app_with_store(store.clone());
    let json = body_json(get(app, "/lines/?character_id=12").await).await;
    let lines = json["lines"].as_array().unwrap();
    let new = lines.last().unwrap();
    assert_eq!(new["conversation_id"], 301);
    assert_eq!(new["line_sort"], 1);
    assert_eq!(new["line_text"], "Play it once, Sam.");
    assert_eq!(new["other_character"], "ILSA");

    let app = common::build_test_app_with_store(store);
    let json = body_json(get(app, "/lines/?character_id=11").await).await;
    let new = json["lines"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(new["line_id"], 1024);
    assert_eq!(new["line_sort"], 2);
}

#[tokio::test]
async fn new_conversation_feeds_the_aggregates() {
    let store = common::test_store();

    let body = conversation(12, 11, &[(12, "a"), (11, "b"), (12, "c")]);
    let response = post_json(
        common::build_test_app_with_store(store.clone()),
        "/movies/1/conversations",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app_with_store(store.clone());
    let json = body_json(get(app, "/characters/12").await).await;
    // ILSA now shares three lines with SAM, overtaking RICK.
    assert_eq!(ids(&json["top_conversations"], "character_id"), vec![11, 10]);

    let app = common::build_test_app_with_store(store);
    let json = body_json(get(app, "/movies/1").await).await;
    assert_eq!(ids(&json["top_characters"], "character_id"), vec![10, 11, 12, 13]);
    assert_eq!(ids(&json["top_characters"], "num_lines"), vec![5, 3, 3, 1]);
}

#[tokio::test]
async fn repeated_posts_create_distinct_conversations() {
    let store = common::test_store();
    let body = conversation(20, 25, &[(25, "hello")]);

    let first = body_json(
        post_json(
            common::build_test_app_with_store(store.clone()),
            "/movies/2/conversations/",
            body.clone(),
        )
        .await,
    )
    .await;
    let second = body_json(
        post_json(
            common::build_test_app_with_store(store.clone()),
            "/movies/2/conversations/",
            body,
        )
        .await,
    )
    .await;

    assert_ne!(first["conversation_id"], second["conversation_id"]);
    assert_eq!(store.stats().await.conversations, 13);
}

#[tokio::test]
async fn empty_line_list_is_accepted() {
    let store = common::test_store();
    let response = post_json(
        common::build_test_app_with_store(store.clone()),
        "/movies/3/conversations/",
        conversation(30, 31, &[]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.stats().await.lines, 23);
}

// ---------------------------------------------------------------------------
// Rejected writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_requests_are_rejected_without_mutation() {
    let store = common::test_store();
    let before = store.stats().await;

    let cases = [
        // Unknown movie.
        (
            "/movies/99/conversations/",
            conversation(10, 11, &[(10, "x")]),
            StatusCode::NOT_FOUND,
        ),
        // Unknown character.
        (
            "/movies/1/conversations/",
            conversation(10, 999, &[(10, "x")]),
            StatusCode::NOT_FOUND,
        ),
        // Same character twice.
        (
            "/movies/1/conversations/",
            conversation(10, 10, &[(10, "x")]),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        // Character from another movie.
        (
            "/movies/1/conversations/",
            conversation(10, 20, &[(10, "x")]),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        // Line spoken by someone outside the conversation.
        (
            "/movies/1/conversations/",
            conversation(10, 11, &[(10, "x"), (12, "y")]),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        // Missing field.
        (
            "/movies/1/conversations/",
            json!({"character_1_id": 10, "lines": []}),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
    ];

    for (uri, body, expected) in cases {
        let app = common::build_test_app_with_store(store.clone());
        let response = post_json(app, uri, body.clone()).await;
        assert_eq!(response.status(), expected, "unexpected status for {body}");
    }

    assert_eq!(store.stats().await, before);
}

#[tokio::test]
async fn malformed_json_returns_422_with_error_body() {
    let app = common::build_test_app();
    let response = post_raw(app, "/movies/1/conversations/", "{not json").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn outsider_line_error_names_the_line() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/movies/1/conversations/",
        conversation(10, 11, &[(10, "x"), (12, "y")]),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("line 1"));
}
