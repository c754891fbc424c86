//! Handler for adding conversations to a movie.

use axum::extract::State;
use axum::Json;
use filmlines_core::conversation::NewConversation;
use filmlines_core::types::DbId;
use filmlines_core::views::ConversationCreated;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// POST /movies/{movie_id}/conversations/
///
/// Body: `{ "character_1_id", "character_2_id", "lines": [{ "character_id", "line_text" }] }`.
/// Lines keep the order they are submitted in.
pub async fn create(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<NewConversation>,
) -> AppResult<Json<ConversationCreated>> {
    let conversation_id = state.store.add_conversation(movie_id, &input).await?;
    Ok(Json(ConversationCreated { conversation_id }))
}
