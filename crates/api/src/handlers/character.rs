//! Handlers for the `/characters` resource.

use axum::extract::State;
use axum::Json;
use filmlines_core::report::{self, CharacterQuery};
use filmlines_core::types::DbId;
use filmlines_core::views::{CharacterDetail, CharacterSummary};

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::query::CharacterListParams;
use crate::state::AppState;

/// GET /characters/{id}
///
/// The character with its top conversation partners by lines exchanged.
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<CharacterDetail>> {
    let catalog = state.store.read().await;
    let detail = report::character_detail(&catalog, id)?;
    Ok(Json(detail))
}

/// GET /characters/
///
/// Query params: `name`, `limit`, `offset`, `sort`
/// (`character` | `movie` | `number_of_lines`).
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CharacterListParams>,
) -> AppResult<Json<Vec<CharacterSummary>>> {
    let query = CharacterQuery::try_from(params)?;
    let catalog = state.store.read().await;
    Ok(Json(report::list_characters(&catalog, &query)))
}
