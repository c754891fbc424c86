//! Handlers for the `/lines` resource.

use axum::extract::State;
use axum::Json;
use filmlines_core::report;
use filmlines_core::types::DbId;
use filmlines_core::views::{CharacterLines, LineDetail, MovieLines};

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::query::{LineListParams, PaginationParams};
use crate::state::AppState;

/// GET /lines/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<LineDetail>> {
    let catalog = state.store.read().await;
    Ok(Json(report::line_detail(&catalog, id)?))
}

/// GET /lines/?character_id={id}
pub async fn list_by_character(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LineListParams>,
) -> AppResult<Json<CharacterLines>> {
    let page = params.page()?;
    let catalog = state.store.read().await;
    let lines = report::lines_by_character(&catalog, params.character_id, page)?;
    Ok(Json(lines))
}

/// GET /lines/movie/{movie_id}
pub async fn list_by_movie(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<DbId>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<MovieLines>> {
    let page = params.page()?;
    let catalog = state.store.read().await;
    let lines = report::lines_by_movie(&catalog, movie_id, page)?;
    Ok(Json(lines))
}
