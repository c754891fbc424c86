//! Handlers for the `/movies` resource.

use axum::extract::State;
use axum::Json;
use filmlines_core::report::{self, MovieQuery};
use filmlines_core::types::DbId;
use filmlines_core::views::{MovieDetail, MovieSummary};

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::query::MovieListParams;
use crate::state::AppState;

/// GET /movies/{movie_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<DbId>,
) -> AppResult<Json<MovieDetail>> {
    let catalog = state.store.read().await;
    Ok(Json(report::movie_detail(&catalog, movie_id)?))
}

/// GET /movies/
///
/// Query params: `name`, `limit`, `offset`, `sort`
/// (`movie_title` | `year` | `rating`).
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MovieListParams>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let query = MovieQuery::try_from(params)?;
    let catalog = state.store.read().await;
    Ok(Json(report::list_movies(&catalog, &query)))
}
