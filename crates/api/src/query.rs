//! Shared query parameter types for list endpoints.
//!
//! Raw parameters are deserialized as-is and converted into the validated
//! query structs from `filmlines_core::report`. Range checks happen in the
//! conversion, not in serde.

use filmlines_core::error::CoreError;
use filmlines_core::pagination::Page;
use filmlines_core::ranking::{CharacterSort, MovieSort};
use filmlines_core::report::{CharacterQuery, MovieQuery};
use filmlines_core::types::DbId;
use serde::Deserialize;

/// Bare limit/offset parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Result<Page, CoreError> {
        Page::new(self.limit, self.offset)
    }
}

/// `GET /characters/` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CharacterListParams {
    /// Case-insensitive substring filter on the character name.
    #[serde(default)]
    pub name: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub sort: CharacterSort,
}

impl TryFrom<CharacterListParams> for CharacterQuery {
    type Error = CoreError;

    fn try_from(params: CharacterListParams) -> Result<Self, Self::Error> {
        Ok(CharacterQuery {
            page: Page::new(params.limit, params.offset)?,
            name: params.name,
            sort: params.sort,
        })
    }
}

/// `GET /movies/` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    /// Case-insensitive substring filter on the movie title.
    #[serde(default)]
    pub name: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub sort: MovieSort,
}

impl TryFrom<MovieListParams> for MovieQuery {
    type Error = CoreError;

    fn try_from(params: MovieListParams) -> Result<Self, Self::Error> {
        Ok(MovieQuery {
            page: Page::new(params.limit, params.offset)?,
            name: params.name,
            sort: params.sort,
        })
    }
}

/// `GET /lines/` parameters. `character_id` is required.
#[derive(Debug, Deserialize)]
pub struct LineListParams {
    pub character_id: DbId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LineListParams {
    pub fn page(&self) -> Result<Page, CoreError> {
        Page::new(self.limit, self.offset)
    }
}
