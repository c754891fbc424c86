//! Movie row.

use filmlines_core::models::Movie;
use filmlines_core::types::DbId;
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub movie_id: DbId,
    pub title: String,
    pub year: String,
    pub imdb_rating: f64,
    pub imdb_votes: i64,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.movie_id,
            title: row.title,
            year: row.year,
            imdb_rating: row.imdb_rating,
            imdb_votes: row.imdb_votes,
        }
    }
}
