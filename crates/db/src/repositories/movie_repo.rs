//! Repository for the `movies` table.

use sqlx::PgPool;

use crate::models::movie::MovieRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "movie_id, title, year, imdb_rating, imdb_votes";

/// Read access to movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Load every movie, ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY movie_id");
        sqlx::query_as::<_, MovieRow>(&query).fetch_all(pool).await
    }
}
