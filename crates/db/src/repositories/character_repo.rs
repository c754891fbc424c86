//! Repository for the `characters` table.

use sqlx::PgPool;

use crate::models::character::CharacterRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "character_id, name, movie_id, gender, age";

/// Read access to characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Load every character, ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CharacterRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY character_id");
        sqlx::query_as::<_, CharacterRow>(&query)
            .fetch_all(pool)
            .await
    }
}
