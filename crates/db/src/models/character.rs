//! Character row.

use filmlines_core::models::Character;
use filmlines_core::types::DbId;
use sqlx::FromRow;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow)]
pub struct CharacterRow {
    pub character_id: DbId,
    pub name: String,
    pub movie_id: DbId,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

impl From<CharacterRow> for Character {
    fn from(row: CharacterRow) -> Self {
        Self {
            id: row.character_id,
            name: row.name,
            movie_id: row.movie_id,
            gender: row.gender,
            age: row.age,
        }
    }
}
