//! Line row.

use filmlines_core::models::Line;
use filmlines_core::types::DbId;
use sqlx::FromRow;

/// A row from the `lines` table.
#[derive(Debug, Clone, FromRow)]
pub struct LineRow {
    pub line_id: DbId,
    pub character_id: DbId,
    pub movie_id: DbId,
    pub conversation_id: DbId,
    pub line_sort: i32,
    pub line_text: String,
}

impl From<LineRow> for Line {
    fn from(row: LineRow) -> Self {
        Self {
            id: row.line_id,
            character_id: row.character_id,
            movie_id: row.movie_id,
            conversation_id: row.conversation_id,
            line_sort: row.line_sort,
            line_text: row.line_text,
        }
    }
}
