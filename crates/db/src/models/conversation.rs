//! Conversation row.

use filmlines_core::models::Conversation;
use filmlines_core::types::DbId;
use sqlx::FromRow;

/// A row from the `conversations` table.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationRow {
    pub conversation_id: DbId,
    pub character1_id: DbId,
    pub character2_id: DbId,
    pub movie_id: DbId,
}

impl From<ConversationRow> for Conversation {
    fn from(row: ConversationRow) -> Self {
        Self {
            id: row.conversation_id,
            character1_id: row.character1_id,
            character2_id: row.character2_id,
            movie_id: row.movie_id,
        }
    }
}
