//! Repository for the `conversations` table.

use filmlines_core::conversation::ConversationPlan;
use filmlines_core::types::DbId;
use sqlx::PgPool;

use crate::models::conversation::ConversationRow;
use crate::repositories::LineRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "conversation_id, character1_id, character2_id, movie_id";

/// Read access to conversations and the transactional create.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Load every conversation, ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ConversationRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conversations ORDER BY conversation_id");
        sqlx::query_as::<_, ConversationRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Conversations with `conversation_id >= first_id`, ordered by id.
    pub async fn list_from(
        pool: &PgPool,
        first_id: DbId,
    ) -> Result<Vec<ConversationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversations \
             WHERE conversation_id >= $1 ORDER BY conversation_id"
        );
        sqlx::query_as::<_, ConversationRow>(&query)
            .bind(first_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a conversation and all of its lines in one transaction.
    ///
    /// Either every row is committed or none is.
    pub async fn create_with_lines(
        pool: &PgPool,
        plan: &ConversationPlan,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let conversation = &plan.conversation;
        sqlx::query(
            "INSERT INTO conversations (conversation_id, character1_id, character2_id, movie_id) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(conversation.id)
        .bind(conversation.character1_id)
        .bind(conversation.character2_id)
        .bind(conversation.movie_id)
        .execute(&mut *tx)
        .await?;

        LineRepo::insert_all(&mut tx, &plan.lines).await?;

        tx.commit().await?;
        Ok(())
    }
}
