//! Repository for the `lines` table.

use filmlines_core::models::Line;
use filmlines_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::line::LineRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "line_id, character_id, movie_id, conversation_id, line_sort, line_text";

/// Read access to lines plus the insert used by the conversation write path.
pub struct LineRepo;

impl LineRepo {
    /// Load every line, ordered by conversation then position.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<LineRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lines ORDER BY conversation_id, line_sort, line_id"
        );
        sqlx::query_as::<_, LineRow>(&query).fetch_all(pool).await
    }

    /// Lines of the given conversations, ordered by conversation then position.
    pub async fn list_for_conversations(
        pool: &PgPool,
        conversation_ids: &[DbId],
    ) -> Result<Vec<LineRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lines WHERE conversation_id = ANY($1) \
             ORDER BY conversation_id, line_sort, line_id"
        );
        sqlx::query_as::<_, LineRow>(&query)
            .bind(conversation_ids)
            .fetch_all(pool)
            .await
    }

    /// Insert lines with caller-allocated ids inside an open transaction.
    pub async fn insert_all(
        tx: &mut Transaction<'_, Postgres>,
        lines: &[Line],
    ) -> Result<(), sqlx::Error> {
        for line in lines {
            sqlx::query(
                "INSERT INTO lines \
                    (line_id, character_id, movie_id, conversation_id, line_sort, line_text) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(line.id)
            .bind(line.character_id)
            .bind(line.movie_id)
            .bind(line.conversation_id)
            .bind(line.line_sort)
            .bind(&line.line_text)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
