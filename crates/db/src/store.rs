//! The process-wide data-access object.
//!
//! [`MovieStore`] owns the in-memory [`Catalog`] behind a tokio `RwLock`.
//! Reads share the lock; the conversation write path takes it exclusively
//! for validation, persistence and append, so readers never observe a
//! conversation without its lines.

use filmlines_core::catalog::{Catalog, CatalogError, CatalogStats};
use filmlines_core::conversation::{plan_conversation, NewConversation};
use filmlines_core::error::CoreError;
use filmlines_core::models::{Character, Conversation, Line, Movie};
use filmlines_core::types::DbId;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::repositories::{CharacterRepo, ConversationRepo, LineRepo, MovieRepo};
use crate::DbPool;

/// Errors from loading or writing through the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error (unknown id, failed validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The loaded tables violate referential integrity.
    #[error("Catalog integrity error: {0}")]
    Catalog(#[from] CatalogError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Where appended conversations are persisted.
#[derive(Debug)]
enum Persistence {
    Postgres(DbPool),
    /// Appends live only in memory. Used by tests and local fixtures.
    Memory,
}

/// Shared handle to the corpus. Construct once at startup and share via
/// `Arc`.
#[derive(Debug)]
pub struct MovieStore {
    catalog: RwLock<Catalog>,
    persistence: Persistence,
}

impl MovieStore {
    /// Load all four tables from PostgreSQL and build the catalog.
    ///
    /// Any integrity violation in the stored data is returned as
    /// [`StoreError::Catalog`]; callers treat it as fatal.
    pub async fn load(pool: DbPool) -> Result<Self, StoreError> {
        let (movies, characters, conversations, lines) = tokio::try_join!(
            MovieRepo::list_all(&pool),
            CharacterRepo::list_all(&pool),
            ConversationRepo::list_all(&pool),
            LineRepo::list_all(&pool),
        )?;

        let catalog = Catalog::build(
            movies.into_iter().map(Movie::from).collect(),
            characters.into_iter().map(Character::from).collect(),
            conversations.into_iter().map(Conversation::from).collect(),
            lines.into_iter().map(Line::from).collect(),
        )?;

        let stats = catalog.stats();
        tracing::info!(
            movies = stats.movies,
            characters = stats.characters,
            conversations = stats.conversations,
            lines = stats.lines,
            "Catalog loaded"
        );

        Ok(Self {
            catalog: RwLock::new(catalog),
            persistence: Persistence::Postgres(pool),
        })
    }

    /// Wrap an already-built catalog without a database behind it.
    pub fn in_memory(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            persistence: Persistence::Memory,
        }
    }

    /// Shared read access to the catalog.
    pub async fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().await
    }

    pub async fn stats(&self) -> CatalogStats {
        self.catalog.read().await.stats()
    }

    /// Validate and persist a new conversation, returning its id.
    ///
    /// Validation runs against the same catalog state the rows are
    /// appended to. If the database transaction fails nothing is appended.
    ///
    /// A commit can land in the database without reaching the catalog, for
    /// example when the request is cancelled mid-commit. The next write then
    /// collides on the allocated ids; on a unique violation the missing rows
    /// are pulled into the catalog before the error is returned, so a retry
    /// gets fresh ids.
    pub async fn add_conversation(
        &self,
        movie_id: DbId,
        input: &NewConversation,
    ) -> Result<DbId, StoreError> {
        let mut catalog = self.catalog.write().await;

        let plan = plan_conversation(&catalog, movie_id, input)?;

        if let Persistence::Postgres(pool) = &self.persistence {
            if let Err(err) = ConversationRepo::create_with_lines(pool, &plan).await {
                if is_unique_violation(&err) {
                    catch_up(pool, &mut catalog).await;
                }
                return Err(err.into());
            }
        }

        let conversation_id = plan.conversation.id;
        let line_count = plan.lines.len();
        catalog.append(plan.conversation, plan.lines)?;

        tracing::info!(conversation_id, movie_id, line_count, "Conversation created");
        Ok(conversation_id)
    }

    /// Check the backing database, if there is one.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        match &self.persistence {
            Persistence::Postgres(pool) => crate::health_check(pool).await,
            Persistence::Memory => Ok(()),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Pull conversations committed past the catalog's newest id into the
/// catalog. Failures are logged; the catalog keeps whatever was absorbed.
async fn catch_up(pool: &DbPool, catalog: &mut Catalog) {
    let first_id = catalog.next_conversation_id();
    let result = async {
        let conversations = ConversationRepo::list_from(pool, first_id).await?;
        let ids: Vec<DbId> = conversations.iter().map(|row| row.conversation_id).collect();
        let lines = LineRepo::list_for_conversations(pool, &ids).await?;
        let added = catalog.absorb(
            conversations.into_iter().map(Conversation::from).collect(),
            lines.into_iter().map(Line::from).collect(),
        )?;
        Ok::<_, StoreError>(added)
    }
    .await;

    match result {
        Ok(added) => {
            tracing::warn!(first_id, added, "Catalog caught up with rows committed outside it")
        }
        Err(err) => tracing::error!(first_id, error = %err, "Failed to catch up catalog"),
    }
}
