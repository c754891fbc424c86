//! Validation and id allocation for new conversations.
//!
//! [`plan_conversation`] runs every check against the current catalog and
//! returns the exact rows to persist. Nothing is mutated here; the caller
//! persists the plan and appends it to the catalog under one write lock.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::models::{Conversation, Line};
use crate::types::DbId;

/// Request body for `POST /movies/{movie_id}/conversations/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConversation {
    pub character_1_id: DbId,
    pub character_2_id: DbId,
    pub lines: Vec<NewLine>,
}

/// One submitted line. Its position in the request becomes its `line_sort`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLine {
    pub character_id: DbId,
    pub line_text: String,
}

/// Rows ready to be written: one conversation and its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationPlan {
    pub conversation: Conversation,
    pub lines: Vec<Line>,
}

/// Validate `input` against `catalog` and allocate ids for the new rows.
///
/// Checks, in order:
///
/// 1. the movie exists (`NotFound`);
/// 2. both characters exist (`NotFound`);
/// 3. the two characters differ (`Validation`);
/// 4. both characters belong to the movie (`Validation`);
/// 5. every line is spoken by one of the two (`Validation`).
///
/// The conversation id and line ids continue after the current maximum.
/// `line_sort` is the 1-based position of the line in the request.
pub fn plan_conversation(
    catalog: &Catalog,
    movie_id: DbId,
    input: &NewConversation,
) -> Result<ConversationPlan, CoreError> {
    catalog.require_movie(movie_id)?;
    let first = catalog.require_character(input.character_1_id)?;
    let second = catalog.require_character(input.character_2_id)?;

    if first.id == second.id {
        return Err(CoreError::Validation(format!(
            "a conversation needs two different characters, got {} twice",
            first.id
        )));
    }

    for character in [first, second] {
        if character.movie_id != movie_id {
            return Err(CoreError::Validation(format!(
                "character {} belongs to movie {}, not movie {movie_id}",
                character.id, character.movie_id
            )));
        }
    }

    if let Some((index, stray)) = input
        .lines
        .iter()
        .enumerate()
        .find(|(_, line)| line.character_id != first.id && line.character_id != second.id)
    {
        return Err(CoreError::Validation(format!(
            "line {index} is attributed to character {}, who is not part of this conversation",
            stray.character_id
        )));
    }

    let conversation = Conversation {
        id: catalog.next_conversation_id(),
        character1_id: first.id,
        character2_id: second.id,
        movie_id,
    };

    let first_line_id = catalog.next_line_id();
    let lines = input
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let line_sort = i32::try_from(index + 1).map_err(|_| {
                CoreError::Validation("a conversation cannot hold that many lines".to_string())
            })?;
            Ok(Line {
                id: first_line_id + DbId::from(line_sort) - 1,
                character_id: line.character_id,
                movie_id,
                conversation_id: conversation.id,
                line_sort,
                line_text: line.line_text.clone(),
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(ConversationPlan {
        conversation,
        lines,
    })
}
