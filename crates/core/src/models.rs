//! Typed records for the four corpus tables.
//!
//! Rows are converted into these structs once at load time; nothing
//! downstream deals with loosely-typed column maps.

use crate::types::DbId;

/// A row from the `movies` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    /// Release year as published in the corpus (`1989/I` style suffixes
    /// are kept verbatim).
    pub year: String,
    pub imdb_rating: f64,
    pub imdb_votes: i64,
}

/// A row from the `characters` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub movie_id: DbId,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

/// A row from the `conversations` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: DbId,
    pub character1_id: DbId,
    pub character2_id: DbId,
    pub movie_id: DbId,
}

impl Conversation {
    /// Whether `character_id` is one of the two participants.
    pub fn involves(&self, character_id: DbId) -> bool {
        self.character1_id == character_id || self.character2_id == character_id
    }

    /// The participant opposite `character_id`, or `None` if the character
    /// is not part of this conversation.
    pub fn other_participant(&self, character_id: DbId) -> Option<DbId> {
        if self.character1_id == character_id {
            Some(self.character2_id)
        } else if self.character2_id == character_id {
            Some(self.character1_id)
        } else {
            None
        }
    }
}

/// A row from the `lines` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: DbId,
    pub character_id: DbId,
    pub movie_id: DbId,
    pub conversation_id: DbId,
    /// Position within the conversation.
    pub line_sort: i32,
    pub line_text: String,
}
