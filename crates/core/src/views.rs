//! Response shapes served by the API.
//!
//! Field names are part of the public contract. Empty strings coming from
//! the corpus are projected as `null`.

use serde::Serialize;

use crate::aggregate::{CharacterStat, PartnerTally, SpeakerTally};
use crate::models::{Character, Line, Movie};
use crate::types::DbId;

/// `None` for empty strings, an owned copy otherwise.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn gender_of(character: &Character) -> Option<String> {
    character.gender.as_deref().and_then(non_empty)
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// `GET /characters/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDetail {
    pub character_id: DbId,
    pub character: String,
    pub movie: Option<String>,
    pub gender: Option<String>,
    pub top_conversations: Vec<ConversationPartner>,
}

impl CharacterDetail {
    pub fn new(character: &Character, movie: &Movie, partners: Vec<ConversationPartner>) -> Self {
        Self {
            character_id: character.id,
            character: character.name.clone(),
            movie: non_empty(&movie.title),
            gender: gender_of(character),
            top_conversations: partners,
        }
    }
}

/// One row of `top_conversations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationPartner {
    pub character_id: DbId,
    pub character: String,
    pub gender: Option<String>,
    pub number_of_lines_together: usize,
}

impl ConversationPartner {
    pub fn new(partner: &Character, tally: &PartnerTally) -> Self {
        Self {
            character_id: partner.id,
            character: partner.name.clone(),
            gender: gender_of(partner),
            number_of_lines_together: tally.lines_together,
        }
    }
}

/// One row of `GET /characters/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSummary {
    pub character_id: DbId,
    pub character: String,
    pub movie: Option<String>,
    pub number_of_lines: usize,
}

impl From<&CharacterStat<'_>> for CharacterSummary {
    fn from(stat: &CharacterStat<'_>) -> Self {
        Self {
            character_id: stat.character.id,
            character: stat.character.name.clone(),
            movie: non_empty(&stat.movie.title),
            number_of_lines: stat.lines,
        }
    }
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// `GET /movies/{movie_id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    pub movie_id: DbId,
    pub title: Option<String>,
    pub top_characters: Vec<TopCharacter>,
}

/// One row of `top_characters`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCharacter {
    pub character_id: DbId,
    pub character: String,
    pub num_lines: usize,
}

impl TopCharacter {
    pub fn new(character: &Character, tally: &SpeakerTally) -> Self {
        Self {
            character_id: character.id,
            character: character.name.clone(),
            num_lines: tally.lines,
        }
    }
}

/// One row of `GET /movies/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub movie_id: DbId,
    pub movie_title: Option<String>,
    pub year: Option<String>,
    pub imdb_rating: f64,
    pub imdb_votes: i64,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.id,
            movie_title: non_empty(&movie.title),
            year: non_empty(&movie.year),
            imdb_rating: movie.imdb_rating,
            imdb_votes: movie.imdb_votes,
        }
    }
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

/// A line together with who said it, to whom, and where.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDetail {
    pub line_id: DbId,
    pub conversation_id: DbId,
    pub line_sort: i32,
    pub movie_id: DbId,
    pub movie: Option<String>,
    pub character_id: DbId,
    pub character: String,
    pub other_character_id: DbId,
    pub other_character: String,
    pub line_text: String,
}

impl LineDetail {
    pub fn new(line: &Line, movie: &Movie, speaker: &Character, listener: &Character) -> Self {
        Self {
            line_id: line.id,
            conversation_id: line.conversation_id,
            line_sort: line.line_sort,
            movie_id: movie.id,
            movie: non_empty(&movie.title),
            character_id: speaker.id,
            character: speaker.name.clone(),
            other_character_id: listener.id,
            other_character: listener.name.clone(),
            line_text: line.line_text.clone(),
        }
    }
}

/// `GET /lines/?character_id=`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterLines {
    pub character_id: DbId,
    pub character: String,
    pub lines: Vec<LineDetail>,
}

/// `GET /lines/movie/{movie_id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieLines {
    pub movie_id: DbId,
    pub movie: Option<String>,
    pub lines: Vec<LineDetail>,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// `POST /movies/{movie_id}/conversations/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversationCreated {
    pub conversation_id: DbId,
}
