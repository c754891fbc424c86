//! Read operations behind the API endpoints.
//!
//! Each function runs the full pipeline for one endpoint: look up, aggregate,
//! rank, paginate, project. None of them mutates the catalog.

use crate::aggregate::{character_stats, lines_by_speaker, lines_together};
use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::models::{Line, Movie};
use crate::pagination::Page;
use crate::ranking::{
    contains_ignore_case, rank_partners, sort_characters, sort_movies, top_speakers,
    CharacterSort, MovieSort, TOP_CHARACTERS,
};
use crate::types::DbId;
use crate::views::{
    non_empty, CharacterDetail, CharacterLines, CharacterSummary, ConversationPartner,
    LineDetail, MovieDetail, MovieLines, MovieSummary, TopCharacter,
};

/// Filter, ordering and window for the character listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterQuery {
    /// Case-insensitive substring of the character name.
    pub name: String,
    pub sort: CharacterSort,
    pub page: Page,
}

/// Filter, ordering and window for the movie listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieQuery {
    /// Case-insensitive substring of the movie title.
    pub name: String,
    pub sort: MovieSort,
    pub page: Page,
}

/// A character with every partner it has shared a conversation with,
/// ranked by lines together. The partner list is not capped.
pub fn character_detail(catalog: &Catalog, character_id: DbId) -> Result<CharacterDetail, CoreError> {
    let character = catalog.require_character(character_id)?;
    let movie = catalog.require_movie(character.movie_id)?;

    let mut tallies = lines_together(catalog, character_id);
    rank_partners(&mut tallies);

    let partners = tallies
        .iter()
        .map(|tally| {
            let partner = catalog.require_character(tally.partner_id)?;
            Ok(ConversationPartner::new(partner, tally))
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(CharacterDetail::new(character, movie, partners))
}

pub fn list_characters(catalog: &Catalog, query: &CharacterQuery) -> Vec<CharacterSummary> {
    let mut rows: Vec<_> = character_stats(catalog)
        .filter(|stat| contains_ignore_case(&stat.character.name, &query.name))
        .collect();
    sort_characters(&mut rows, query.sort);

    query
        .page
        .apply(&rows)
        .map(CharacterSummary::from)
        .collect()
}

/// A movie with its five most talkative characters.
pub fn movie_detail(catalog: &Catalog, movie_id: DbId) -> Result<MovieDetail, CoreError> {
    let movie = catalog.require_movie(movie_id)?;

    let top_characters = top_speakers(lines_by_speaker(catalog, movie_id), TOP_CHARACTERS)
        .iter()
        .map(|tally| {
            let character = catalog.require_character(tally.character_id)?;
            Ok(TopCharacter::new(character, tally))
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(MovieDetail {
        movie_id: movie.id,
        title: non_empty(&movie.title),
        top_characters,
    })
}

pub fn list_movies(catalog: &Catalog, query: &MovieQuery) -> Vec<MovieSummary> {
    let mut rows: Vec<&Movie> = catalog
        .movies()
        .filter(|movie| contains_ignore_case(&movie.title, &query.name))
        .collect();
    sort_movies(&mut rows, query.sort);

    query
        .page
        .apply(rows)
        .map(MovieSummary::from)
        .collect()
}

pub fn line_detail(catalog: &Catalog, line_id: DbId) -> Result<LineDetail, CoreError> {
    let line = catalog.require_line(line_id)?;
    describe_line(catalog, line)
}

/// Lines spoken by one character, in conversation order.
pub fn lines_by_character(
    catalog: &Catalog,
    character_id: DbId,
    page: Page,
) -> Result<CharacterLines, CoreError> {
    let character = catalog.require_character(character_id)?;

    let lines = page
        .apply(catalog.lines_spoken_by(character_id))
        .map(|line| describe_line(catalog, line))
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(CharacterLines {
        character_id: character.id,
        character: character.name.clone(),
        lines,
    })
}

/// Every line of one movie, in conversation order.
pub fn lines_by_movie(catalog: &Catalog, movie_id: DbId, page: Page) -> Result<MovieLines, CoreError> {
    let movie = catalog.require_movie(movie_id)?;

    let lines = page
        .apply(catalog.lines_in_movie(movie_id))
        .map(|line| describe_line(catalog, line))
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(MovieLines {
        movie_id: movie.id,
        movie: non_empty(&movie.title),
        lines,
    })
}

fn describe_line(catalog: &Catalog, line: &Line) -> Result<LineDetail, CoreError> {
    let conversation = catalog.conversation(line.conversation_id).ok_or_else(|| {
        CoreError::Internal(format!(
            "line {} references missing conversation {}",
            line.id, line.conversation_id
        ))
    })?;
    let listener_id = conversation
        .other_participant(line.character_id)
        .ok_or_else(|| {
            CoreError::Internal(format!(
                "line {} speaker {} is not in conversation {}",
                line.id, line.character_id, conversation.id
            ))
        })?;

    let movie = catalog.require_movie(line.movie_id)?;
    let speaker = catalog.require_character(line.character_id)?;
    let listener = catalog.require_character(listener_id)?;

    Ok(LineDetail::new(line, movie, speaker, listener))
}
