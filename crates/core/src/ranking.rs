//! Ordering rules for aggregated rows.
//!
//! Every ordering ends with an id-ascending tie-break so that equal keys
//! come back in the same order on every call.

use serde::{Deserialize, Serialize};

use crate::aggregate::{CharacterStat, PartnerTally, SpeakerTally};
use crate::models::Movie;

/// Number of entries in a movie's top-cast table.
pub const TOP_CHARACTERS: usize = 5;

/// Sort keys accepted by the character listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterSort {
    /// Name, alphabetical.
    #[default]
    Character,
    /// Movie title, alphabetical.
    Movie,
    /// Spoken lines, highest first.
    NumberOfLines,
}

/// Sort keys accepted by the movie listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieSort {
    /// Title, alphabetical.
    #[default]
    MovieTitle,
    /// Release year, earliest first.
    Year,
    /// IMDB rating, highest first.
    Rating,
}

/// Order conversation partners by lines together, highest first.
pub fn rank_partners(tallies: &mut [PartnerTally]) {
    tallies.sort_by(|a, b| {
        b.lines_together
            .cmp(&a.lines_together)
            .then(a.partner_id.cmp(&b.partner_id))
    });
}

/// Keep the `n` speakers with the most lines, highest first.
pub fn top_speakers(mut tallies: Vec<SpeakerTally>, n: usize) -> Vec<SpeakerTally> {
    tallies.sort_by(|a, b| {
        b.lines
            .cmp(&a.lines)
            .then(a.character_id.cmp(&b.character_id))
    });
    tallies.truncate(n);
    tallies
}

pub fn sort_characters(rows: &mut [CharacterStat<'_>], sort: CharacterSort) {
    rows.sort_by(|a, b| {
        let primary = match sort {
            CharacterSort::Character => a.character.name.cmp(&b.character.name),
            CharacterSort::Movie => a.movie.title.cmp(&b.movie.title),
            CharacterSort::NumberOfLines => b.lines.cmp(&a.lines),
        };
        primary.then(a.character.id.cmp(&b.character.id))
    });
}

pub fn sort_movies(rows: &mut [&Movie], sort: MovieSort) {
    rows.sort_by(|a, b| {
        let primary = match sort {
            MovieSort::MovieTitle => a.title.cmp(&b.title),
            MovieSort::Year => a.year.cmp(&b.year),
            MovieSort::Rating => b.imdb_rating.total_cmp(&a.imdb_rating),
        };
        primary.then(a.id.cmp(&b.id))
    });
}

/// Whether `needle` occurs in `haystack`, ignoring case. An empty needle
/// matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
