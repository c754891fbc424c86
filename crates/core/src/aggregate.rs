//! Line-count aggregation over a [`Catalog`].
//!
//! Every function returns tallies in ascending id order; ordering by count
//! is the job of [`crate::ranking`].

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::models::{Character, Movie};
use crate::types::DbId;

/// Lines exchanged between a character and one conversation partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartnerTally {
    pub partner_id: DbId,
    /// Lines of every conversation the two share, whoever spoke them.
    pub lines_together: usize,
}

/// Lines spoken by one character inside a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerTally {
    pub character_id: DbId,
    pub lines: usize,
}

/// A character joined with its movie and total spoken lines.
#[derive(Debug, Clone, Copy)]
pub struct CharacterStat<'a> {
    pub character: &'a Character,
    pub movie: &'a Movie,
    pub lines: usize,
}

/// Sum conversation lengths per partner for every conversation the
/// character takes part in.
///
/// A partner met in several conversations gets one tally covering all of
/// them. Partners whose shared conversations are empty are kept with 0.
pub fn lines_together(catalog: &Catalog, character_id: DbId) -> Vec<PartnerTally> {
    let mut tallies: BTreeMap<DbId, usize> = BTreeMap::new();

    for conversation in catalog.conversations_of(character_id) {
        let Some(partner_id) = conversation.other_participant(character_id) else {
            continue;
        };
        *tallies.entry(partner_id).or_default() +=
            catalog.line_count_in_conversation(conversation.id);
    }

    tallies
        .into_iter()
        .map(|(partner_id, lines_together)| PartnerTally {
            partner_id,
            lines_together,
        })
        .collect()
}

/// Group a movie's lines by speaker.
///
/// Characters of the movie who never speak do not appear.
pub fn lines_by_speaker(catalog: &Catalog, movie_id: DbId) -> Vec<SpeakerTally> {
    let mut tallies: BTreeMap<DbId, usize> = BTreeMap::new();

    for line in catalog.lines_in_movie(movie_id) {
        *tallies.entry(line.character_id).or_default() += 1;
    }

    tallies
        .into_iter()
        .map(|(character_id, lines)| SpeakerTally {
            character_id,
            lines,
        })
        .collect()
}

/// Join every character with its movie and spoken-line total.
pub fn character_stats(catalog: &Catalog) -> impl Iterator<Item = CharacterStat<'_>> + '_ {
    catalog.characters().filter_map(|character| {
        let movie = catalog.movie(character.movie_id)?;
        Some(CharacterStat {
            character,
            movie,
            lines: catalog.line_count_for_character(character.id),
        })
    })
}
