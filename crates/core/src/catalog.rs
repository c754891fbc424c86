//! In-memory snapshot of the corpus with the derived indexes every read
//! path needs.
//!
//! A [`Catalog`] is built once from the four tables and then only grows
//! through [`Catalog::append`]. Referential integrity is checked on the way
//! in, so lookups through the indexes never dangle.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::CoreError;
use crate::models::{Character, Conversation, Line, Movie};
use crate::types::DbId;

/// Integrity violations found while building or extending a [`Catalog`].
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: DbId },

    #[error("{entity} {id} references missing {target} {target_id}")]
    DanglingReference {
        entity: &'static str,
        id: DbId,
        target: &'static str,
        target_id: DbId,
    },

    #[error("Conversation {id} pairs character {character_id} with itself")]
    SelfConversation { id: DbId, character_id: DbId },

    #[error(
        "{entity} {id} is in movie {movie_id} but {target} {target_id} is in movie {target_movie_id}"
    )]
    CrossMovie {
        entity: &'static str,
        id: DbId,
        movie_id: DbId,
        target: &'static str,
        target_id: DbId,
        target_movie_id: DbId,
    },

    #[error("Line {line_id} is spoken by character {character_id}, who is not part of conversation {conversation_id}")]
    NotAParticipant {
        line_id: DbId,
        character_id: DbId,
        conversation_id: DbId,
    },

    #[error("Conversation {conversation_id} has more than one line at position {line_sort}")]
    DuplicateLineSort { conversation_id: DbId, line_sort: i32 },
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub movies: usize,
    pub characters: usize,
    pub conversations: usize,
    pub lines: usize,
}

/// Indexed, read-mostly copy of the movie-dialogue corpus.
#[derive(Debug, Default)]
pub struct Catalog {
    movies: BTreeMap<DbId, Movie>,
    characters: BTreeMap<DbId, Character>,
    conversations: BTreeMap<DbId, Conversation>,
    lines: BTreeMap<DbId, Line>,

    conversations_by_character: HashMap<DbId, Vec<DbId>>,
    /// Ordered by `(line_sort, id)`.
    lines_by_conversation: HashMap<DbId, Vec<DbId>>,
    /// Ordered by `(conversation_id, line_sort, id)`.
    lines_by_character: HashMap<DbId, Vec<DbId>>,
    /// Ordered by `(conversation_id, line_sort, id)`.
    lines_by_movie: HashMap<DbId, Vec<DbId>>,
}

impl Catalog {
    /// Build a snapshot from full table loads.
    ///
    /// Fails on the first integrity violation; callers treat that as a
    /// fatal startup error.
    pub fn build(
        movies: Vec<Movie>,
        characters: Vec<Character>,
        conversations: Vec<Conversation>,
        lines: Vec<Line>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for movie in movies {
            if catalog.movies.contains_key(&movie.id) {
                return Err(CatalogError::DuplicateId {
                    entity: "Movie",
                    id: movie.id,
                });
            }
            catalog.movies.insert(movie.id, movie);
        }

        for character in characters {
            catalog.check_character(&character)?;
            catalog.characters.insert(character.id, character);
        }

        for conversation in conversations {
            catalog.check_conversation(&conversation)?;
            catalog.index_conversation(conversation);
        }

        let mut positions = HashSet::new();
        for line in lines {
            let conversation = catalog.conversations.get(&line.conversation_id).ok_or(
                CatalogError::DanglingReference {
                    entity: "Line",
                    id: line.id,
                    target: "Conversation",
                    target_id: line.conversation_id,
                },
            )?;
            catalog.check_line(&line, conversation)?;
            if !positions.insert((line.conversation_id, line.line_sort)) {
                return Err(CatalogError::DuplicateLineSort {
                    conversation_id: line.conversation_id,
                    line_sort: line.line_sort,
                });
            }
            catalog.index_line(line);
        }

        catalog.sort_line_indexes();
        Ok(catalog)
    }

    /// Add a new conversation together with its lines.
    ///
    /// Everything is checked before anything is inserted, so a failed
    /// append leaves the catalog untouched.
    pub fn append(
        &mut self,
        conversation: Conversation,
        lines: Vec<Line>,
    ) -> Result<(), CatalogError> {
        self.check_conversation(&conversation)?;

        let mut ids = HashSet::new();
        let mut positions = HashSet::new();
        for line in &lines {
            if line.conversation_id != conversation.id {
                return Err(CatalogError::DanglingReference {
                    entity: "Line",
                    id: line.id,
                    target: "Conversation",
                    target_id: line.conversation_id,
                });
            }
            self.check_line(line, &conversation)?;
            if !ids.insert(line.id) {
                return Err(CatalogError::DuplicateId {
                    entity: "Line",
                    id: line.id,
                });
            }
            if !positions.insert(line.line_sort) {
                return Err(CatalogError::DuplicateLineSort {
                    conversation_id: conversation.id,
                    line_sort: line.line_sort,
                });
            }
        }

        let touched = conversation.clone();
        let speakers: HashSet<DbId> = lines.iter().map(|line| line.character_id).collect();

        self.index_conversation(conversation);
        for line in lines {
            self.index_line(line);
        }
        self.reorder_touched(&touched, &speakers);
        Ok(())
    }

    /// Append conversations that were committed elsewhere, each with its
    /// lines. Returns how many conversations were added.
    ///
    /// Every line must belong to one of `conversations`.
    pub fn absorb(
        &mut self,
        conversations: Vec<Conversation>,
        lines: Vec<Line>,
    ) -> Result<usize, CatalogError> {
        let mut by_conversation: HashMap<DbId, Vec<Line>> = HashMap::new();
        for line in lines {
            by_conversation
                .entry(line.conversation_id)
                .or_default()
                .push(line);
        }

        let mut added = 0;
        for conversation in conversations {
            let lines = by_conversation.remove(&conversation.id).unwrap_or_default();
            self.append(conversation, lines)?;
            added += 1;
        }

        if let Some(stray) = by_conversation.into_values().flatten().next() {
            return Err(CatalogError::DanglingReference {
                entity: "Line",
                id: stray.id,
                target: "Conversation",
                target_id: stray.conversation_id,
            });
        }
        Ok(added)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn movie(&self, id: DbId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn character(&self, id: DbId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn conversation(&self, id: DbId) -> Option<&Conversation> {
        self.conversations.get(&id)
    }

    pub fn line(&self, id: DbId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Like [`Catalog::movie`] but maps a miss to `CoreError::NotFound`.
    pub fn require_movie(&self, id: DbId) -> Result<&Movie, CoreError> {
        self.movie(id).ok_or(CoreError::not_found("Movie", id))
    }

    pub fn require_character(&self, id: DbId) -> Result<&Character, CoreError> {
        self.character(id)
            .ok_or(CoreError::not_found("Character", id))
    }

    pub fn require_line(&self, id: DbId) -> Result<&Line, CoreError> {
        self.line(id).ok_or(CoreError::not_found("Line", id))
    }

    /// All movies in id order.
    pub fn movies(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.movies.values()
    }

    /// All characters in id order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> + '_ {
        self.characters.values()
    }

    /// Conversations the character takes part in, in id order.
    pub fn conversations_of(&self, character_id: DbId) -> impl Iterator<Item = &Conversation> + '_ {
        resolve(
            &self.conversations_by_character,
            &self.conversations,
            character_id,
        )
    }

    /// Lines of one conversation in `line_sort` order.
    pub fn lines_in_conversation(&self, conversation_id: DbId) -> impl Iterator<Item = &Line> + '_ {
        resolve(&self.lines_by_conversation, &self.lines, conversation_id)
    }

    /// Lines spoken by one character, grouped by conversation.
    pub fn lines_spoken_by(&self, character_id: DbId) -> impl Iterator<Item = &Line> + '_ {
        resolve(&self.lines_by_character, &self.lines, character_id)
    }

    /// Lines of one movie, grouped by conversation.
    pub fn lines_in_movie(&self, movie_id: DbId) -> impl Iterator<Item = &Line> + '_ {
        resolve(&self.lines_by_movie, &self.lines, movie_id)
    }

    pub fn line_count_in_conversation(&self, conversation_id: DbId) -> usize {
        self.lines_by_conversation
            .get(&conversation_id)
            .map_or(0, Vec::len)
    }

    pub fn line_count_for_character(&self, character_id: DbId) -> usize {
        self.lines_by_character.get(&character_id).map_or(0, Vec::len)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            movies: self.movies.len(),
            characters: self.characters.len(),
            conversations: self.conversations.len(),
            lines: self.lines.len(),
        }
    }

    /// Smallest conversation id strictly greater than every existing one.
    pub fn next_conversation_id(&self) -> DbId {
        self.conversations
            .last_key_value()
            .map_or(0, |(id, _)| id + 1)
    }

    /// Smallest line id strictly greater than every existing one.
    pub fn next_line_id(&self) -> DbId {
        self.lines.last_key_value().map_or(0, |(id, _)| id + 1)
    }

    // -----------------------------------------------------------------------
    // Integrity checks
    // -----------------------------------------------------------------------

    fn check_character(&self, character: &Character) -> Result<(), CatalogError> {
        if self.characters.contains_key(&character.id) {
            return Err(CatalogError::DuplicateId {
                entity: "Character",
                id: character.id,
            });
        }
        if !self.movies.contains_key(&character.movie_id) {
            return Err(CatalogError::DanglingReference {
                entity: "Character",
                id: character.id,
                target: "Movie",
                target_id: character.movie_id,
            });
        }
        Ok(())
    }

    fn check_conversation(&self, conversation: &Conversation) -> Result<(), CatalogError> {
        if self.conversations.contains_key(&conversation.id) {
            return Err(CatalogError::DuplicateId {
                entity: "Conversation",
                id: conversation.id,
            });
        }
        if !self.movies.contains_key(&conversation.movie_id) {
            return Err(CatalogError::DanglingReference {
                entity: "Conversation",
                id: conversation.id,
                target: "Movie",
                target_id: conversation.movie_id,
            });
        }
        if conversation.character1_id == conversation.character2_id {
            return Err(CatalogError::SelfConversation {
                id: conversation.id,
                character_id: conversation.character1_id,
            });
        }
        for character_id in [conversation.character1_id, conversation.character2_id] {
            let character =
                self.characters
                    .get(&character_id)
                    .ok_or(CatalogError::DanglingReference {
                        entity: "Conversation",
                        id: conversation.id,
                        target: "Character",
                        target_id: character_id,
                    })?;
            if character.movie_id != conversation.movie_id {
                return Err(CatalogError::CrossMovie {
                    entity: "Conversation",
                    id: conversation.id,
                    movie_id: conversation.movie_id,
                    target: "Character",
                    target_id: character_id,
                    target_movie_id: character.movie_id,
                });
            }
        }
        Ok(())
    }

    fn check_line(&self, line: &Line, conversation: &Conversation) -> Result<(), CatalogError> {
        if self.lines.contains_key(&line.id) {
            return Err(CatalogError::DuplicateId {
                entity: "Line",
                id: line.id,
            });
        }
        if line.movie_id != conversation.movie_id {
            return Err(CatalogError::CrossMovie {
                entity: "Line",
                id: line.id,
                movie_id: line.movie_id,
                target: "Conversation",
                target_id: conversation.id,
                target_movie_id: conversation.movie_id,
            });
        }
        if !conversation.involves(line.character_id) {
            return Err(CatalogError::NotAParticipant {
                line_id: line.id,
                character_id: line.character_id,
                conversation_id: conversation.id,
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Index maintenance
    // -----------------------------------------------------------------------

    fn index_conversation(&mut self, conversation: Conversation) {
        for character_id in [conversation.character1_id, conversation.character2_id] {
            self.conversations_by_character
                .entry(character_id)
                .or_default()
                .push(conversation.id);
        }
        self.conversations.insert(conversation.id, conversation);
    }

    fn index_line(&mut self, line: Line) {
        self.lines_by_conversation
            .entry(line.conversation_id)
            .or_default()
            .push(line.id);
        self.lines_by_character
            .entry(line.character_id)
            .or_default()
            .push(line.id);
        self.lines_by_movie
            .entry(line.movie_id)
            .or_default()
            .push(line.id);
        self.lines.insert(line.id, line);
    }

    fn sort_line_indexes(&mut self) {
        let lines = &self.lines;
        for ids in self.lines_by_conversation.values_mut() {
            order_by_position(lines, ids);
        }
        for ids in self
            .lines_by_character
            .values_mut()
            .chain(self.lines_by_movie.values_mut())
        {
            order_by_placement(lines, ids);
        }
        for ids in self.conversations_by_character.values_mut() {
            ids.sort_unstable();
        }
    }

    /// Restore index order for the vectors one append touched.
    ///
    /// Appended rows usually carry the largest ids, in which case every
    /// touched vector is already ordered and only gets checked.
    fn reorder_touched(&mut self, conversation: &Conversation, speakers: &HashSet<DbId>) {
        let lines = &self.lines;

        if let Some(ids) = self.lines_by_conversation.get_mut(&conversation.id) {
            order_by_position(lines, ids);
        }
        if let Some(ids) = self.lines_by_movie.get_mut(&conversation.movie_id) {
            order_by_placement(lines, ids);
        }
        for speaker in speakers {
            if let Some(ids) = self.lines_by_character.get_mut(speaker) {
                order_by_placement(lines, ids);
            }
        }
        for character_id in [conversation.character1_id, conversation.character2_id] {
            if let Some(ids) = self.conversations_by_character.get_mut(&character_id) {
                if !ids.is_sorted() {
                    ids.sort_unstable();
                }
            }
        }
    }
}

/// Order line ids by `(line_sort, id)`.
fn order_by_position(lines: &BTreeMap<DbId, Line>, ids: &mut [DbId]) {
    let key = |id: &DbId| {
        let line = &lines[id];
        (line.line_sort, line.id)
    };
    if !ids.is_sorted_by_key(key) {
        ids.sort_by_key(key);
    }
}

/// Order line ids by `(conversation_id, line_sort, id)`.
fn order_by_placement(lines: &BTreeMap<DbId, Line>, ids: &mut [DbId]) {
    let key = |id: &DbId| {
        let line = &lines[id];
        (line.conversation_id, line.line_sort, line.id)
    };
    if !ids.is_sorted_by_key(key) {
        ids.sort_by_key(key);
    }
}

fn resolve<'a, T>(
    index: &'a HashMap<DbId, Vec<DbId>>,
    table: &'a BTreeMap<DbId, T>,
    key: DbId,
) -> impl Iterator<Item = &'a T> + 'a {
    index
        .get(&key)
        .into_iter()
        .flatten()
        .filter_map(move |id| table.get(id))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::test_support::{character, conversation, line, movie, sample_catalog};

    #[test]
    fn build_indexes_every_table() {
        let catalog = sample_catalog();
        let stats = catalog.stats();
        assert_eq!(stats.movies, 3);
        assert_eq!(stats.characters, 13);
        assert_eq!(stats.conversations, 11);
        assert_eq!(stats.lines, 23);
    }

    #[test]
    fn conversations_of_lists_both_roles() {
        let catalog = sample_catalog();
        let ids: Vec<DbId> = catalog.conversations_of(11).map(|c| c.id).collect();
        assert_eq!(ids, vec![100, 101]);
    }

    #[test]
    fn lines_in_conversation_follow_line_sort() {
        let catalog = sample_catalog();
        let sorts: Vec<i32> = catalog
            .lines_in_conversation(100)
            .map(|l| l.line_sort)
            .collect();
        assert_eq!(sorts, vec![1, 2, 3]);
    }

    #[test]
    fn unknown_keys_yield_empty_iterators() {
        let catalog = sample_catalog();
        assert_eq!(catalog.conversations_of(999).count(), 0);
        assert_eq!(catalog.lines_spoken_by(14).count(), 0);
        assert_eq!(catalog.line_count_in_conversation(300), 0);
    }

    #[test]
    fn require_maps_miss_to_not_found() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.require_character(999_999).unwrap_err(),
            CoreError::NotFound {
                entity: "Character",
                id: 999_999
            }
        );
        assert!(catalog.require_movie(1).is_ok());
    }

    #[test]
    fn next_ids_exceed_existing_ids() {
        let catalog = sample_catalog();
        assert_eq!(catalog.next_conversation_id(), 301);
        assert_eq!(catalog.next_line_id(), 1023);
        assert_eq!(Catalog::default().next_line_id(), 0);
    }

    #[test]
    fn character_with_unknown_movie_is_rejected() {
        let err = Catalog::build(vec![movie(1, "A")], vec![character(1, "X", 2)], vec![], vec![])
            .unwrap_err();
        assert_matches!(
            err,
            CatalogError::DanglingReference {
                target: "Movie",
                target_id: 2,
                ..
            }
        );
    }

    #[test]
    fn conversation_across_movies_is_rejected() {
        let err = Catalog::build(
            vec![movie(1, "A"), movie(2, "B")],
            vec![character(1, "X", 1), character(2, "Y", 2)],
            vec![conversation(5, 1, 2, 1)],
            vec![],
        )
        .unwrap_err();
        assert_matches!(err, CatalogError::CrossMovie { target_id: 2, .. });
    }

    #[test]
    fn self_conversation_is_rejected() {
        let err = Catalog::build(
            vec![movie(1, "A")],
            vec![character(1, "X", 1)],
            vec![conversation(5, 1, 1, 1)],
            vec![],
        )
        .unwrap_err();
        assert_matches!(err, CatalogError::SelfConversation { id: 5, .. });
    }

    #[test]
    fn line_from_outsider_is_rejected() {
        let err = Catalog::build(
            vec![movie(1, "A")],
            vec![
                character(1, "X", 1),
                character(2, "Y", 1),
                character(3, "Z", 1),
            ],
            vec![conversation(5, 1, 2, 1)],
            vec![line(9, 3, 1, 5, 1)],
        )
        .unwrap_err();
        assert_matches!(
            err,
            CatalogError::NotAParticipant {
                line_id: 9,
                character_id: 3,
                ..
            }
        );
    }

    #[test]
    fn duplicate_line_position_is_rejected() {
        let err = Catalog::build(
            vec![movie(1, "A")],
            vec![character(1, "X", 1), character(2, "Y", 1)],
            vec![conversation(5, 1, 2, 1)],
            vec![line(9, 1, 1, 5, 1), line(10, 2, 1, 5, 1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateLineSort {
                conversation_id: 5,
                line_sort: 1
            }
        );
    }

    #[test]
    fn append_extends_every_index() {
        let mut catalog = sample_catalog();
        catalog
            .append(
                conversation(301, 30, 31, 3),
                vec![line(2000, 31, 3, 301, 1), line(2001, 30, 3, 301, 2)],
            )
            .unwrap();

        assert_eq!(catalog.line_count_in_conversation(301), 2);
        assert_eq!(catalog.line_count_for_character(31), 1);
        assert_eq!(catalog.conversations_of(30).count(), 2);
        assert_eq!(catalog.lines_in_movie(3).count(), 2);
        assert_eq!(catalog.next_conversation_id(), 302);
    }

    #[test]
    fn append_keeps_line_indexes_in_order() {
        let mut catalog = sample_catalog();
        catalog
            .append(
                conversation(301, 10, 11, 1),
                vec![line(1023, 11, 1, 301, 1), line(1024, 10, 1, 301, 2)],
            )
            .unwrap();

        let rick: Vec<DbId> = catalog.lines_spoken_by(10).map(|l| l.id).collect();
        assert_eq!(rick, vec![1000, 1002, 1004, 1005, 1008, 1024]);

        let movie: Vec<DbId> = catalog.lines_in_movie(1).map(|l| l.id).collect();
        let mut expected: Vec<DbId> = (1000..=1008).collect();
        expected.extend([1023, 1024]);
        assert_eq!(movie, expected);
    }

    #[test]
    fn append_with_low_ids_is_placed_in_order() {
        let mut catalog = sample_catalog();
        catalog
            .append(conversation(99, 10, 12, 1), vec![line(999, 10, 1, 99, 1)])
            .unwrap();

        assert_eq!(catalog.lines_spoken_by(10).next().map(|l| l.id), Some(999));
        assert_eq!(catalog.lines_in_movie(1).next().map(|l| l.id), Some(999));
        assert_eq!(catalog.conversations_of(10).next().map(|c| c.id), Some(99));
    }

    #[test]
    fn absorb_adds_rows_committed_elsewhere() {
        let mut catalog = sample_catalog();
        let added = catalog
            .absorb(
                vec![conversation(302, 31, 30, 3), conversation(301, 30, 31, 3)],
                vec![
                    line(1024, 30, 3, 302, 1),
                    line(1023, 30, 3, 301, 1),
                    line(1025, 31, 3, 301, 2),
                ],
            )
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(catalog.next_conversation_id(), 303);
        assert_eq!(catalog.next_line_id(), 1026);
        let lowry: Vec<DbId> = catalog.lines_spoken_by(30).map(|l| l.id).collect();
        assert_eq!(lowry, vec![1023, 1024]);
    }

    #[test]
    fn absorb_rejects_lines_without_their_conversation() {
        let mut catalog = sample_catalog();
        let err = catalog
            .absorb(vec![], vec![line(1023, 30, 3, 301, 1)])
            .unwrap_err();
        assert_matches!(
            err,
            CatalogError::DanglingReference {
                id: 1023,
                target_id: 301,
                ..
            }
        );
    }

    #[test]
    fn failed_append_leaves_catalog_untouched() {
        let mut catalog = sample_catalog();
        let before = catalog.stats();

        let err = catalog
            .append(
                conversation(301, 30, 31, 3),
                vec![line(2000, 31, 3, 301, 1), line(2001, 20, 3, 301, 2)],
            )
            .unwrap_err();

        assert_matches!(err, CatalogError::NotAParticipant { line_id: 2001, .. });
        assert_eq!(catalog.stats(), before);
        assert!(catalog.conversation(301).is_none());
    }
}
