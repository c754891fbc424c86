//! Shared fixture for unit tests.
//!
//! Three movies:
//!
//! - Casablanca (1): RICK(10) talks to ILSA(11) in two conversations
//!   (3 + 2 lines), to SAM(12) (2 lines) and RENAULT(13) (2 lines).
//!   STRASSER(14) never speaks.
//! - Alien (2): six speakers, RIPLEY(20) leads with 5 lines; PARKER(24)
//!   and KANE(25) tie with ASH(22) at the bottom of the cast table.
//! - Brazil (3): one conversation with no lines at all.

use crate::catalog::Catalog;
use crate::models::{Character, Conversation, Line, Movie};
use crate::types::DbId;

pub(crate) fn movie(id: DbId, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        year: "2000".to_string(),
        imdb_rating: 7.0,
        imdb_votes: 1_000,
    }
}

pub(crate) fn character(id: DbId, name: &str, movie_id: DbId) -> Character {
    Character {
        id,
        name: name.to_string(),
        movie_id,
        gender: Some("M".to_string()),
        age: None,
    }
}

pub(crate) fn conversation(id: DbId, c1: DbId, c2: DbId, movie_id: DbId) -> Conversation {
    Conversation {
        id,
        character1_id: c1,
        character2_id: c2,
        movie_id,
    }
}

pub(crate) fn line(
    id: DbId,
    character_id: DbId,
    movie_id: DbId,
    conversation_id: DbId,
    line_sort: i32,
) -> Line {
    Line {
        id,
        character_id,
        movie_id,
        conversation_id,
        line_sort,
        line_text: format!("line {id}"),
    }
}

fn gendered(mut c: Character, gender: Option<&str>) -> Character {
    c.gender = gender.map(str::to_string);
    c
}

pub(crate) fn sample_catalog() -> Catalog {
    let movies = vec![
        Movie {
            id: 1,
            title: "Casablanca".into(),
            year: "1942".into(),
            imdb_rating: 8.5,
            imdb_votes: 520_000,
        },
        Movie {
            id: 2,
            title: "Alien".into(),
            year: "1979".into(),
            imdb_rating: 8.4,
            imdb_votes: 810_000,
        },
        Movie {
            id: 3,
            title: "Brazil".into(),
            year: "1985".into(),
            imdb_rating: 7.9,
            imdb_votes: 190_000,
        },
    ];

    let characters = vec![
        character(10, "RICK", 1),
        gendered(character(11, "ILSA", 1), Some("F")),
        character(12, "SAM", 1),
        gendered(character(13, "RENAULT", 1), Some("")),
        gendered(character(14, "STRASSER", 1), None),
        gendered(character(20, "RIPLEY", 2), Some("F")),
        character(21, "DALLAS", 2),
        character(22, "ASH", 2),
        gendered(character(23, "LAMBERT", 2), Some("F")),
        character(24, "PARKER", 2),
        character(25, "KANE", 2),
        character(30, "SAM LOWRY", 3),
        gendered(character(31, "JILL", 3), Some("F")),
    ];

    // (conversation id, first, second, movie, speakers in order)
    let script: [(DbId, DbId, DbId, DbId, &[DbId]); 11] = [
        (100, 10, 11, 1, &[10, 11, 10]),
        (101, 11, 10, 1, &[11, 10]),
        (102, 10, 12, 1, &[10, 12]),
        (103, 13, 10, 1, &[13, 10]),
        (200, 20, 21, 2, &[20, 21, 20, 21]),
        (201, 20, 22, 2, &[20, 22, 20]),
        (202, 23, 20, 2, &[23, 20]),
        (203, 24, 25, 2, &[24, 25]),
        (204, 21, 22, 2, &[21]),
        (205, 23, 24, 2, &[23, 24]),
        (300, 30, 31, 3, &[]),
    ];

    let mut conversations = Vec::new();
    let mut lines = Vec::new();
    let mut next_line = 1000;
    for (id, c1, c2, movie_id, speakers) in script {
        conversations.push(conversation(id, c1, c2, movie_id));
        for (pos, speaker) in speakers.iter().enumerate() {
            lines.push(line(next_line, *speaker, movie_id, id, pos as i32 + 1));
            next_line += 1;
        }
    }

    Catalog::build(movies, characters, conversations, lines).expect("fixture is consistent")
}
