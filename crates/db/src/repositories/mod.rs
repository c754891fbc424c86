//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept a `&PgPool` (or an open transaction) as the first argument.

pub mod character_repo;
pub mod conversation_repo;
pub mod line_repo;
pub mod movie_repo;

pub use character_repo::CharacterRepo;
pub use conversation_repo::ConversationRepo;
pub use line_repo::LineRepo;
pub use movie_repo::MovieRepo;
