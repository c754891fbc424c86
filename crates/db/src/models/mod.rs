//! Row structs for the corpus tables.
//!
//! Each submodule contains a `FromRow` struct matching the table's columns
//! and a conversion into the matching `filmlines_core::models` record.

pub mod character;
pub mod conversation;
pub mod line;
pub mod movie;
