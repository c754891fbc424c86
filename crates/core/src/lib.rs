//! Domain logic for the movie-dialogue API.
//!
//! The crate holds no database or HTTP dependencies. Callers load the four
//! corpus tables into a [`catalog::Catalog`] snapshot and every read path is
//! a pure function over that snapshot.

pub mod aggregate;
pub mod catalog;
pub mod conversation;
pub mod error;
pub mod models;
pub mod pagination;
pub mod ranking;
pub mod report;
pub mod types;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
