//! Request handlers.
//!
//! Read handlers take a shared snapshot of the catalog and delegate to
//! `filmlines_core::report`. The write handler goes through
//! [`MovieStore::add_conversation`](filmlines_db::MovieStore::add_conversation).
//! Errors are mapped via [`AppError`](crate::error::AppError).

pub mod character;
pub mod conversation;
pub mod line;
pub mod movie;
