//! Extractors whose rejections render as [`AppError`] JSON bodies.
//!
//! Axum's stock `Path`, `Query` and `Json` reject with plain-text 400s.
//! These wrappers route the same failures through `AppError`, so a
//! malformed id, query string or body is a 422 `VALIDATION_ERROR`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
