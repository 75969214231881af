//! Drop-in replacements for axum's `Json`, `Query` and `Path` extractors.
//!
//! Axum's own rejections answer with plain text and, for bodies, sometimes
//! 422. These wrappers turn every extraction failure into a 400 with the
//! usual `{"error": ...}` body.

use axum::extract::{FromRequest, FromRequestParts};

use super::error_handling::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ValidQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ValidPath<T>(pub T);
