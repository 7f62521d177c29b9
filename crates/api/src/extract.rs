//! Extractors whose rejections go through [`AppError`], so malformed path
//! ids and query strings answer with the same `{ "error": 1, ... }`
//! envelope as every other failure.

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `axum::extract::Path` with an [`AppError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` with an [`AppError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
