//! Request extractors whose rejections are reported as `AppError::Validation`,
//! so a malformed body or query gets the same JSON error shape as every
//! other 400.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::errors::AppError;

/// `axum::Json` with `AppError` rejections.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with `AppError` rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
