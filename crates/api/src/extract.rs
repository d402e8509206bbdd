//! Request extractors whose rejections use the API's JSON error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with malformed bodies reported as `400 BAD_REQUEST`
/// through [`AppError`] instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
